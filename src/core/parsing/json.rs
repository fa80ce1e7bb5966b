use crate::core::parsing::WireCodec;
use crate::domain::model::{
    Format, PostServiceRequestResponse, ProtocolError, Service, ServiceDefinition,
    ServiceDiscoveryInfo, ServiceRequest, ServiceRequestIdResponse,
};
use crate::utils::error::{Open311Error, Result};

/// Object-notation codec, backed by the serde schema on the domain model.
///
/// Single-record operations decode the wire's list shape and take the first
/// record; an empty list is a parse failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

fn first_of<T>(records: Vec<T>, what: &str) -> Result<T> {
    records
        .into_iter()
        .next()
        .ok_or_else(|| Open311Error::parse_failure(format!("payload contains no {} record", what)))
}

impl WireCodec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn decode_service_list(&self, raw: &str) -> Result<Vec<Service>> {
        Ok(serde_json::from_str(raw)?)
    }

    fn decode_service_definition(&self, raw: &str) -> Result<ServiceDefinition> {
        Ok(serde_json::from_str(raw)?)
    }

    fn decode_request_id_from_token(&self, raw: &str) -> Result<ServiceRequestIdResponse> {
        let records: Vec<ServiceRequestIdResponse> = serde_json::from_str(raw)?;
        first_of(records, "service request id")
    }

    fn decode_service_requests(&self, raw: &str) -> Result<Vec<ServiceRequest>> {
        Ok(serde_json::from_str(raw)?)
    }

    fn decode_post_service_request_response(
        &self,
        raw: &str,
    ) -> Result<PostServiceRequestResponse> {
        let records: Vec<PostServiceRequestResponse> = serde_json::from_str(raw)?;
        first_of(records, "post service request response")
    }

    fn decode_error(&self, raw: &str) -> Result<ProtocolError> {
        let records: Vec<ProtocolError> = serde_json::from_str(raw)?;
        first_of(records, "error")
    }

    fn decode_service_discovery(&self, raw: &str) -> Result<ServiceDiscoveryInfo> {
        Ok(serde_json::from_str(raw)?)
    }

    fn encode_service_list(&self, services: &[Service]) -> Result<String> {
        Ok(serde_json::to_string(services)?)
    }

    fn encode_service_definition(&self, definition: &ServiceDefinition) -> Result<String> {
        Ok(serde_json::to_string(definition)?)
    }

    fn encode_request_id_response(&self, response: &ServiceRequestIdResponse) -> Result<String> {
        Ok(serde_json::to_string(&[response])?)
    }

    fn encode_service_requests(&self, requests: &[ServiceRequest]) -> Result<String> {
        Ok(serde_json::to_string(requests)?)
    }

    fn encode_post_service_request_response(
        &self,
        response: &PostServiceRequestResponse,
    ) -> Result<String> {
        Ok(serde_json::to_string(&[response])?)
    }

    fn encode_error(&self, error: &ProtocolError) -> Result<String> {
        Ok(serde_json::to_string(&[error])?)
    }

    fn encode_service_discovery(&self, discovery: &ServiceDiscoveryInfo) -> Result<String> {
        Ok(serde_json::to_string(discovery)?)
    }
}
