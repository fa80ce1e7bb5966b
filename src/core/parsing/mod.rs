pub mod json;
pub mod xml;

use crate::domain::model::{
    Format, PostServiceRequestResponse, ProtocolError, Service, ServiceDefinition,
    ServiceDiscoveryInfo, ServiceRequest, ServiceRequestIdResponse,
};
use crate::utils::error::Result;

pub use json::JsonCodec;
pub use xml::XmlCodec;

/// Wire tag table shared by both encodings. The serde renames on the domain
/// model mirror these constants; the markup codec consumes them directly.
pub mod tags {
    pub const SERVICE: &str = "service";
    pub const SERVICES: &str = "services";
    pub const SERVICE_CODE: &str = "service_code";
    pub const SERVICE_NAME: &str = "service_name";
    pub const DESCRIPTION: &str = "description";
    pub const METADATA: &str = "metadata";
    pub const TYPE: &str = "type";
    pub const KEYWORDS: &str = "keywords";
    pub const GROUP: &str = "group";
    pub const SERVICE_DEFINITION: &str = "service_definition";
    pub const ATTRIBUTES: &str = "attributes";
    pub const ATTRIBUTE: &str = "attribute";
    pub const VARIABLE: &str = "variable";
    pub const CODE: &str = "code";
    pub const DATATYPE: &str = "datatype";
    pub const REQUIRED: &str = "required";
    pub const DATATYPE_DESCRIPTION: &str = "datatype_description";
    pub const ORDER: &str = "order";
    pub const VALUES: &str = "values";
    pub const VALUE: &str = "value";
    pub const KEY: &str = "key";
    pub const NAME: &str = "name";
    pub const SERVICE_REQUESTS: &str = "service_requests";
    pub const REQUEST: &str = "request";
    pub const SERVICE_REQUEST_ID: &str = "service_request_id";
    pub const TOKEN: &str = "token";
    pub const STATUS: &str = "status";
    pub const STATUS_NOTES: &str = "status_notes";
    pub const AGENCY_RESPONSIBLE: &str = "agency_responsible";
    pub const SERVICE_NOTICE: &str = "service_notice";
    pub const REQUESTED_DATETIME: &str = "requested_datetime";
    pub const UPDATED_DATETIME: &str = "updated_datetime";
    pub const EXPECTED_DATETIME: &str = "expected_datetime";
    pub const ADDRESS: &str = "address";
    pub const ADDRESS_ID: &str = "address_id";
    pub const ZIPCODE: &str = "zipcode";
    pub const LATITUDE: &str = "lat";
    pub const LONGITUDE: &str = "long";
    pub const MEDIA_URL: &str = "media_url";
    pub const ACCOUNT_ID: &str = "account_id";
    pub const ERRORS: &str = "errors";
    pub const ERROR: &str = "error";
    pub const DISCOVERY: &str = "discovery";
    pub const CHANGESET: &str = "changeset";
    pub const CONTACT: &str = "contact";
    pub const KEY_SERVICE: &str = "key_service";
    pub const ENDPOINTS: &str = "endpoints";
    pub const ENDPOINT: &str = "endpoint";
    pub const SPECIFICATION: &str = "specification";
    pub const URL: &str = "url";
    pub const FORMATS: &str = "formats";
    pub const FORMAT: &str = "format";
    pub const JURISDICTION_ID: &str = "jurisdiction_id";
    pub const API_KEY: &str = "api_key";
}

/// One decode and one encode operation per message type.
///
/// Decoding fails with a parse failure when the raw text cannot be
/// interpreted as the expected shape or a structurally mandatory field is
/// missing; missing optional fields resolve to the documented defaults.
/// Decoding an application-level error payload is a distinct operation, never
/// an automatic fallback: the caller decides which operation to invoke.
pub trait WireCodec {
    fn format(&self) -> Format;

    fn decode_service_list(&self, raw: &str) -> Result<Vec<Service>>;
    fn decode_service_definition(&self, raw: &str) -> Result<ServiceDefinition>;
    fn decode_request_id_from_token(&self, raw: &str) -> Result<ServiceRequestIdResponse>;
    fn decode_service_requests(&self, raw: &str) -> Result<Vec<ServiceRequest>>;
    fn decode_post_service_request_response(&self, raw: &str)
        -> Result<PostServiceRequestResponse>;
    /// Fails with a parse failure when the payload holds zero error records.
    fn decode_error(&self, raw: &str) -> Result<ProtocolError>;
    fn decode_service_discovery(&self, raw: &str) -> Result<ServiceDiscoveryInfo>;

    fn encode_service_list(&self, services: &[Service]) -> Result<String>;
    fn encode_service_definition(&self, definition: &ServiceDefinition) -> Result<String>;
    fn encode_request_id_response(&self, response: &ServiceRequestIdResponse) -> Result<String>;
    fn encode_service_requests(&self, requests: &[ServiceRequest]) -> Result<String>;
    fn encode_post_service_request_response(
        &self,
        response: &PostServiceRequestResponse,
    ) -> Result<String>;
    fn encode_error(&self, error: &ProtocolError) -> Result<String>;
    fn encode_service_discovery(&self, discovery: &ServiceDiscoveryInfo) -> Result<String>;
}

/// Returns the codec for a wire format. Both codecs are stateless.
pub fn codec_for(format: Format) -> &'static dyn WireCodec {
    match format {
        Format::Xml => &XmlCodec,
        Format::Json => &JsonCodec,
    }
}
