use tracing::{debug, info};

use crate::core::discovery::{negotiate_format, resolve_endpoint};
use crate::core::parsing::{codec_for, tags, WireCodec};
use crate::core::urls::RequestUrlBuilder;
use crate::domain::model::{EndpointType, Format, RequestAttribute, ServiceDiscoveryInfo};
use crate::utils::error::{Open311Error, Result};

/// A client bound to one endpoint, one jurisdiction and one wire format.
///
/// The client owns no transport: it produces the URLs and body parameters a
/// caller should send and hands out the codec that interprets the payloads
/// coming back. The API key, when present, is forwarded opaquely in POST
/// bodies.
#[derive(Debug, Clone)]
pub struct ProtocolClient {
    urls: RequestUrlBuilder,
    format: Format,
    api_key: String,
}

impl ProtocolClient {
    /// Binds directly to a known endpoint, bypassing discovery.
    pub fn bind(
        base_url: &str,
        jurisdiction_id: &str,
        format: Format,
        api_key: &str,
    ) -> Result<Self> {
        Ok(Self {
            urls: RequestUrlBuilder::new(base_url, jurisdiction_id, format)?,
            format,
            api_key: api_key.to_string(),
        })
    }

    /// Binds through a discovery document: resolves the endpoint of the
    /// desired type, then settles the wire format against what it advertises.
    pub fn from_discovery(
        discovery: &ServiceDiscoveryInfo,
        desired_type: EndpointType,
        preferred_format: Option<Format>,
        jurisdiction_id: &str,
        api_key: &str,
    ) -> Result<Self> {
        let endpoint =
            resolve_endpoint(discovery, desired_type).ok_or(Open311Error::NoSuitableEndpoint)?;
        debug!(url = %endpoint.url, ?desired_type, "resolved endpoint");
        let format =
            negotiate_format(preferred_format, endpoint).ok_or(Open311Error::NoSuitableEndpoint)?;
        info!(url = %endpoint.url, %format, "bound to endpoint");
        Self::bind(&endpoint.url, jurisdiction_id, format, api_key)
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// The codec matching the negotiated format.
    pub fn codec(&self) -> &'static dyn WireCodec {
        codec_for(self.format)
    }

    pub fn urls(&self) -> &RequestUrlBuilder {
        &self.urls
    }

    /// Body parameters for posting a new service request, with the API key
    /// appended when one is set.
    pub fn post_service_request_body(
        &self,
        arguments: &[(String, String)],
        attributes: &[RequestAttribute],
    ) -> Vec<(String, String)> {
        let mut body = self.urls.post_service_request_body(arguments, attributes);
        if !self.api_key.is_empty() {
            body.push((tags::API_KEY.to_string(), self.api_key.clone()));
        }
        body
    }
}
