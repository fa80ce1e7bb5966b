use tracing::debug;

use crate::domain::model::{Endpoint, EndpointType, Format, ServiceDiscoveryInfo};

/// Specification URL a GeoReport v2 endpoint advertises in its discovery
/// entry. Endpoints advertising anything else are assumed to speak some other
/// revision of the protocol.
pub const GEOREPORT_V2_SPECIFICATION_URL: &str = "http://wiki.open311.org/GeoReport_v2";

/// Picks the endpoint to talk to out of a discovery document.
///
/// Only endpoints of the requested type are considered. Among those, an
/// endpoint whose specification URL is the GeoReport v2 one and whose base URL
/// mentions "v2" wins immediately; otherwise the last seen endpoint with the
/// GeoReport v2 specification URL is kept. Returns `None` when no endpoint of
/// the requested type advertises that specification.
pub fn resolve_endpoint(
    discovery: &ServiceDiscoveryInfo,
    endpoint_type: EndpointType,
) -> Option<&Endpoint> {
    let mut candidate = None;
    for endpoint in &discovery.endpoints {
        if endpoint.endpoint_type != endpoint_type {
            continue;
        }
        if endpoint.specification_url != GEOREPORT_V2_SPECIFICATION_URL {
            debug!(
                url = %endpoint.url,
                specification = %endpoint.specification_url,
                "skipping endpoint with foreign specification"
            );
            continue;
        }
        if endpoint.url.contains("v2") {
            return Some(endpoint);
        }
        candidate = Some(endpoint);
    }
    candidate
}

/// Settles on the wire format to use against an endpoint.
///
/// The preferred format is honored when the endpoint supports it; otherwise
/// the shared fallback order applies, object notation before markup. `None`
/// means the endpoint advertises no format this crate can speak, which a
/// well-formed discovery document never does.
pub fn negotiate_format(preferred: Option<Format>, endpoint: &Endpoint) -> Option<Format> {
    if let Some(format) = preferred {
        if endpoint.supports(format) {
            return Some(format);
        }
        debug!(%format, url = %endpoint.url, "preferred format not supported, falling back");
    }
    [Format::Json, Format::Xml]
        .into_iter()
        .find(|format| endpoint.supports(*format))
}
