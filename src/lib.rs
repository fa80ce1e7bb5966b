//! Negotiation and marshaling core for GeoReport v2 (Open311) servers.
//!
//! The crate turns discovery documents into a bound [`ProtocolClient`],
//! builds the request URLs and POST bodies the protocol expects, and decodes
//! and encodes every GeoReport message type in both wire encodings. It owns
//! no transport: callers bring their own HTTP stack and feed raw payloads to
//! the codecs.

pub mod core;
pub mod domain;
pub mod utils;

pub use crate::core::client::ProtocolClient;
pub use crate::core::dates::DateCodec;
pub use crate::core::discovery::{
    negotiate_format, resolve_endpoint, GEOREPORT_V2_SPECIFICATION_URL,
};
pub use crate::core::parsing::{codec_for, JsonCodec, WireCodec, XmlCodec};
pub use crate::core::urls::RequestUrlBuilder;
pub use crate::domain::model::{
    AttributeDatatype, AttributeInfo, AttributeValue, Endpoint, EndpointType, Format,
    PostServiceRequestResponse, ProtocolError, RequestAttribute, RequestStatus, Service,
    ServiceDefinition, ServiceDiscoveryInfo, ServiceRequest, ServiceRequestIdResponse, ServiceType,
};
pub use crate::utils::error::{Open311Error, Result};
