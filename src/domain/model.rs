use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize, Serializer};
use url::Url;

/// The two interchangeable wire encodings a GeoReport server may speak.
///
/// A format always carries both its URL extension token and the MIME content
/// type used for transport-level content negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Xml,
    Json,
}

impl Format {
    /// Short token appended to operation URLs (`services.xml`).
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Xml => "xml",
            Format::Json => "json",
        }
    }

    /// MIME content type for HTTP content negotiation.
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Xml => "application/xml",
            Format::Json => "application/json",
        }
    }

    pub fn from_extension(token: &str) -> Option<Format> {
        match token.trim().to_lowercase().as_str() {
            "xml" => Some(Format::Xml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    pub fn from_content_type(token: &str) -> Option<Format> {
        // Some live servers advertise "text/xml" in their discovery document.
        match token.trim().to_lowercase().as_str() {
            "application/xml" | "text/xml" => Some(Format::Xml),
            "application/json" | "text/json" => Some(Format::Json),
            _ => None,
        }
    }

    /// Accepts either an extension token or a content type.
    pub fn from_wire_token(token: &str) -> Option<Format> {
        Format::from_extension(token).or_else(|| Format::from_content_type(token))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for Format {
    type Err = crate::utils::error::Open311Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Format::from_wire_token(token).ok_or_else(|| crate::utils::error::Open311Error::UnrecognizedFormat {
            token: token.to_string(),
        })
    }
}

impl Serialize for Format {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.content_type())
    }
}

/// Advertised role of an endpoint within a discovery document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EndpointType {
    Production,
    Test,
    Acceptation,
    #[default]
    Unknown,
}

impl EndpointType {
    /// Case-insensitive token parse; unrecognized tokens yield `None`.
    pub fn parse(token: &str) -> Option<EndpointType> {
        match token.trim().to_lowercase().as_str() {
            "production" => Some(EndpointType::Production),
            "test" => Some(EndpointType::Test),
            "acceptation" => Some(EndpointType::Acceptation),
            _ => None,
        }
    }

    pub fn wire_token(&self) -> &'static str {
        match self {
            EndpointType::Production => "production",
            EndpointType::Test => "test",
            EndpointType::Acceptation => "acceptation",
            EndpointType::Unknown => "unknown",
        }
    }
}

impl Serialize for EndpointType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_token())
    }
}

/// Processing mode of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    Realtime,
    Batch,
    Blackbox,
}

impl ServiceType {
    pub fn parse(token: &str) -> Option<ServiceType> {
        match token.trim().to_lowercase().as_str() {
            "realtime" => Some(ServiceType::Realtime),
            "batch" => Some(ServiceType::Batch),
            "blackbox" => Some(ServiceType::Blackbox),
            _ => None,
        }
    }

    pub fn wire_token(&self) -> &'static str {
        match self {
            ServiceType::Realtime => "realtime",
            ServiceType::Batch => "batch",
            ServiceType::Blackbox => "blackbox",
        }
    }
}

impl Serialize for ServiceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_token())
    }
}

/// Lifecycle state of a service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    Open,
    Closed,
}

impl RequestStatus {
    pub fn parse(token: &str) -> Option<RequestStatus> {
        match token.trim().to_lowercase().as_str() {
            "open" => Some(RequestStatus::Open),
            "closed" => Some(RequestStatus::Closed),
            _ => None,
        }
    }

    pub fn wire_token(&self) -> &'static str {
        match self {
            RequestStatus::Open => "open",
            RequestStatus::Closed => "closed",
        }
    }
}

impl Serialize for RequestStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_token())
    }
}

/// Datatype of a service definition attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttributeDatatype {
    String,
    Number,
    Datetime,
    Text,
    #[default]
    SingleValueList,
    MultiValueList,
}

impl AttributeDatatype {
    pub fn parse(token: &str) -> Option<AttributeDatatype> {
        match token.trim().to_lowercase().as_str() {
            "string" => Some(AttributeDatatype::String),
            "number" => Some(AttributeDatatype::Number),
            "datetime" => Some(AttributeDatatype::Datetime),
            "text" => Some(AttributeDatatype::Text),
            "singlevaluelist" => Some(AttributeDatatype::SingleValueList),
            "multivaluelist" => Some(AttributeDatatype::MultiValueList),
            _ => None,
        }
    }

    pub fn wire_token(&self) -> &'static str {
        match self {
            AttributeDatatype::String => "string",
            AttributeDatatype::Number => "number",
            AttributeDatatype::Datetime => "datetime",
            AttributeDatatype::Text => "text",
            AttributeDatatype::SingleValueList => "singlevaluelist",
            AttributeDatatype::MultiValueList => "multivaluelist",
        }
    }
}

impl Serialize for AttributeDatatype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_token())
    }
}

/// One service a server lets citizens report issues against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub service_code: String,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub metadata: bool,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "wire::service_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_type: Option<ServiceType>,
    /// Kept verbatim as the wire's single delimited string; use
    /// [`Service::keyword_list`] for the decoded sequence.
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub group: String,
}

impl Service {
    /// Splits the keyword string on `","`, trimming surrounding whitespace
    /// and preserving order and case.
    pub fn keyword_list(&self) -> Vec<&str> {
        if self.keywords.trim().is_empty() {
            return Vec::new();
        }
        self.keywords.split(',').map(str::trim).collect()
    }
}

/// Schema of the extra attributes a service requires when filing a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub service_code: String,
    #[serde(default)]
    pub attributes: Vec<AttributeInfo>,
}

/// One attribute of a service definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeInfo {
    #[serde(default)]
    pub variable: bool,
    #[serde(default)]
    pub code: String,
    #[serde(default, deserialize_with = "wire::datatype")]
    pub datatype: AttributeDatatype,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub datatype_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<AttributeValue>,
}

/// A (key, name) choice of a single- or multi-value list attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
}

/// A reported civic issue tracked through an open/closed lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub service_request_id: String,
    #[serde(
        default,
        deserialize_with = "wire::status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<RequestStatus>,
    #[serde(default)]
    pub status_notes: String,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub service_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub agency_responsible: String,
    #[serde(default)]
    pub service_notice: String,
    #[serde(default, with = "wire::date", skip_serializing_if = "Option::is_none")]
    pub requested_datetime: Option<DateTime<FixedOffset>>,
    #[serde(default, with = "wire::date", skip_serializing_if = "Option::is_none")]
    pub updated_datetime: Option<DateTime<FixedOffset>>,
    #[serde(default, with = "wire::date", skip_serializing_if = "Option::is_none")]
    pub expected_datetime: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<u32>,
    #[serde(rename = "lat", default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(rename = "long", default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(
        default,
        with = "wire::media_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub media_url: Option<Url>,
}

/// Acknowledgment of a POST service request operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostServiceRequestResponse {
    pub service_request_id: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub service_notice: String,
    #[serde(default)]
    pub account_id: String,
}

/// Response to the GET service-request-id-from-token operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequestIdResponse {
    pub service_request_id: String,
    #[serde(default)]
    pub token: String,
}

/// A well-formed application-level error document. Data, not a failure: the
/// caller decides when to decode a payload as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoReportError #{}: {}", self.code, self.description)
    }
}

/// One advertised (specification, URL, type, formats) tuple within a
/// discovery document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(rename = "specification", default)]
    pub specification_url: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, with = "wire::date", skip_serializing_if = "Option::is_none")]
    pub changeset: Option<DateTime<FixedOffset>>,
    #[serde(rename = "type", default, deserialize_with = "wire::endpoint_type")]
    pub endpoint_type: EndpointType,
    /// Non-empty once parsed: an endpoint advertising no recognizable format
    /// token defaults to XML.
    #[serde(default = "wire::default_formats", with = "wire::formats")]
    pub formats: Vec<Format>,
}

impl Endpoint {
    pub fn supports(&self, format: Format) -> bool {
        self.formats.contains(&format)
    }
}

/// Top-level metadata a server publishes describing its endpoints. Immutable
/// once produced by one discovery fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDiscoveryInfo {
    #[serde(default, with = "wire::date", skip_serializing_if = "Option::is_none")]
    pub changeset: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub key_service: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// Caller-supplied attribute of a POST service request, expanded into one or
/// more body parameter pairs.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestAttribute {
    SingleValue { code: String, value: String },
    MultiValue { code: String, values: Vec<String> },
}

impl RequestAttribute {
    pub fn single(code: impl Into<String>, value: impl Into<String>) -> Self {
        RequestAttribute::SingleValue {
            code: code.into(),
            value: value.into(),
        }
    }

    pub fn multi(code: impl Into<String>, values: Vec<String>) -> Self {
        RequestAttribute::MultiValue {
            code: code.into(),
            values,
        }
    }

    /// Body parameter pairs: `attribute[CODE]` for single values, one
    /// `attribute[CODE][]` pair per value otherwise.
    pub fn to_post_parameters(&self) -> Vec<(String, String)> {
        match self {
            RequestAttribute::SingleValue { code, value } => {
                vec![(format!("attribute[{}]", code), value.clone())]
            }
            RequestAttribute::MultiValue { code, values } => values
                .iter()
                .map(|value| (format!("attribute[{}][]", code), value.clone()))
                .collect(),
        }
    }
}

/// Per-field decode policies shared by the serde-driven codec: lenient enum
/// tokens, ordered-fallback dates, tolerant URLs.
mod wire {
    use super::*;
    use crate::core::dates::DateCodec;
    use serde::{Deserialize, Deserializer};

    pub(super) fn service_type<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ServiceType>, D::Error> {
        let token = Option::<String>::deserialize(deserializer)?;
        Ok(token.as_deref().and_then(ServiceType::parse))
    }

    pub(super) fn status<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<RequestStatus>, D::Error> {
        let token = Option::<String>::deserialize(deserializer)?;
        Ok(token.as_deref().and_then(RequestStatus::parse))
    }

    pub(super) fn endpoint_type<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<EndpointType, D::Error> {
        let token = Option::<String>::deserialize(deserializer)?;
        Ok(token
            .as_deref()
            .and_then(EndpointType::parse)
            .unwrap_or_default())
    }

    pub(super) fn datatype<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<AttributeDatatype, D::Error> {
        let token = Option::<String>::deserialize(deserializer)?;
        Ok(token
            .as_deref()
            .and_then(AttributeDatatype::parse)
            .unwrap_or_default())
    }

    pub(super) fn default_formats() -> Vec<Format> {
        vec![Format::Xml]
    }

    pub(super) mod formats {
        use super::*;
        use serde::ser::SerializeSeq;
        use serde::Serializer;

        pub fn serialize<S: Serializer>(
            formats: &[Format],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(formats.len()))?;
            for format in formats {
                seq.serialize_element(format.content_type())?;
            }
            seq.end()
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<Format>, D::Error> {
            let tokens = Vec::<String>::deserialize(deserializer)?;
            Ok(parse_format_list(tokens.iter().map(String::as_str)))
        }
    }

    /// Maps recognized tokens in order, dropping duplicates; an empty result
    /// falls back to XML so the non-empty invariant holds.
    pub fn parse_format_list<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<Format> {
        let mut formats = Vec::new();
        for token in tokens {
            if let Some(format) = Format::from_wire_token(token) {
                if !formats.contains(&format) {
                    formats.push(format);
                }
            }
        }
        if formats.is_empty() {
            formats.push(Format::Xml);
        }
        formats
    }

    pub(super) mod date {
        use super::*;
        use serde::Serializer;

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<FixedOffset>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(timestamp) => serializer.serialize_str(&DateCodec::new().print(timestamp)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            Ok(raw.as_deref().and_then(|text| DateCodec::new().parse(text)))
        }
    }

    pub(super) mod media_url {
        use super::*;
        use serde::Serializer;

        pub fn serialize<S: Serializer>(
            value: &Option<Url>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(url) => serializer.serialize_str(url.as_str()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Url>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            Ok(raw.and_then(|text| Url::parse(text.trim()).ok()))
        }
    }
}

pub(crate) use wire::parse_format_list;
