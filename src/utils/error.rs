use thiserror::Error;

/// Failures produced by the negotiation and marshaling core.
///
/// Well-formed application-level error documents are *not* represented here:
/// they decode into [`crate::domain::model::ProtocolError`] values which the
/// caller must check explicitly.
#[derive(Error, Debug)]
pub enum Open311Error {
    /// The payload could not be interpreted as the requested shape, or a
    /// structurally mandatory field was missing.
    #[error("failed to decode payload: {message}")]
    ParseFailure { message: String },

    /// The discovery document contains no endpoint usable for the desired
    /// endpoint type.
    #[error("no suitable endpoint was found")]
    NoSuitableEndpoint,

    /// A format token matched neither supported wire encoding.
    #[error("unrecognized format: {token}")]
    UnrecognizedFormat { token: String },

    /// A caller-supplied input (base URL, argument) failed validation.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl Open311Error {
    pub fn parse_failure(message: impl Into<String>) -> Self {
        Open311Error::ParseFailure {
            message: message.into(),
        }
    }

    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Open311Error::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Open311Error {
    fn from(err: serde_json::Error) -> Self {
        Open311Error::parse_failure(err.to_string())
    }
}

impl From<quick_xml::Error> for Open311Error {
    fn from(err: quick_xml::Error) -> Self {
        Open311Error::parse_failure(err.to_string())
    }
}

impl From<url::ParseError> for Open311Error {
    fn from(err: url::ParseError) -> Self {
        Open311Error::invalid_input("url", err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Open311Error>;
