//! Error types for the Yaku core.
//!
//! All errors are explicit, typed, and recoverable - no panics allowed.
//! Request failures follow the dashboard taxonomy: transport, protocol,
//! application, plus an undecodable body. Route payloads in an unknown
//! shape get their own error so the render pipeline can degrade instead
//! of failing.

use thiserror::Error;

/// Validation and configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid node id: {reason}")]
    InvalidNodeId { reason: String },

    #[error("invalid coordinate: {reason}")]
    InvalidCoordinate { reason: String },

    #[error("invalid form field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("TOML parse error: {reason}")]
    TomlParseFailed { reason: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Error {
    /// Create an invalid node id error.
    pub fn invalid_node_id(reason: impl Into<String>) -> Self {
        Self::InvalidNodeId {
            reason: reason.into(),
        }
    }

    /// Create an invalid coordinate error.
    pub fn invalid_coordinate(reason: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            reason: reason.into(),
        }
    }

    /// Create an invalid form field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// Failure of a request against the processing backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessingError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Protocol { status: u16 },

    /// The server answered 2xx but reported an error in the payload.
    #[error("{0}")]
    Application(String),

    /// The body was not the JSON document the endpoint promises.
    #[error("failed to parse response: {0}")]
    Decode(String),
}

impl ProcessingError {
    /// Short category name, used in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Protocol { .. } => "protocol",
            Self::Application(_) => "application",
            Self::Decode(_) => "decode",
        }
    }
}

/// The highlighted-routes payload was neither a mapping nor a list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized route payload shape: {found}")]
pub struct DataShapeError {
    pub found: &'static str,
}

/// Misuse of the render pipeline state machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("a processing request is already in flight")]
    Busy,

    #[error("no processing request is in flight")]
    NotSubmitting,

    #[error(transparent)]
    Request(#[from] ProcessingError),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::invalid_node_id("empty");
        assert_eq!(error.to_string(), "invalid node id: empty");

        let error = Error::invalid_field("latitud", "not a number");
        assert_eq!(
            error.to_string(),
            "invalid form field 'latitud': not a number"
        );
    }

    #[test]
    fn test_processing_error_display() {
        let error = ProcessingError::Protocol { status: 500 };
        assert_eq!(error.to_string(), "HTTP error! status: 500");
        assert_eq!(error.kind(), "protocol");

        let error = ProcessingError::Application("No reservoirs found in data".to_string());
        assert_eq!(error.to_string(), "No reservoirs found in data");
        assert_eq!(error.kind(), "application");
    }

    #[test]
    fn test_pipeline_error_wraps_request_error() {
        let error: PipelineError = ProcessingError::Transport("offline".to_string()).into();
        assert_eq!(error.to_string(), "network error: offline");
    }

    #[test]
    fn test_data_shape_error_display() {
        let error = DataShapeError { found: "string" };
        assert_eq!(
            error.to_string(),
            "unrecognized route payload shape: string"
        );
    }
}
