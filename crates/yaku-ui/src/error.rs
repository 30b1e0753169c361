//! Error types for the dashboard frontend

use thiserror::Error;

/// Errors that can occur in the browser layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UiError {
    /// `window.L` is missing; the Leaflet script did not load
    #[error("Leaflet is not available")]
    LeafletMissing,

    /// The map has not been created yet
    #[error("map is not initialized")]
    MapNotReady,

    /// A Leaflet call threw
    #[error("map call '{call}' failed: {reason}")]
    MapCall { call: String, reason: String },

    /// Options could not be converted to a JS object
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl UiError {
    pub fn map_call(call: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MapCall {
            call: call.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for frontend operations
pub type Result<T> = std::result::Result<T, UiError>;
