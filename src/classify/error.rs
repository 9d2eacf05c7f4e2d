//! Error types for the classification client

use thiserror::Error;

/// Why a classification produced no result.
///
/// Variants carry strings rather than source errors so the value can travel
/// inside a UI message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// Transport failure before any response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// Endpoint answered with a non-2xx status
    #[error("Server responded with {status}: {status_text}")]
    Remote { status: u16, status_text: String },

    /// Body was not the expected `{disease, confidence}` JSON
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Predicted label is not in the disease catalog
    #[error("Unknown disease: {name}")]
    UnknownDisease { name: String },

    /// Image could not be converted to an upload payload
    #[error("Could not prepare image for upload: {0}")]
    Payload(String),
}

impl From<reqwest::Error> for ClassifyError {
    fn from(err: reqwest::Error) -> Self {
        ClassifyError::Network(err.to_string())
    }
}
