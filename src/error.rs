use thiserror::Error;

use crate::services::model_client::ModelError;

/// Main error type for the recommendation system
#[derive(Error, Debug)]
pub enum GuideError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Upstream model error: {0}")]
    Upstream(#[from] ModelError),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GuideError>;

impl GuideError {
    /// Only a transient upstream failure is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            GuideError::Upstream(err) => err.is_transient(),
            _ => false,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            GuideError::Config(_) => "CONFIG_ERROR",
            GuideError::InvalidRequest(_) => "INVALID_REQUEST",
            GuideError::Upstream(_) => "UPSTREAM_FAILURE",
            GuideError::MalformedResponse(_) => "MALFORMED_UPSTREAM_RESPONSE",
            GuideError::Io(_) => "IO_ERROR",
            GuideError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// HTTP status the error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            GuideError::InvalidRequest(_) => 400,
            _ => 500,
        }
    }

    /// Message safe to hand to a caller. Upstream detail and raw model text stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            GuideError::InvalidRequest(message) => message.clone(),
            GuideError::MalformedResponse(_) => "Failed to parse AI response".to_string(),
            _ => "Internal server error".to_string(),
        }
    }

    /// Convert to the `{ "error": ... }` body returned over HTTP
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.public_message() })
    }
}
