//! Seam between the recommendation service and a generative model provider.
//!
//! Providers classify their own failures into [`ModelErrorKind`] so callers can
//! decide on retries without inspecting error text.

use async_trait::async_trait;
use thiserror::Error;

/// Failure classes a model provider can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelErrorKind {
    /// Provider is temporarily unavailable or overloaded (HTTP 503 / `UNAVAILABLE`).
    Overloaded,
    /// The attempt did not finish within the configured timeout.
    Timeout,
    /// Quota or rate limit hit (HTTP 429).
    RateLimited,
    /// Request refused by the provider (bad key, bad model id, other 4xx).
    Rejected,
    /// Any other provider-side 5xx.
    Server,
    /// Connection or protocol failure before a response was read.
    Transport,
    /// Provider answered but the envelope carried no usable text.
    InvalidResponse,
}

impl ModelErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelErrorKind::Overloaded => "overloaded",
            ModelErrorKind::Timeout => "timeout",
            ModelErrorKind::RateLimited => "rate_limited",
            ModelErrorKind::Rejected => "rejected",
            ModelErrorKind::Server => "server",
            ModelErrorKind::Transport => "transport",
            ModelErrorKind::InvalidResponse => "invalid_response",
        }
    }
}

/// Error returned by a [`ModelClient`] attempt.
#[derive(Error, Debug, Clone)]
#[error("{}: {}", .kind.as_str(), .message)]
pub struct ModelError {
    pub kind: ModelErrorKind,
    pub message: String,
}

impl ModelError {
    pub fn new(kind: ModelErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether a single delayed retry may succeed.
    pub fn is_transient(&self) -> bool {
        self.kind == ModelErrorKind::Overloaded
    }
}

/// A generative model addressed by identifier: one text prompt in, one text answer out.
#[async_trait]
pub trait ModelClient: Send + Sync + std::fmt::Debug {
    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
    ) -> std::result::Result<String, ModelError>;
}
