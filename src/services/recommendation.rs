use std::{sync::Arc, time::Duration};

use tracing::{error, info, warn};

use super::{
    model_client::{ModelClient, ModelError, ModelErrorKind},
    prompt::build_recommendation_prompt,
};
use crate::{
    error::{GuideError, Result},
    types::{parse_model_output, Catalog, RecommendationResult},
};

pub const DEFAULT_MODEL: &str = "models/gemini-2.5-flash";
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(2);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Turns a free-text query into validated recommendations from the model.
#[derive(Debug, Clone)]
pub struct RecommendationService {
    client: Arc<dyn ModelClient>,
    catalog: Arc<Catalog>,
    model: String,
    retry_backoff: Duration,
    request_timeout: Duration,
}

impl RecommendationService {
    pub fn new(client: Arc<dyn ModelClient>, catalog: Arc<Catalog>) -> Self {
        Self {
            client,
            catalog,
            model: DEFAULT_MODEL.to_string(),
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn retry_backoff(&self) -> Duration {
        self.retry_backoff
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub async fn recommend(&self, query: &str) -> Result<RecommendationResult> {
        if query.trim().is_empty() {
            return Err(GuideError::InvalidRequest("Query is required".to_string()));
        }

        let prompt = build_recommendation_prompt(query, &self.catalog);
        let raw = self.generate_with_retry(&prompt).await?;

        let result: RecommendationResult = parse_model_output(&raw).map_err(|err| {
            error!(
                target: "uganda_guide::service",
                error = %err,
                raw = %raw,
                "model output failed validation"
            );
            err
        })?;

        for name in result.names() {
            if !self.catalog.contains(name) {
                warn!(
                    target: "uganda_guide::service",
                    destination = name,
                    "model recommended a destination outside the catalog"
                );
            }
        }

        info!(
            target: "uganda_guide::service",
            count = result.len(),
            clarification = result.needs_clarification.is_some(),
            "recommendations ready"
        );
        Ok(result)
    }

    /// One attempt, plus a single delayed retry when the provider reports overload.
    async fn generate_with_retry(&self, prompt: &str) -> Result<String> {
        match self.attempt(prompt).await {
            Ok(text) => Ok(text),
            Err(err) if err.is_retryable() => {
                warn!(
                    target: "uganda_guide::service",
                    error = %err,
                    backoff_ms = self.retry_backoff.as_millis() as u64,
                    "model overloaded, retrying once"
                );
                tokio::time::sleep(self.retry_backoff).await;
                self.attempt(prompt).await.map_err(|err| {
                    error!(target: "uganda_guide::service", error = %err, "retry failed");
                    err
                })
            }
            Err(err) => {
                error!(target: "uganda_guide::service", error = %err, "model call failed");
                Err(err)
            }
        }
    }

    /// A single model call bounded by the per-attempt timeout.
    async fn attempt(&self, prompt: &str) -> Result<String> {
        let call = self.client.generate_content(&self.model, prompt);
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(GuideError::Upstream(ModelError::new(
                ModelErrorKind::Timeout,
                format!(
                    "no answer from `{}` within {}s",
                    self.model,
                    self.request_timeout.as_secs()
                ),
            ))),
        }
    }
}
