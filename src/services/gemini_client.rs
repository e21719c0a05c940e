use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

use super::model_client::{ModelClient, ModelError, ModelErrorKind};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// REST client for the Gemini `generateContent` endpoint.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
    ) -> std::result::Result<String, ModelError> {
        let request_url = build_generate_url(&self.base_url, model);
        let body = json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] }
            ]
        });

        let response = self
            .http
            .post(&request_url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                let kind = if err.is_timeout() {
                    ModelErrorKind::Timeout
                } else {
                    ModelErrorKind::Transport
                };
                ModelError::new(kind, format!("HTTP request failed: {err}"))
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|err| {
            ModelError::new(
                ModelErrorKind::Transport,
                format!("Failed to read response: {err}"),
            )
        })?;

        debug!(
            target: "uganda_guide::gemini",
            model,
            status = status.as_u16(),
            bytes = response_text.len(),
            "generateContent answered"
        );

        let response_json: Option<Value> = serde_json::from_str(&response_text).ok();

        if !status.is_success() {
            let error = response_json.as_ref().and_then(|value| value.get("error"));
            let api_status = error
                .and_then(|error| error.get("status"))
                .and_then(|value| value.as_str());
            let api_message = error
                .and_then(|error| error.get("message"))
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| response_text.clone());

            return Err(ModelError::new(
                classify_status(status, api_status),
                format!("HTTP {} error: {}", status, api_message),
            ));
        }

        let response_json = response_json.ok_or_else(|| {
            ModelError::new(
                ModelErrorKind::InvalidResponse,
                "Response body is not JSON",
            )
        })?;

        extract_candidate_text(&response_json)
    }
}

fn build_generate_url(base_url: &str, model: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    let model = if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    };
    format!("{}/{}:generateContent", trimmed, model)
}

/// Map an unsuccessful HTTP status (plus the provider's status string) onto a failure kind.
fn classify_status(status: StatusCode, api_status: Option<&str>) -> ModelErrorKind {
    if status == StatusCode::SERVICE_UNAVAILABLE || api_status == Some("UNAVAILABLE") {
        return ModelErrorKind::Overloaded;
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ModelErrorKind::RateLimited;
    }
    if status == StatusCode::GATEWAY_TIMEOUT {
        return ModelErrorKind::Timeout;
    }
    if status.is_client_error() {
        ModelErrorKind::Rejected
    } else {
        ModelErrorKind::Server
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_candidate_text(response: &Value) -> std::result::Result<String, ModelError> {
    if let Some(reason) = response
        .get("promptFeedback")
        .and_then(|feedback| feedback.get("blockReason"))
        .and_then(|value| value.as_str())
    {
        return Err(ModelError::new(
            ModelErrorKind::Rejected,
            format!("Prompt blocked: {}", reason),
        ));
    }

    let parts = response
        .get("candidates")
        .and_then(|candidates| candidates.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .ok_or_else(|| {
            ModelError::new(
                ModelErrorKind::InvalidResponse,
                "Response has no candidate content",
            )
        })?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|value| value.as_str()))
        .collect();

    if text.is_empty() {
        return Err(ModelError::new(
            ModelErrorKind::InvalidResponse,
            "Candidate content has no text parts",
        ));
    }

    Ok(text)
}
