//! Process configuration read from the environment (and `.env`, loaded by the CLI).
//!
//! - `GEMINI_API_KEY` (required to build the real model client)
//! - `GEMINI_MODEL` (default `models/gemini-2.5-flash`)
//! - `GEMINI_BASE_URL` (default Google Generative Language endpoint)
//! - `HOST` (default `0.0.0.0`), `PORT` (default 5000)
//! - `CATALOG_PATH` (default: catalog bundled with the crate)
//! - `REQUEST_TIMEOUT_SECS` (default 60), `RETRY_BACKOFF_MS` (default 2000)
//!
//! Unset or unparsable numeric values fall back to their defaults.

use std::{path::PathBuf, sync::Arc, time::Duration};

use crate::{
    error::{GuideError, Result},
    services::{
        gemini_client::DEFAULT_BASE_URL,
        recommendation::{DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRY_BACKOFF},
        GeminiClient, ModelClient, RecommendationService,
    },
    types::Catalog,
};

#[derive(Debug, Clone)]
pub struct GuideConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub host: String,
    pub port: u16,
    pub catalog_path: Option<PathBuf>,
    pub request_timeout: Duration,
    pub retry_backoff: Duration,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            catalog_path: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl GuideConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let default = Self::default();

        Self {
            api_key: get("GEMINI_API_KEY"),
            model: get("GEMINI_MODEL").unwrap_or(default.model),
            base_url: get("GEMINI_BASE_URL").unwrap_or(default.base_url),
            host: get("HOST").unwrap_or(default.host),
            port: get("PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.port),
            catalog_path: get("CATALOG_PATH").map(PathBuf::from),
            request_timeout: get("REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(default.request_timeout),
            retry_backoff: get("RETRY_BACKOFF_MS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(default.retry_backoff),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::from_path(path),
            None => Catalog::embedded(),
        }
    }

    pub fn gemini_client(&self) -> Result<GeminiClient> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            GuideError::Config(
                "GEMINI_API_KEY environment variable must be set before calling the model"
                    .to_string(),
            )
        })?;
        Ok(GeminiClient::new(api_key).with_base_url(self.base_url.clone()))
    }

    /// Wire the service with the given model client and the configured catalog.
    pub fn build_service(&self, client: Arc<dyn ModelClient>) -> Result<RecommendationService> {
        let catalog = Arc::new(self.load_catalog()?);
        Ok(RecommendationService::new(client, catalog)
            .with_model(self.model.clone())
            .with_request_timeout(self.request_timeout)
            .with_retry_backoff(self.retry_backoff))
    }
}
