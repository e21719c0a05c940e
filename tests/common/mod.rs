//! Shared helpers: a scripted in-process model client and canned model answers.

#![allow(dead_code)]

use async_trait::async_trait;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};
use uganda_guide::{Catalog, ModelClient, ModelError, ModelErrorKind, RecommendationService};

pub const WILDLIFE_QUERY: &str = "I have 2 days and a medium budget for wildlife viewing";

pub const WILDLIFE_ANSWER: &str = r#"{"recommendations":[{"name":"Queen Elizabeth National Park","match_reason":"Matches wildlife viewing with a medium budget over a short trip.","suggested_activities":["Game drive","Boat cruise"],"estimated_budget":"Medium Budget","best_time_to_visit":"June-Aug, Dec-Feb"}]}"#;

/// Replays queued answers in order and records every call.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    answers: Mutex<VecDeque<Result<String, ModelError>>>,
    calls: Mutex<Vec<(String, String)>>,
    delay: Option<Duration>,
}

impl ScriptedModel {
    pub fn new<I>(answers: I) -> Arc<Self>
    where
        I: IntoIterator<Item = Result<String, ModelError>>,
    {
        Arc::new(Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Default::default()
        })
    }

    pub fn slow(delay: Duration, answer: &str) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(VecDeque::from([Ok(answer.to_string())])),
            delay: Some(delay),
            ..Default::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// (model, prompt) pairs in call order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn generate_content(&self, model: &str, prompt: &str) -> Result<String, ModelError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answers.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(ModelError::new(ModelErrorKind::Server, "no scripted answer left"))
        })
    }
}

pub fn ok(text: &str) -> Result<String, ModelError> {
    Ok(text.to_string())
}

pub fn overloaded() -> Result<String, ModelError> {
    Err(ModelError::new(
        ModelErrorKind::Overloaded,
        "HTTP 503 Service Unavailable error: The model is overloaded.",
    ))
}

pub fn failure(kind: ModelErrorKind) -> Result<String, ModelError> {
    Err(ModelError::new(kind, "scripted failure"))
}

/// Service over the bundled catalog with a short backoff so retries stay fast.
pub fn service(model: Arc<ScriptedModel>) -> RecommendationService {
    let catalog = Arc::new(Catalog::embedded().unwrap());
    RecommendationService::new(model, catalog).with_retry_backoff(Duration::from_millis(20))
}
