//! uganda-guide: AI-backed tourism recommendations over a fixed Ugandan destination catalog
//!
//! A free-text travel query is folded, together with the whole catalog, into one prompt for a
//! generative model. The model's JSON answer is sanitized, validated against the
//! [`RecommendationResult`] schema and returned as-is. Overload failures are retried once.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use uganda_guide::{Catalog, GeminiClient, RecommendationService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_key = std::env::var("GEMINI_API_KEY")?;
//!     let service = RecommendationService::new(
//!         Arc::new(GeminiClient::new(api_key)),
//!         Arc::new(Catalog::embedded()?),
//!     );
//!
//!     let result = service
//!         .recommend("I have 2 days and a medium budget for wildlife viewing")
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod schemas;
pub mod server;
pub mod services;
pub mod types;

pub use config::GuideConfig;
pub use error::{GuideError, Result};
pub use schemas::{CompletionSchema, SchemaHandle};
pub use services::{
    build_recommendation_prompt, GeminiClient, ModelClient, ModelError, ModelErrorKind,
    RecommendationService,
};
pub use types::{
    parse_model_output, strip_code_fences, Catalog, DestinationRecord, Recommendation,
    RecommendationResult, MAX_RECOMMENDATIONS,
};

#[cfg(feature = "cli")]
pub mod cli;
