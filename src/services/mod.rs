pub mod gemini_client;
pub mod model_client;
pub mod prompt;
pub mod recommendation;

pub use gemini_client::GeminiClient;
pub use model_client::{ModelClient, ModelError, ModelErrorKind};
pub use prompt::build_recommendation_prompt;
pub use recommendation::RecommendationService;
