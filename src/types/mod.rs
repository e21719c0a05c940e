pub mod destination;
pub mod recommendation;
pub mod response;

pub use destination::{Catalog, DestinationRecord};
pub use recommendation::{Recommendation, RecommendationResult, MAX_RECOMMENDATIONS};
pub use response::{deserialize_structured_response, parse_model_output, strip_code_fences};
