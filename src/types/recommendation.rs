use std::sync::OnceLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::schemas::{CompletionSchema, SchemaHandle};

/// Most destinations the model may return for one query.
pub const MAX_RECOMMENDATIONS: usize = 6;

/// Structured answer returned by the model for one travel query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct RecommendationResult {
    /// Best matching destinations, most relevant first. Empty when nothing matches.
    #[schemars(length(max = 6))]
    pub recommendations: Vec<Recommendation>,
    /// Short clarifying question when the query was too vague to act on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_clarification: Option<String>,
}

/// One recommended destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendation {
    /// Exact destination name from the catalog
    pub name: String,
    /// One or two sentences tying the destination to the query
    pub match_reason: String,
    /// Activities to do there, drawn from the destination's key activities
    pub suggested_activities: Vec<String>,
    /// The destination's `budget_range`, verbatim
    pub estimated_budget: String,
    /// Months to go (e.g. "June-Aug, Dec-Feb") or "Year-round"
    pub best_time_to_visit: String,
}

impl RecommendationResult {
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.recommendations.iter().map(|r| r.name.as_str())
    }
}

impl CompletionSchema for RecommendationResult {
    fn schema() -> &'static SchemaHandle {
        static SCHEMA: OnceLock<SchemaHandle> = OnceLock::new();
        SCHEMA.get_or_init(|| SchemaHandle::for_type::<RecommendationResult>("RecommendationResult"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_caps_recommendations() {
        let schema = RecommendationResult::schema().schema_json();
        let recs = &schema["properties"]["recommendations"];
        assert_eq!(recs["type"], "array");
        assert_eq!(recs["maxItems"], MAX_RECOMMENDATIONS as u64);

        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "recommendations"));
        assert!(!required.iter().any(|v| v == "needs_clarification"));
    }

    #[test]
    fn test_clarification_omitted_when_absent() {
        let result = RecommendationResult::default();
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({ "recommendations": [] })
        );
    }
}
