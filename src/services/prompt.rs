use crate::types::{Catalog, MAX_RECOMMENDATIONS};

const OUTPUT_SHAPE: &str = r#"{
  "recommendations": [
    {
      "name": "Exact destination name from the list",
      "match_reason": "A concise, 1-2 sentence explanation of why this destination fits, referencing the user's query.",
      "suggested_activities": ["Activity 1", "Activity 2"],
      "estimated_budget": "The exact 'budget_range' value of the destination (e.g. 'Low-Medium Budget', 'High Budget').",
      "best_time_to_visit": "Specific months (e.g. 'June-Aug, Dec-Feb') or 'Year-round'. Use the destination's 'best_time_to_visit' when present."
    }
  ]
}"#;

/// Build the single instruction payload sent to the model for one query.
///
/// The whole catalog is embedded; selection and ranking are left to the model.
pub fn build_recommendation_prompt(query: &str, catalog: &Catalog) -> String {
    format!(
        r#"You are an expert, friendly tourism assistant specialized exclusively in Uganda. Give helpful, accurate and personalized travel recommendations to people planning a trip to Uganda.

Below is the list of tourist destinations in Uganda. It is your only source of destinations. Do not recommend anything outside this list.

{catalog}

---
User Query: "{query}"
---

Match the query to the most relevant destinations from the list using these criteria, in order of priority:
1. **Interests & Activity Match:** the destination's type and key_activities must align with the user's stated interests.
2. **Budget Compatibility:** compare the user's stated budget with the destination's budget_range.
3. **Regional Preference:** if the user mentions a region, prioritize destinations in that region.
4. **Trip Duration:** consider how practical the destination is for the user's trip length.
5. **Diversity:** suggest the most relevant destinations, at most {max}, that fit the user's criteria.

You MUST answer with a single valid JSON object. Do not include any other text, explanations, or markdown formatting such as code fences.

The JSON structure must be exactly:
{shape}

If no destinations match, return: {{"recommendations": []}}
If the query is too vague to act on, still return any destinations that plausibly fit (or an empty list) and add a top-level "needs_clarification" string holding one short question for the user.
"#,
        catalog = catalog.as_json(),
        query = query,
        max = MAX_RECOMMENDATIONS,
        shape = OUTPUT_SHAPE,
    )
}
