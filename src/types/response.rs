use serde_json::Value;

use crate::{
    error::{GuideError, Result},
    schemas::{validate_structured_payload, CompletionSchema},
};

const FENCE: &str = "```";

/// Strip a surrounding markdown code fence (with or without a language tag) and whitespace.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        // Language tag, if any, runs up to the first non-alphanumeric character.
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(rest.len());
        text = &rest[tag_len..];
    }

    text = text.trim();
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }

    text.trim()
}

/// Sanitize raw model text, then parse and validate it as `T`.
pub fn parse_model_output<T>(raw: &str) -> Result<T>
where
    T: CompletionSchema,
{
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(cleaned)
        .map_err(|err| GuideError::MalformedResponse(format!("not valid JSON: {}", err)))?;

    if !value.is_object() {
        return Err(GuideError::MalformedResponse(format!(
            "expected a JSON object for `{}`",
            T::schema().schema_name()
        )));
    }

    validate_structured_payload(T::schema(), &value)?;
    deserialize_structured_response::<T>(value)
}

pub fn deserialize_structured_response<T>(payload: Value) -> Result<T>
where
    T: CompletionSchema,
{
    let schema = T::schema();
    serde_path_to_error::deserialize(payload).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        GuideError::MalformedResponse(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.inner()
        ))
    })
}
