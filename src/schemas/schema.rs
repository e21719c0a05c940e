use schemars::{schema::RootSchema, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Cached JSON schema handle associated with a response type.
#[derive(Clone, Debug)]
pub struct SchemaHandle {
    schema_name: &'static str,
    schema_json: Arc<Value>,
}

impl SchemaHandle {
    pub fn from_root_schema(schema_name: &'static str, root: RootSchema) -> Self {
        // A derived RootSchema is plain data; serializing it cannot fail.
        let schema_json = serde_json::to_value(root).unwrap_or(Value::Null);

        Self {
            schema_name,
            schema_json: Arc::new(schema_json),
        }
    }

    /// Derive the schema of `T` through schemars.
    pub fn for_type<T: JsonSchema>(schema_name: &'static str) -> Self {
        Self::from_root_schema(schema_name, schemars::schema_for!(T))
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn schema_json(&self) -> &Value {
        self.schema_json.as_ref()
    }
}

/// A structured model answer with a known, validated shape.
pub trait CompletionSchema: DeserializeOwned + Send + Sync + 'static {
    fn schema() -> &'static SchemaHandle;
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;

    #[derive(serde::Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct Sample {
        label: String,
    }

    #[test]
    fn test_for_type_keeps_name_and_schema() {
        let handle = SchemaHandle::for_type::<Sample>("Sample");
        assert_eq!(handle.schema_name(), "Sample");
        assert_eq!(handle.schema_json()["properties"]["label"]["type"], "string");
        assert_eq!(handle.schema_json()["required"][0], "label");
    }
}
