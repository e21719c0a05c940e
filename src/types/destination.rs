use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GuideError, Result};

const EMBEDDED_CATALOG: &str = include_str!("../../data/destinations.json");

/// A tourist destination the model is allowed to recommend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub key_activities: Vec<String>,
    pub budget_range: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_visit: Option<String>,
    /// Any further descriptive fields are carried into the prompt untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Immutable set of destinations, loaded once and shared by every request.
#[derive(Debug, Clone)]
pub struct Catalog {
    destinations: Vec<DestinationRecord>,
    rendered: String,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate names.
    pub fn new(destinations: Vec<DestinationRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for record in &destinations {
            let name = record.name.trim();
            if name.is_empty() {
                return Err(GuideError::Config(
                    "catalog contains a destination with an empty name".to_string(),
                ));
            }
            if !seen.insert(name.to_string()) {
                return Err(GuideError::Config(format!(
                    "catalog contains duplicate destination `{}`",
                    name
                )));
            }
        }

        let rendered = serde_json::to_string_pretty(&destinations)?;
        Ok(Self {
            destinations,
            rendered,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let destinations: Vec<DestinationRecord> = serde_json::from_str(raw)
            .map_err(|err| GuideError::Config(format!("invalid catalog JSON: {}", err)))?;
        Self::new(destinations)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// The catalog bundled with the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    pub fn destinations(&self) -> &[DestinationRecord] {
        &self.destinations
    }

    pub fn get(&self, name: &str) -> Option<&DestinationRecord> {
        self.destinations.iter().find(|d| d.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Pretty JSON of every record, as embedded in prompts.
    pub fn as_json(&self) -> &str {
        &self.rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert!(!catalog.is_empty());
        let qenp = catalog.get("Queen Elizabeth National Park").unwrap();
        assert_eq!(qenp.budget_range, "Medium Budget");
        assert!(qenp.key_activities.iter().any(|a| a == "Game drive"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let raw = r#"[
            {"name": "Sipi Falls", "type": "Waterfall", "key_activities": [], "budget_range": "Low Budget", "region": "Eastern"},
            {"name": "Sipi Falls", "type": "Waterfall", "key_activities": [], "budget_range": "Low Budget", "region": "Eastern"}
        ]"#;
        let err = Catalog::from_json_str(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate destination `Sipi Falls`"));
    }

    #[test]
    fn test_extra_fields_survive_rendering() {
        let raw = r#"[
            {"name": "Ssese Islands", "type": "Island", "key_activities": ["Beach"],
             "budget_range": "Medium Budget", "region": "Central", "description": "Lake Victoria archipelago"}
        ]"#;
        let catalog = Catalog::from_json_str(raw).unwrap();
        let record = catalog.get("Ssese Islands").unwrap();
        assert!(record.best_time_to_visit.is_none());
        assert_eq!(record.extra["description"], "Lake Victoria archipelago");
        assert!(catalog.as_json().contains("Lake Victoria archipelago"));
        assert!(!catalog.as_json().contains("best_time_to_visit"));
    }
}
