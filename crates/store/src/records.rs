//! Persisted scheme record model.
//!
//! These types mirror the collaborator contract with the external data
//! pipeline: an array of scheme objects, each carrying a map of facts where
//! every fact is paired with its own source URL.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single factual attribute of a scheme, paired with its citation.
///
/// Invariant: `source_url` is never empty for a stored fact. Facts the
/// pipeline could not collect are simply absent from the map, never stored
/// as placeholders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FactValue {
    pub value: String,
    pub source_url: String,
}

/// One mutual-fund scheme as persisted by the data pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeRecord {
    /// Stable identifier (slug derived from the scheme name)
    pub id: String,

    /// Canonical scheme name
    #[serde(alias = "name")]
    pub scheme_name: String,

    /// Alternate names the scheme is known by
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Fund category (e.g., "Equity", "Debt")
    #[serde(default)]
    pub category: Option<String>,

    /// The scheme's own page; used as degraded citation when a requested
    /// fact is missing
    #[serde(default)]
    pub source_url: String,

    /// When the pipeline last refreshed this record (ISO 8601)
    #[serde(default)]
    pub last_updated: Option<String>,

    /// Collected facts, keyed by fact key (e.g., "expense_ratio")
    #[serde(default)]
    pub facts: HashMap<String, FactValue>,
}

impl SchemeRecord {
    /// Get a fact by key, if the pipeline collected it.
    pub fn fact(&self, key: &str) -> Option<&FactValue> {
        self.facts.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserialization_with_defaults() {
        let json = r#"{
            "id": "axis-floater-fund",
            "scheme_name": "Axis Floater Fund",
            "facts": {
                "expense_ratio": {
                    "value": "0.3%",
                    "source_url": "https://example.com/axis-floater-fund"
                }
            }
        }"#;

        let record: SchemeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "axis-floater-fund");
        assert!(record.aliases.is_empty());
        assert!(record.category.is_none());
        assert_eq!(record.fact("expense_ratio").unwrap().value, "0.3%");
        assert!(record.fact("exit_load").is_none());
    }

    #[test]
    fn test_record_accepts_name_alias() {
        let json = r#"{"id": "x", "name": "X Fund", "facts": {}}"#;
        let record: SchemeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.scheme_name, "X Fund");
    }
}
