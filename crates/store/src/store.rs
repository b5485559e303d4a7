//! In-memory index over persisted scheme records.
//!
//! `FactStore::load` is the single startup entry point; any failure there
//! (missing file, corrupt JSON, invariant violation) is fatal, so the engine
//! never serves from a partially loaded store.

use crate::records::{FactValue, SchemeRecord};
use faq_core::{AppError, AppResult};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Accepted shapes of the persisted file: a bare array or an object
/// wrapping the array (both are produced by pipeline versions in the wild).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PersistedDocument {
    Schemes(Vec<SchemeRecord>),
    Wrapped { schemes: Vec<SchemeRecord> },
    Data { data: Vec<SchemeRecord> },
}

impl PersistedDocument {
    fn into_records(self) -> Vec<SchemeRecord> {
        match self {
            PersistedDocument::Schemes(records) => records,
            PersistedDocument::Wrapped { schemes } => schemes,
            PersistedDocument::Data { data } => data,
        }
    }
}

/// One name/alias span that matched inside a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch<'a> {
    /// Id of the scheme the span belongs to
    pub scheme_id: &'a str,

    /// The normalized span that matched (name or alias)
    pub span: &'a str,
}

/// Aggregate store statistics for diagnostics.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoreStats {
    pub total_schemes: usize,
    pub total_facts: usize,
    /// Number of schemes carrying each fact key
    pub fact_coverage: BTreeMap<String, usize>,
}

/// Immutable index over scheme records.
///
/// Shared read-only across all concurrent query handlers; there is no
/// writer after construction.
pub struct FactStore {
    schemes: Vec<SchemeRecord>,
    by_id: HashMap<String, usize>,
    /// (normalized name/alias, scheme index), sorted by span length
    /// descending so the longest match is found first
    name_index: Vec<(String, usize)>,
}

impl FactStore {
    /// Load the store from the persisted JSON file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Store(format!("Failed to read scheme records {:?}: {}", path, e))
        })?;

        let document: PersistedDocument = serde_json::from_str(&contents).map_err(|e| {
            AppError::Store(format!("Failed to parse scheme records {:?}: {}", path, e))
        })?;

        let store = Self::from_records(document.into_records())?;

        tracing::info!(
            "Loaded {} schemes ({} name spans) from {:?}",
            store.len(),
            store.name_index.len(),
            path
        );

        Ok(store)
    }

    /// Build the store from already-deserialized records.
    ///
    /// Validates the fact-citation invariant and id uniqueness; a violation
    /// means the persisted file is corrupt and loading must fail.
    pub fn from_records(schemes: Vec<SchemeRecord>) -> AppResult<Self> {
        if schemes.is_empty() {
            return Err(AppError::Store(
                "Persisted store contains no scheme records".to_string(),
            ));
        }

        let mut by_id = HashMap::with_capacity(schemes.len());
        let mut name_index = Vec::new();

        for (idx, scheme) in schemes.iter().enumerate() {
            if scheme.id.is_empty() || scheme.scheme_name.is_empty() {
                return Err(AppError::Store(format!(
                    "Record {} is missing id or scheme_name",
                    idx
                )));
            }

            if by_id.insert(scheme.id.clone(), idx).is_some() {
                return Err(AppError::Store(format!(
                    "Duplicate scheme id: {}",
                    scheme.id
                )));
            }

            for (key, fact) in &scheme.facts {
                if fact.source_url.is_empty() {
                    return Err(AppError::Store(format!(
                        "Fact '{}' of scheme '{}' has no source_url",
                        key, scheme.id
                    )));
                }
            }

            let name_span = normalize(&scheme.scheme_name);
            if !name_span.is_empty() {
                name_index.push((name_span, idx));
            }
            for alias in &scheme.aliases {
                let alias_span = normalize(alias);
                if !alias_span.is_empty() {
                    name_index.push((alias_span, idx));
                }
            }
        }

        // Longest span first so resolution prefers the most specific name
        name_index.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        Ok(Self {
            schemes,
            by_id,
            name_index,
        })
    }

    /// Get a scheme by id.
    pub fn get(&self, scheme_id: &str) -> Option<&SchemeRecord> {
        self.by_id.get(scheme_id).map(|&idx| &self.schemes[idx])
    }

    /// Look up a single fact of a scheme.
    pub fn lookup(&self, scheme_id: &str, fact_key: &str) -> Option<&FactValue> {
        self.get(scheme_id).and_then(|scheme| scheme.fact(fact_key))
    }

    /// Find all name/alias spans contained in the query text.
    ///
    /// Matches are whole-word, case-insensitive, and returned longest span
    /// first; the caller (EntityResolver) takes the head to disambiguate
    /// overlapping fund names.
    pub fn matches(&self, text: &str) -> Vec<NameMatch<'_>> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        let haystack = format!(" {} ", normalized);

        self.name_index
            .iter()
            .filter(|(span, _)| haystack.contains(&format!(" {} ", span)))
            .map(|(span, idx)| NameMatch {
                scheme_id: &self.schemes[*idx].id,
                span,
            })
            .collect()
    }

    /// Iterate over all schemes in load order.
    pub fn schemes(&self) -> impl Iterator<Item = &SchemeRecord> {
        self.schemes.iter()
    }

    /// Number of loaded schemes.
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Compute aggregate statistics over the loaded records.
    pub fn stats(&self) -> StoreStats {
        let mut fact_coverage: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_facts = 0;

        for scheme in &self.schemes {
            for key in scheme.facts.keys() {
                *fact_coverage.entry(key.clone()).or_insert(0) += 1;
                total_facts += 1;
            }
        }

        StoreStats {
            total_schemes: self.schemes.len(),
            total_facts,
            fact_coverage,
        }
    }
}

/// Normalize text for name matching and classification: lowercase, strip
/// punctuation, collapse whitespace.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;

    for c in text.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }

    if out.ends_with(' ') {
        out.pop();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(id: &str, name: &str, facts: &[(&str, &str, &str)]) -> SchemeRecord {
        SchemeRecord {
            id: id.to_string(),
            scheme_name: name.to_string(),
            aliases: Vec::new(),
            category: None,
            source_url: format!("https://example.com/{}", id),
            last_updated: None,
            facts: facts
                .iter()
                .map(|(key, value, url)| {
                    (
                        key.to_string(),
                        FactValue {
                            value: value.to_string(),
                            source_url: url.to_string(),
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Axis Floater Fund?!  "), "axis floater fund");
        assert_eq!(normalize("ICICI Banking & PSU"), "icici banking psu");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn test_lookup() {
        let store = FactStore::from_records(vec![record(
            "axis-floater-fund",
            "Axis Floater Fund",
            &[("expense_ratio", "0.3%", "https://example.com/er")],
        )])
        .unwrap();

        let fact = store.lookup("axis-floater-fund", "expense_ratio").unwrap();
        assert_eq!(fact.value, "0.3%");
        assert_eq!(fact.source_url, "https://example.com/er");
        assert!(store.lookup("axis-floater-fund", "exit_load").is_none());
        assert!(store.lookup("no-such-scheme", "expense_ratio").is_none());
    }

    #[test]
    fn test_matches_prefers_longest_span() {
        let store = FactStore::from_records(vec![
            record("axis-fund", "Axis Fund", &[]),
            record("axis-floater-fund", "Axis Floater Fund", &[]),
        ])
        .unwrap();

        let matches = store.matches("expense ratio of Axis Floater Fund");
        assert!(!matches.is_empty());
        // Longest matching span first
        assert_eq!(matches[0].scheme_id, "axis-floater-fund");
    }

    #[test]
    fn test_matches_is_whole_word() {
        let store = FactStore::from_records(vec![record("nav-fund", "Nav", &[])]).unwrap();

        assert!(store.matches("what is the nav today").len() == 1);
        assert!(store.matches("how do I navigate there").is_empty());
    }

    #[test]
    fn test_matches_via_alias() {
        let mut rec = record("axis-floater-fund", "Axis Floater Fund", &[]);
        rec.aliases.push("Axis Floater".to_string());

        let store = FactStore::from_records(vec![rec]).unwrap();
        let matches = store.matches("exit load of axis floater please");
        assert_eq!(matches[0].scheme_id, "axis-floater-fund");
    }

    #[test]
    fn test_empty_store_is_rejected() {
        assert!(FactStore::from_records(Vec::new()).is_err());
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let result = FactStore::from_records(vec![
            record("dup", "Fund A", &[]),
            record("dup", "Fund B", &[]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_citation_is_rejected() {
        let result =
            FactStore::from_records(vec![record("x", "X Fund", &[("expense_ratio", "1%", "")])]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_wrapped_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"schemes": [{{"id": "x", "scheme_name": "X Fund", "facts": {{}}}}]}}"#
        )
        .unwrap();

        let store = FactStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("x").is_some());
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let result = FactStore::load(Path::new("/nonexistent/schemes.json"));
        assert!(result.is_err());
    }
}
