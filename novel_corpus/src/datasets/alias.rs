//! Alias dataset and the flattened lookup table built from it.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::CorpusError;

/// One structured alias entry: a canonical name and its surface variants.
#[derive(Debug, Clone, Deserialize)]
pub struct AliasEntry {
    pub canonical_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// The alias dataset as it appears on disk.
///
/// Two shapes are accepted: a flat `alias -> canonical` object, or a
/// structured list of [`AliasEntry`] values (optionally wrapped in an object
/// under an `aliases_full` key). All three flatten into the same
/// [`AliasTable`] at load time.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AliasDataset {
    Flat(HashMap<String, String>),
    Entries(Vec<AliasEntry>),
    Wrapped { aliases_full: Vec<AliasEntry> },
}

/// Case-insensitive surface form -> canonical name lookup.
///
/// Built once from the alias dataset and never mutated afterwards; every
/// pipeline invocation borrows it read-only.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    index: HashMap<String, String>,
}

impl AliasTable {
    /// Load and flatten the alias dataset from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let dataset: AliasDataset = super::read_json(path.as_ref())?;
        Ok(Self::from_dataset(dataset))
    }

    /// Parse and flatten the alias dataset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, CorpusError> {
        let dataset: AliasDataset = serde_json::from_str(json)?;
        Ok(Self::from_dataset(dataset))
    }

    /// Flatten a dataset into the lookup index.
    ///
    /// Entries with an empty canonical name are skipped rather than failing
    /// the whole table. In the structured form each canonical name also maps
    /// to itself, so canonical spellings survive a lookup unchanged.
    pub fn from_dataset(dataset: AliasDataset) -> Self {
        let mut index = HashMap::new();

        match dataset {
            AliasDataset::Flat(map) => {
                for (alias, canonical) in map {
                    let canonical = canonical.trim();
                    if canonical.is_empty() {
                        continue;
                    }
                    index.insert(alias.trim().to_lowercase(), canonical.to_string());
                }
            }
            AliasDataset::Entries(entries) | AliasDataset::Wrapped { aliases_full: entries } => {
                for entry in entries {
                    let canonical = entry.canonical_name.trim().to_string();
                    if canonical.is_empty() {
                        continue;
                    }
                    for alias in &entry.aliases {
                        index.insert(alias.trim().to_lowercase(), canonical.clone());
                    }
                    index.insert(canonical.to_lowercase(), canonical);
                }
            }
        }

        tracing::info!(entries = index.len(), "loaded alias table");
        Self { index }
    }

    /// Look up the canonical name for a surface form, case-insensitively.
    pub fn canonical(&self, surface: &str) -> Option<&str> {
        self.index
            .get(&surface.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Number of surface forms in the index.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_dataset() {
        let table = AliasTable::from_json_str(
            r#"{"casaubon": "Edward Casaubon", "Mr. Casaubon": "Edward Casaubon"}"#,
        )
        .unwrap();

        assert_eq!(table.canonical("Casaubon"), Some("Edward Casaubon"));
        assert_eq!(table.canonical("  mr. casaubon "), Some("Edward Casaubon"));
        assert_eq!(table.canonical("Lydgate"), None);
    }

    #[test]
    fn test_structured_dataset() {
        let table = AliasTable::from_json_str(
            r#"[
                {
                    "canonical_name": "Dorothea Brooke",
                    "aliases": ["Dodo", "Miss Brooke", "Mrs. Casaubon"]
                }
            ]"#,
        )
        .unwrap();

        assert_eq!(table.canonical("dodo"), Some("Dorothea Brooke"));
        assert_eq!(table.canonical("MISS BROOKE"), Some("Dorothea Brooke"));
        // The canonical spelling maps to itself.
        assert_eq!(table.canonical("dorothea brooke"), Some("Dorothea Brooke"));
    }

    #[test]
    fn test_wrapped_dataset() {
        let table = AliasTable::from_json_str(
            r#"{
                "aliases_full": [
                    {"canonical_name": "Tertius Lydgate", "aliases": ["Lydgate", "the doctor"]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(table.canonical("the doctor"), Some("Tertius Lydgate"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_empty_canonical_is_skipped() {
        let table = AliasTable::from_json_str(
            r#"[
                {"canonical_name": "  ", "aliases": ["ghost"]},
                {"canonical_name": "Will Ladislaw", "aliases": ["Ladislaw"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(table.canonical("ghost"), None);
        assert_eq!(table.canonical("ladislaw"), Some("Will Ladislaw"));
    }

    #[test]
    fn test_malformed_dataset_fails() {
        assert!(AliasTable::from_json_str("42").is_err());
        assert!(AliasTable::from_json_str(r#"{"a": 1}"#).is_err());
    }
}
