//! Chapter-to-book mapping.

use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use super::chapter_key;
use crate::error::CorpusError;

/// Which book of the novel each chapter belongs to.
///
/// The dataset keys chapters either by bare number (`"12"`) or by full key
/// (`"Chapter 12"`); both normalize to `"Chapter N"` at load time. Book
/// labels may appear as JSON strings or numbers and are kept as strings.
#[derive(Debug, Clone, Default)]
pub struct BookTable {
    by_chapter: HashMap<String, String>,
}

impl BookTable {
    /// Load the mapping from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let raw: HashMap<String, Value> = super::read_json(path.as_ref())?;
        Ok(Self::from_raw(raw))
    }

    /// Parse the mapping from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, CorpusError> {
        let raw: HashMap<String, Value> = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: HashMap<String, Value>) -> Self {
        let mut by_chapter = HashMap::new();
        for (key, value) in raw {
            let key = match key.trim().parse::<u32>() {
                Ok(number) => chapter_key(number),
                Err(_) => key.trim().to_string(),
            };
            let label = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            by_chapter.insert(key, label);
        }

        tracing::info!(chapters = by_chapter.len(), "loaded chapter-to-book table");
        Self { by_chapter }
    }

    /// Book label for a chapter key, if the chapter is mapped.
    pub fn book_of(&self, chapter: &str) -> Option<&str> {
        self.by_chapter.get(chapter).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_chapter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_chapter.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_keys_normalize() {
        let table = BookTable::from_json_str(r#"{"1": 1, "2": 1, "13": 2}"#).unwrap();
        assert_eq!(table.book_of("Chapter 1"), Some("1"));
        assert_eq!(table.book_of("Chapter 13"), Some("2"));
        assert_eq!(table.book_of("Chapter 99"), None);
    }

    #[test]
    fn test_full_keys_pass_through() {
        let table =
            BookTable::from_json_str(r#"{"Chapter 5": "Miss Brooke"}"#).unwrap();
        assert_eq!(table.book_of("Chapter 5"), Some("Miss Brooke"));
    }

    #[test]
    fn test_malformed_mapping_fails() {
        assert!(BookTable::from_json_str("[]").is_err());
    }
}
