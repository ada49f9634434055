//! Per-chapter annotation records and chapter selection.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::BookTable;
use crate::error::CorpusError;

/// One annotated interaction between two characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInteraction {
    pub character_1: String,
    pub character_2: String,
    #[serde(default)]
    pub interaction_type: String,
    #[serde(default)]
    pub evidence_snippet: String,
}

impl RawInteraction {
    /// Create an interaction record, mostly useful in tests and fixtures.
    pub fn new(
        character_1: impl Into<String>,
        character_2: impl Into<String>,
        interaction_type: impl Into<String>,
        evidence_snippet: impl Into<String>,
    ) -> Self {
        Self {
            character_1: character_1.into(),
            character_2: character_2.into(),
            interaction_type: interaction_type.into(),
            evidence_snippet: evidence_snippet.into(),
        }
    }
}

/// The annotation record for a single chapter. Read-only input.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChapterRecord {
    /// Characters explicitly listed as present in the chapter.
    #[serde(default)]
    pub characters: Vec<String>,

    /// Pairwise interaction events in annotation order.
    #[serde(default)]
    pub interactions: Vec<RawInteraction>,
}

/// All chapter records, keyed by `"Chapter N"`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ChapterDataset {
    records: HashMap<String, ChapterRecord>,
}

impl ChapterDataset {
    /// Load the dataset from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let dataset: Self = super::read_json(path.as_ref())?;
        tracing::info!(chapters = dataset.len(), "loaded chapter dataset");
        Ok(dataset)
    }

    /// Parse the dataset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, CorpusError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up one chapter's record. `None` means "no data for this chapter".
    pub fn record(&self, key: &str) -> Option<&ChapterRecord> {
        self.records.get(key)
    }

    /// Insert or replace a chapter record.
    pub fn insert(&mut self, key: impl Into<String>, record: ChapterRecord) {
        self.records.insert(key.into(), record);
    }

    /// Number of chapters with records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All chapter keys ordered by chapter number; keys without a trailing
    /// number sort after the numbered ones, alphabetically.
    pub fn keys_ordered(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.records.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| match (chapter_number(a), chapter_number(b)) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        });
        keys
    }

    /// Chapter keys matching a selection, ordered by chapter number.
    pub fn select<'a>(&'a self, selection: &ChapterSelection, books: &BookTable) -> Vec<&'a str> {
        self.keys_ordered()
            .into_iter()
            .filter(|key| selection.matches(key, books))
            .collect()
    }
}

/// Filter for choosing which chapters feed a graph build.
///
/// `start`/`end` bound the chapter number (inclusive); `book` restricts to
/// chapters of one book of the novel. An empty selection matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSelection {
    #[serde(default)]
    pub start: Option<u32>,
    #[serde(default)]
    pub end: Option<u32>,
    #[serde(default)]
    pub book: Option<String>,
}

impl ChapterSelection {
    /// Select a single chapter by number.
    pub fn single(number: u32) -> Self {
        Self::range(number, number)
    }

    /// Select an inclusive range of chapter numbers.
    pub fn range(start: u32, end: u32) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            book: None,
        }
    }

    /// Restrict the selection to one book.
    pub fn with_book(mut self, book: impl Into<String>) -> Self {
        self.book = Some(book.into());
        self
    }

    fn matches(&self, key: &str, books: &BookTable) -> bool {
        if self.start.is_some() || self.end.is_some() {
            // Keys without a chapter number never match a numeric filter.
            let Some(number) = chapter_number(key) else {
                return false;
            };
            if self.start.is_some_and(|s| number < s) {
                return false;
            }
            if self.end.is_some_and(|e| number > e) {
                return false;
            }
        }

        match self.book.as_deref() {
            None | Some("") | Some("all") => true,
            Some(book) => books
                .book_of(key)
                .unwrap_or("")
                .eq_ignore_ascii_case(book),
        }
    }
}

/// Build the canonical `"Chapter N"` key.
pub fn chapter_key(number: u32) -> String {
    format!("Chapter {number}")
}

/// Extract the trailing chapter number from a key like `"Chapter 12"`.
pub fn chapter_number(key: &str) -> Option<u32> {
    let trimmed = key.trim();
    let start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    trimmed[start..].parse().ok()
}
