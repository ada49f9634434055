//! Aggregated edges and their underlying interaction evidence.

use serde::{Deserialize, Serialize};

/// One interaction's type and textual evidence, kept verbatim on the edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(rename = "type")]
    pub kind: String,
    pub snippet: String,
}

impl Evidence {
    pub fn new(kind: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            snippet: snippet.into(),
        }
    }
}

/// Unordered pair of distinct canonical names identifying an edge.
///
/// The two names are stored sorted lexicographically, so `(A, B)` and
/// `(B, A)` produce the same key regardless of input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey {
    a: String,
    b: String,
}

impl PairKey {
    /// Key for two canonical names. `None` for self-pairs.
    pub fn new(x: &str, y: &str) -> Option<Self> {
        if x == y {
            return None;
        }
        let (a, b) = if x < y { (x, y) } else { (y, x) };
        Some(Self {
            a: a.to_string(),
            b: b.to_string(),
        })
    }

    /// Rebuild a key from endpoints already known to be sorted and distinct.
    pub(crate) fn from_sorted(a: &str, b: &str) -> Self {
        debug_assert!(a < b);
        Self {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    /// The endpoints, lexicographically smaller first.
    pub fn endpoints(&self) -> (&str, &str) {
        (&self.a, &self.b)
    }
}

/// One aggregated edge: every interaction between an unordered character pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Lexicographically smaller endpoint.
    pub source: String,

    /// Lexicographically larger endpoint.
    pub target: String,

    /// Count of aggregated interactions; always at least 1.
    pub weight: u32,

    /// Underlying interactions in first-seen order.
    pub interactions: Vec<Evidence>,
}

impl Edge {
    /// Create a weight-1 edge from its first interaction.
    pub fn new(key: &PairKey, evidence: Evidence) -> Self {
        let (source, target) = key.endpoints();
        Self {
            source: source.to_string(),
            target: target.to_string(),
            weight: 1,
            interactions: vec![evidence],
        }
    }

    /// Fold one more interaction into this edge.
    pub fn absorb(&mut self, evidence: Evidence) {
        self.weight += 1;
        self.interactions.push(evidence);
    }

    /// Whether the edge is incident to the given canonical name.
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    pub(crate) fn key(&self) -> PairKey {
        PairKey::from_sorted(&self.source, &self.target)
    }
}
