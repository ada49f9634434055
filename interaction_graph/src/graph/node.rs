//! Character nodes.

use novel_corpus::{UNKNOWN_GROUP_ID, UNKNOWN_GROUP_NAME};
use serde::{Deserialize, Serialize};

/// One character in a chapter's graph.
///
/// `degree` and `community` are computed during assembly and detection; they
/// are never part of the input data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Canonical character name, unique within the chapter.
    pub id: String,

    /// 1-indexed group id, or [`UNKNOWN_GROUP_ID`] for ungrouped characters.
    pub group: u32,

    #[serde(rename = "groupName")]
    pub group_name: String,

    /// Sum of incident aggregated edge weights.
    pub degree: u32,

    /// Dense 0-indexed community id within this chapter.
    pub community: usize,
}

impl Node {
    /// Create a node in the sentinel group with no connections yet.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group: UNKNOWN_GROUP_ID,
            group_name: UNKNOWN_GROUP_NAME.to_string(),
            degree: 0,
            community: 0,
        }
    }

    /// Set the group membership.
    pub fn with_group(mut self, group: u32, group_name: impl Into<String>) -> Self {
        self.group = group;
        self.group_name = group_name.into();
        self
    }
}
