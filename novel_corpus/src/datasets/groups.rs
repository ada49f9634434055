//! Character group dataset and membership lookup.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::CorpusError;

/// Group id for characters absent from every group.
pub const UNKNOWN_GROUP_ID: u32 = 0;

/// Group name for characters absent from every group.
pub const UNKNOWN_GROUP_NAME: &str = "Unknown";

/// Family and social groupings of canonical character names.
///
/// Declaration order is significant: group ids are 1-indexed by the order
/// groups appear in the dataset, and a character listed under several groups
/// belongs to the first one.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct GroupDataset {
    groups: IndexMap<String, Vec<String>>,
}

impl GroupDataset {
    /// Parse the dataset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, CorpusError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a group at the end of the declaration order.
    pub fn push(&mut self, name: impl Into<String>, members: Vec<String>) {
        self.groups.insert(name.into(), members);
    }

    /// Groups in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, members)| (name.as_str(), members.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Canonical name -> group membership, built once from a [`GroupDataset`].
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    membership: HashMap<String, (u32, String)>,
    names: Vec<String>,
}

impl GroupTable {
    /// Load the group dataset from a JSON file and build the lookup.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let dataset: GroupDataset = super::read_json(path.as_ref())?;
        Ok(Self::from_dataset(&dataset))
    }

    /// Parse the group dataset from a JSON string and build the lookup.
    pub fn from_json_str(json: &str) -> Result<Self, CorpusError> {
        Ok(Self::from_dataset(&GroupDataset::from_json_str(json)?))
    }

    /// Build the membership index. First match wins for characters listed
    /// under more than one group; blank member names are skipped.
    pub fn from_dataset(dataset: &GroupDataset) -> Self {
        let mut membership = HashMap::new();
        let mut names = Vec::new();

        for (index, (group, members)) in dataset.groups.iter().enumerate() {
            let id = index as u32 + 1;
            names.push(group.clone());
            for member in members {
                let member = member.trim();
                if member.is_empty() {
                    continue;
                }
                membership
                    .entry(member.to_string())
                    .or_insert_with(|| (id, group.clone()));
            }
        }

        tracing::info!(groups = names.len(), characters = membership.len(), "loaded group table");
        Self { membership, names }
    }

    /// Group id and name for a canonical character; the sentinel group for
    /// characters absent from every group.
    pub fn group_of(&self, name: &str) -> (u32, &str) {
        self.membership
            .get(name)
            .map(|(id, group)| (*id, group.as_str()))
            .unwrap_or((UNKNOWN_GROUP_ID, UNKNOWN_GROUP_NAME))
    }

    /// Group names in declaration order (ids are position + 1).
    pub fn group_names(&self) -> &[String] {
        &self.names
    }

    /// Number of declared groups, not counting the sentinel.
    pub fn group_count(&self) -> usize {
        self.names.len()
    }
}
