//! Pipeline configuration, loaded once at startup from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CorpusError;

/// How unknown surface names are treated during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// An unknown name passes through as its own canonical form.
    #[default]
    Lenient,
    /// An unknown name is discarded, exactly like an empty one.
    Strict,
}

/// How the community detector reads labels within a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LabelUpdateMode {
    /// Reassignments made earlier in a pass are visible to later nodes.
    /// Order-sensitive, kept for parity with the reference heuristic.
    #[default]
    InPlace,
    /// Every node reads labels as they stood when the pass began.
    Snapshot,
}

/// Locations of the datasets an embedding application loads at startup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatasetPaths {
    pub chapters: PathBuf,
    pub aliases: PathBuf,
    pub groups: PathBuf,
    /// Optional; selections by book match nothing without it.
    #[serde(default)]
    pub books: Option<PathBuf>,
}

/// Tunable knobs for the per-chapter pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub datasets: DatasetPaths,

    /// Unknown-name policy for the resolver.
    #[serde(default)]
    pub resolution: ResolutionPolicy,

    /// Edges lighter than this are dropped after aggregation. 1 keeps all.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Upper bound on label propagation passes.
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,

    /// Label visibility within a detection pass.
    #[serde(default)]
    pub label_updates: LabelUpdateMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            datasets: DatasetPaths::default(),
            resolution: ResolutionPolicy::default(),
            min_connections: default_min_connections(),
            max_passes: default_max_passes(),
            label_updates: LabelUpdateMode::default(),
        }
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_passes() -> usize {
    10
}

impl PipelineConfig {
    /// Load the configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|source| CorpusError::io(path, source))?;
        Self::from_toml_str(&text).map_err(|source| CorpusError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse the configuration from a TOML string.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
