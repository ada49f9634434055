//! Load-time error taxonomy.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading datasets or configuration.
///
/// Only structurally invalid input fails a load. Irregularities inside
/// otherwise well-formed data (empty names, self-pair interactions,
/// characters missing from every group) are handled during per-chapter
/// processing and never surface here.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// A dataset or configuration file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dataset was not valid JSON or did not have the required shape.
    #[error("invalid dataset {}", path.display())]
    Dataset {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A dataset string passed in directly (no file involved) was malformed.
    #[error("invalid dataset")]
    Parse(#[from] serde_json::Error),

    /// The pipeline configuration was not valid TOML.
    #[error("invalid configuration {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl CorpusError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn dataset(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Dataset {
            path: path.into(),
            source,
        }
    }
}
