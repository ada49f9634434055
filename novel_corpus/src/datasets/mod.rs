//! Dataset definitions for the annotated novel.
//!
//! Four datasets feed the chapter web:
//! - **Chapters**: per-chapter records of characters present and pairwise interactions
//! - **Aliases**: surface name variants mapped to canonical names
//! - **Groups**: family and social groupings of canonical names
//! - **Books**: which book of the novel each chapter belongs to

mod alias;
mod books;
mod chapter;
mod groups;

pub use alias::*;
pub use books::*;
pub use chapter::*;
pub use groups::*;

use std::path::Path;

use crate::error::CorpusError;

/// Read a dataset file and deserialize it from JSON.
///
/// Any structural problem (unreadable file, invalid JSON, wrong shape) fails
/// fast here so corrupt state never reaches per-chapter processing.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CorpusError> {
    let text =
        std::fs::read_to_string(path).map_err(|source| CorpusError::io(path, source))?;
    serde_json::from_str(&text).map_err(|source| CorpusError::dataset(path, source))
}
