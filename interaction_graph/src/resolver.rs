//! Name resolution over the immutable alias table.

use novel_corpus::{AliasTable, ResolutionPolicy};

/// Maps surface-form character names to canonical identities.
///
/// A pure lookup over the process-wide alias table; resolution never fails
/// and never mutates the table.
#[derive(Debug, Clone, Copy)]
pub struct NameResolver<'a> {
    aliases: &'a AliasTable,
    policy: ResolutionPolicy,
}

impl<'a> NameResolver<'a> {
    /// Create a resolver with an explicit unknown-name policy.
    pub fn new(aliases: &'a AliasTable, policy: ResolutionPolicy) -> Self {
        Self { aliases, policy }
    }

    /// Create a resolver with the default lenient policy.
    pub fn lenient(aliases: &'a AliasTable) -> Self {
        Self::new(aliases, ResolutionPolicy::Lenient)
    }

    /// Resolve a raw name to its canonical form.
    ///
    /// The input is trimmed, inner whitespace collapsed, and looked up
    /// case-insensitively. `None` means "no character": blank input, or an
    /// unknown name under the strict policy. Under the lenient policy an
    /// unknown name is treated as already canonical and passes through with
    /// its case preserved.
    pub fn resolve(&self, raw: &str) -> Option<String> {
        let cleaned = clean_name(raw);
        if cleaned.is_empty() {
            return None;
        }

        if let Some(canonical) = self.aliases.canonical(&cleaned) {
            return Some(canonical.to_string());
        }

        match self.policy {
            ResolutionPolicy::Lenient => Some(cleaned),
            ResolutionPolicy::Strict => None,
        }
    }
}

/// Trim and collapse internal whitespace, preserving case.
pub fn clean_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
