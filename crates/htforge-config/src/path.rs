// crates/htforge-config/src/path.rs
// ============================================================================
// Module: Field Paths
// Description: Dotted/bracketed paths into the raw option bag.
// Purpose: Name offending fields exactly in validation errors.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A [`FieldPath`] renders as `group`, `group.key`, `group[3]` or any nesting
//! of those, e.g. `redirections[0].from` or `fileExpirations.fileTypes.text/html`.
//! Keys are appended verbatim; no escaping is applied.

use std::fmt;

/// Path to a field inside the raw option bag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// Creates a path rooted at a top-level option key.
    #[must_use]
    pub fn root(key: &str) -> Self {
        Self(key.to_string())
    }

    /// Returns a child path for a mapping key.
    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        Self(format!("{}.{key}", self.0))
    }

    /// Returns a child path for a sequence index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// Returns the rendered path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for FieldPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FieldPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
