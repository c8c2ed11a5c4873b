//! The commit record shared by every module during one run.

use std::collections::BTreeMap;

/// In-progress commit message.
///
/// One instance exists per run. It is created empty by the commiter, seeded
/// by the init pass, filled in by form answers, rewritten by the
/// post-processing pass and finally read by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commit {
    /// Conventional-commit type (`feat`, `fix`, ...).
    pub commit_type: String,
    /// Rendered scope placed in parentheses in the header.
    pub scope: String,
    /// Scope ids picked in a multi-scope selection.
    pub scopes: Vec<String>,
    /// Short summary line.
    pub description: String,
    /// Free-form detail; several modules prepend or append to it.
    pub body: String,
    /// Trailer lines appended verbatim after co-authors.
    pub footer: String,
    /// Breaking-change indicator.
    pub breaking: bool,
    /// Co-author ids, resolved to display strings during post-processing.
    pub co_authored_by: Vec<String>,
    /// Module scratch fields.
    pub extras: Extras,
}

impl Commit {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Open-ended side channel for module scratch values.
///
/// Each key owns one string cell. A module creates its cell during init and
/// any module may read or overwrite it afterwards. Cells are never removed,
/// so a reader only has to handle a cell that was never created (the owning
/// module is inactive) or one that is still empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extras {
    cells: BTreeMap<String, String>,
}

impl Extras {
    /// Create the cell for `key` if it does not exist yet and return it.
    ///
    /// An existing cell keeps its value.
    pub fn create(&mut self, key: &str) -> &mut String {
        self.cells.entry(key.to_string()).or_default()
    }

    /// Read a cell.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells.get(key).map(String::as_str)
    }

    /// Read a cell, treating an empty value as absent.
    pub fn provided(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Overwrite a cell, creating it when missing.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        *self.create(key) = value.into();
    }

    /// Whether the cell for `key` was created.
    pub fn contains(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    /// Number of created cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell was created.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_commit_is_empty() {
        let commit = Commit::new();
        assert!(commit.commit_type.is_empty());
        assert!(commit.co_authored_by.is_empty());
        assert!(!commit.breaking);
        assert!(commit.extras.is_empty());
    }

    #[test]
    fn create_keeps_existing_value() {
        let mut extras = Extras::default();
        extras.set("why", "because");
        let cell = extras.create("why");
        assert_eq!(cell, "because");
        assert_eq!(extras.len(), 1);
    }

    #[test]
    fn provided_treats_empty_as_absent() {
        let mut extras = Extras::default();
        assert_eq!(extras.provided("why"), None);
        let _ = extras.create("why");
        assert!(extras.contains("why"));
        assert_eq!(extras.get("why"), Some(""));
        assert_eq!(extras.provided("why"), None);
        extras.set("why", "speed");
        assert_eq!(extras.provided("why"), Some("speed"));
    }
}
