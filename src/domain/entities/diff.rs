//! Build diff entity
//!
//! A `Diff` is produced once per build by whatever computed the changes and
//! is read-only afterwards. Paths are relative to the build directory and
//! always use forward slashes.

use chrono::{DateTime, Utc};

/// What happened to a path since the previous build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// New path
    Add,
    /// Present in both builds, possibly unchanged
    Keep,
    /// Deleted since the previous build
    Remove,
}

/// Per-path change record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffEntry {
    pub behavior: Behavior,
    pub mod_time: DateTime<Utc>,
}

impl DiffEntry {
    pub fn new(behavior: Behavior, mod_time: DateTime<Utc>) -> Self {
        Self { behavior, mod_time }
    }

    pub fn is_remove(&self) -> bool {
        self.behavior == Behavior::Remove
    }
}

/// Ordered collection of `(path, entry)` pairs
///
/// Order is whatever the producer pushed; consumers must not reorder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    entries: Vec<(String, DiffEntry)>,
}

impl Diff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, entry: DiffEntry) {
        self.entries.push((path.into(), entry));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DiffEntry)> {
        self.entries.iter().map(|(p, e)| (p.as_str(), e))
    }

    pub fn count(&self, behavior: Behavior) -> usize {
        self.entries
            .iter()
            .filter(|(_, e)| e.behavior == behavior)
            .count()
    }

    /// Visit every entry in order, stopping at the first visitor error.
    ///
    /// The visitor's error is returned unchanged.
    pub fn walk<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&str, &DiffEntry) -> Result<(), E>,
    {
        for (path, entry) in &self.entries {
            visit(path, entry)?;
        }
        Ok(())
    }
}

impl<P: Into<String>> FromIterator<(P, DiffEntry)> for Diff {
    fn from_iter<I: IntoIterator<Item = (P, DiffEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(p, e)| (p.into(), e)).collect(),
        }
    }
}
