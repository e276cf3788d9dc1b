//! Manifest entity - what the previous successful deployment shipped
//!
//! It's a pure data structure - I/O is handled by the manifest repository.
//! The manifest doubles as the diff supplier for the CLI: comparing it with a
//! scan of the current build yields the per-run `Diff`.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};

use super::diff::{Behavior, Diff, DiffEntry};
use super::run_context::ReplayMode;

/// Normalize a path for manifest storage (always use forward slashes).
pub(crate) fn normalize_manifest_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Snapshot of the last deployed build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    version: u32,
    build_count: u64,
    files: BTreeMap<String, DateTime<Utc>>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

impl Manifest {
    pub const VERSION: u32 = 1;

    /// Empty manifest: nothing deployed yet
    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            build_count: 0,
            files: BTreeMap::new(),
        }
    }

    /// Manifest describing a successful deployment of `files`
    pub fn with_parts(build_count: u64, files: BTreeMap<String, DateTime<Utc>>) -> Self {
        Self {
            version: Self::VERSION,
            build_count,
            files,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn build_count(&self) -> u64 {
        self.build_count
    }

    pub fn files(&self) -> &BTreeMap<String, DateTime<Utc>> {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Build counter for the next attempt
    pub fn next_build_count(&self) -> u64 {
        self.build_count.saturating_add(1)
    }

    /// Diff the current build against this manifest, in lexical path order.
    ///
    /// With an empty manifest every path is an `Add` and no `Remove` is ever
    /// produced, so a first deployment never deletes anything.
    pub fn diff_against(&self, current: &BTreeMap<String, DateTime<Utc>>) -> Diff {
        let mut paths: Vec<&String> = self.files.keys().chain(current.keys()).collect();
        paths.sort();
        paths.dedup();

        let mut diff = Diff::new();
        for path in paths {
            match (self.files.get(path), current.get(path)) {
                (None, Some(mtime)) => diff.push(path.clone(), DiffEntry::new(Behavior::Add, *mtime)),
                (Some(_), Some(mtime)) => {
                    diff.push(path.clone(), DiffEntry::new(Behavior::Keep, *mtime))
                }
                (Some(old), None) => {
                    diff.push(path.clone(), DiffEntry::new(Behavior::Remove, *old))
                }
                (None, None) => {}
            }
        }
        diff
    }

    /// Diff for a run numbered `build_count`.
    ///
    /// A full replay starts from nothing, so it never carries a `Remove`
    /// even when an older deployment left paths behind.
    pub fn diff_for(&self, build_count: u64, current: &BTreeMap<String, DateTime<Utc>>) -> Diff {
        match ReplayMode::for_build(build_count) {
            ReplayMode::Full => Manifest::new().diff_against(current),
            ReplayMode::Differential => self.diff_against(current),
        }
    }
}
