//! Run context for one deployment attempt.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::diff::Diff;

/// Everything a backend needs from the build pipeline for one attempt.
///
/// Created fresh per attempt and read-only to the backends.
#[derive(Debug, Clone)]
pub struct RunContext {
    destination_dir: PathBuf,
    build_count: u64,
    diff: Diff,
}

impl RunContext {
    pub fn new(destination_dir: impl Into<PathBuf>, build_count: u64, diff: Diff) -> Self {
        Self {
            destination_dir: destination_dir.into(),
            build_count,
            diff,
        }
    }

    /// Local directory holding the generated tree
    pub fn destination_dir(&self) -> &Path {
        &self.destination_dir
    }

    pub fn build_count(&self) -> u64 {
        self.build_count
    }

    pub fn diff(&self) -> &Diff {
        &self.diff
    }

    pub fn replay_mode(&self) -> ReplayMode {
        ReplayMode::for_build(self.build_count)
    }

    /// Absolute local path of a diff entry
    pub fn local_path(&self, rel: &str) -> PathBuf {
        self.destination_dir.join(rel)
    }
}

/// How much prior remote state a backend may trust
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayMode {
    /// Replay every entry
    Full,
    /// Skip entries the remote already has
    Differential,
}

impl ReplayMode {
    /// Fewer than two builds means there is no trustworthy previous deployment.
    pub fn for_build(build_count: u64) -> Self {
        if build_count < 2 {
            ReplayMode::Full
        } else {
            ReplayMode::Differential
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReplayMode::Full => "full",
            ReplayMode::Differential => "differential",
        }
    }
}
