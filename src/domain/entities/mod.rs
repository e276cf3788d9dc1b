//! Domain entities
//!
//! Per-run data handed to the deploy backends, plus the manifest of the
//! previous deployment.

mod diff;
mod manifest;
mod run_context;

pub use diff::{Behavior, Diff, DiffEntry};
pub(crate) use manifest::normalize_manifest_path;
pub use manifest::Manifest;
pub use run_context::{ReplayMode, RunContext};
