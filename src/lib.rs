//! Ferry - publish a generated static site
//!
//! Ferry takes the output directory of a site generator and publishes it to
//! a deployment target: a git working copy that is committed and
//! force-pushed, or a remote directory reached over SFTP that is brought in
//! line with the build using a per-file diff.
//!
//! ## Layers
//!
//! - `domain`: targets, diffs, the manifest, and the ports the backends use
//! - `application`: the git and SFTP backends and backend selection
//! - `infrastructure`: `git` subprocesses, libssh2 sessions, manifest storage
//! - `config` / `presentation`: configuration loading and the CLI surface

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::deploy::{DeployReport, DeploySettings, Deployer};
pub use config::Config;
pub use domain::entities::{Behavior, Diff, DiffEntry, Manifest, ReplayMode, RunContext};
pub use domain::value_objects::{DeployTarget, TargetKind};
pub use error::{ErrorClass, FerryError, FerryResult};
