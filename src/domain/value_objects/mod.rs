//! Value objects

pub mod remote_path;
mod target;

pub use target::{DeployTarget, GitOptions, SftpOptions, TargetKind, DEFAULT_SSH_PORT};
