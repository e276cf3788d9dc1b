//! Error types for Ferry
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Ferry operations
pub type FerryResult<T> = Result<T, FerryError>;

/// Remote operation that failed, for `FerryError::RemoteIo`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOp {
    Mkdir,
    Remove,
    Stat,
    Create,
    Write,
}

impl fmt::Display for RemoteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RemoteOp::Mkdir => "mkdir",
            RemoteOp::Remove => "remove",
            RemoteOp::Stat => "stat",
            RemoteOp::Create => "create",
            RemoteOp::Write => "write",
        };
        f.write_str(name)
    }
}

/// Coarse error taxonomy, used by the CLI to pick exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Configuration,
    RepositoryState,
    Process,
    Transport,
    RemoteIo,
    LocalIo,
    State,
}

/// Main error type for Ferry operations
#[derive(Error, Debug)]
pub enum FerryError {
    /// No backend recognizes the target string's scheme
    #[error("unrecognized deploy target '{target}'")]
    UnrecognizedTarget { target: String },

    /// Scheme recognized, but the remainder is malformed
    #[error("invalid {backend} deploy target: {message}")]
    InvalidTarget {
        backend: &'static str,
        message: String,
    },

    /// Configuration file could not be read or parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Destination lacks a `.git` directory
    #[error("destination directory is not a git repository: {path}")]
    NotARepository { path: PathBuf },

    /// `git branch` reported no checked-out branch
    #[error("can not read the checked-out branch of {path}")]
    BranchUndetectable { path: PathBuf },

    /// A subordinate process failed; `message` is its diagnostic text when it had any
    #[error("{step} failed: {message}")]
    Command { step: String, message: String },

    /// SSH connection, handshake or authentication failure
    #[error("ssh transport to {address} failed: {message}")]
    Transport { address: String, message: String },

    /// Remote create/delete/stat/write failure
    #[error("remote {op} failed for {path}: {message}")]
    RemoteIo {
        op: RemoteOp,
        path: String,
        message: String,
    },

    /// Local source file could not be opened or read
    #[error("local file {path}: {source}")]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Deployment manifest could not be loaded, saved or locked
    #[error("deployment state {path}: {message}")]
    State { path: PathBuf, message: String },
}

impl FerryError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::UnrecognizedTarget { .. } | Self::InvalidTarget { .. } | Self::Config { .. } => {
                ErrorClass::Configuration
            }
            Self::NotARepository { .. } | Self::BranchUndetectable { .. } => {
                ErrorClass::RepositoryState
            }
            Self::Command { .. } => ErrorClass::Process,
            Self::Transport { .. } => ErrorClass::Transport,
            Self::RemoteIo { .. } => ErrorClass::RemoteIo,
            Self::LocalIo { .. } => ErrorClass::LocalIo,
            Self::State { .. } => ErrorClass::State,
        }
    }

    pub(crate) fn remote(op: RemoteOp, path: &str, err: impl fmt::Display) -> Self {
        Self::RemoteIo {
            op,
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn invalid_target(backend: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            backend,
            message: message.into(),
        }
    }
}
