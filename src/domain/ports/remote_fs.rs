//! Remote file system port
//!
//! Abstracts the file-transfer session the sftp backend drives, so the replay
//! algorithms can run against an in-memory fake.

use std::io::Write;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::SftpOptions;
use crate::error::FerryResult;

/// Operations on one open file-transfer session.
///
/// Paths are POSIX strings; relative ones resolve against the login directory.
pub trait RemoteFileSystem {
    /// Create a single directory (parents must exist)
    fn mkdir(&self, path: &str) -> FerryResult<()>;

    /// Delete a file
    fn remove(&self, path: &str) -> FerryResult<()>;

    /// Modification time, or `None` when the path does not exist or can't be stat'd
    fn modified(&self, path: &str) -> Option<DateTime<Utc>>;

    /// Whether `path` exists and is a directory
    fn is_dir(&self, path: &str) -> bool;

    /// Create or truncate a file and return a writer for its content
    fn create(&self, path: &str) -> FerryResult<Box<dyn Write + '_>>;
}

/// Opens sessions.
///
/// The returned session owns the transport; dropping it releases both the
/// transport and the file-transfer layer.
pub trait RemoteConnector {
    type Session: RemoteFileSystem;

    fn connect(&self, options: &SftpOptions) -> FerryResult<Self::Session>;
}
