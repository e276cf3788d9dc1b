//! Infrastructure layer
//!
//! Concrete implementations of the domain ports:
//! - `git`: `VersionControl` via the `git` executable
//! - `sftp`: `RemoteConnector` / `RemoteFileSystem` via libssh2
//! - `repositories`: TOML manifest persistence
//! - `scan`: build directory walker

pub mod git;
pub mod repositories;
pub mod scan;
pub mod sftp;

pub use git::GitCli;
pub use repositories::{ManifestLock, TomlManifestRepository};
pub use scan::scan_build_dir;
pub use sftp::{SftpSession, Ssh2Connector};
