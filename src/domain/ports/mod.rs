//! Domain ports - interfaces implemented by the infrastructure layer

mod manifest_repository;
mod remote_fs;
mod vcs;

pub use manifest_repository::ManifestRepository;
pub use remote_fs::{RemoteConnector, RemoteFileSystem};
pub use vcs::{VersionControl, CANONICAL_REMOTE};
