//! Deploy Module
//!
//! Backend selection and the two reconciliation backends.
//!
//! ## Structure
//!
//! - `options` - Shared settings (`DeploySettings`)
//! - `result` - Result type (`DeployReport`)
//! - `git` - Working-copy backend (`GitDeployer`)
//! - `sftp` - Remote file system backend (`SftpDeployer`)
//!
//! ## Usage
//!
//! ```ignore
//! use ferry::application::deploy::{DeploySettings, Deployer};
//!
//! let deployer = Deployer::select("sftp://me:pw@example.org/~/site", &DeploySettings::default())?;
//! let report = deployer.execute(&ctx)?;
//! ```

mod git;
mod options;
mod result;
mod sftp;

pub use git::{render_commit_message, GitDeployer};
pub use options::{DeploySettings, DEFAULT_COMMIT_MESSAGE, NOW_PLACEHOLDER};
pub use result::DeployReport;
pub use sftp::{is_newer, CreatedDirs, SftpDeployer};

use std::path::PathBuf;

use crate::domain::entities::RunContext;
use crate::domain::value_objects::{DeployTarget, TargetKind};
use crate::error::FerryResult;
use crate::infrastructure::{GitCli, Ssh2Connector};

/// A configured backend, ready to execute
pub enum Deployer {
    Git(GitDeployer<GitCli>),
    Sftp(SftpDeployer<Ssh2Connector>),
}

impl Deployer {
    /// Pick and configure the backend for a target string.
    ///
    /// Fails with a configuration error when no backend recognizes the
    /// scheme or the recognized backend rejects the rest of the string.
    pub fn select(conf: &str, settings: &DeploySettings) -> FerryResult<Self> {
        DeployTarget::parse(conf).map(|target| Self::from_target(target, settings))
    }

    pub fn from_target(target: DeployTarget, settings: &DeploySettings) -> Self {
        match target {
            DeployTarget::Git(options) => {
                Deployer::Git(GitDeployer::new(options, settings, GitCli::new()))
            }
            DeployTarget::Sftp(options) => {
                Deployer::Sftp(SftpDeployer::new(options, settings, Ssh2Connector))
            }
        }
    }

    pub fn kind(&self) -> TargetKind {
        match self {
            Deployer::Git(_) => TargetKind::Git,
            Deployer::Sftp(_) => TargetKind::Sftp,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().scheme()
    }

    /// Local directory the build should be written to
    pub fn local_dir(&self) -> PathBuf {
        match self {
            Deployer::Git(git) => DeployTarget::Git(git.options().clone()).local_dir(),
            Deployer::Sftp(sftp) => DeployTarget::Sftp(sftp.options().clone()).local_dir(),
        }
    }

    /// Run one deployment attempt
    pub fn execute(&self, ctx: &RunContext) -> FerryResult<DeployReport> {
        match self {
            Deployer::Git(git) => git.execute(ctx),
            Deployer::Sftp(sftp) => sftp.execute(ctx),
        }
    }
}
