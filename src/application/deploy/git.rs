//! Git backend
//!
//! The destination is a working copy. Deploying means: stage everything,
//! commit, and force-push whatever branch is checked out to `origin`.
//! Steps run strictly in order; the first failure aborts and nothing staged
//! or committed is rolled back.

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::application::clock::{format_timestamp, process_start};
use crate::domain::entities::RunContext;
use crate::domain::ports::{VersionControl, CANONICAL_REMOTE};
use crate::domain::value_objects::{GitOptions, TargetKind};
use crate::error::{FerryError, FerryResult};
use crate::infrastructure::git::current_branch;
use crate::infrastructure::GitCli;

use super::options::{DeploySettings, NOW_PLACEHOLDER};
use super::result::DeployReport;

/// Substitute `{now}` in a commit template
pub fn render_commit_message(template: &str, at: &DateTime<Local>) -> String {
    template.replace(NOW_PLACEHOLDER, &format_timestamp(at))
}

pub struct GitDeployer<V = GitCli> {
    options: GitOptions,
    message_template: String,
    vcs: V,
}

impl<V: VersionControl> GitDeployer<V> {
    pub fn new(options: GitOptions, settings: &DeploySettings, vcs: V) -> Self {
        Self {
            options,
            message_template: settings.commit_message.clone(),
            vcs,
        }
    }

    pub fn options(&self) -> &GitOptions {
        &self.options
    }

    /// Commit message for this process; identical for every call
    pub fn commit_message(&self) -> String {
        render_commit_message(&self.message_template, process_start())
    }

    pub fn execute(&self, ctx: &RunContext) -> FerryResult<DeployReport> {
        let repo = ctx.destination_dir();
        if !repo.join(".git").exists() {
            return Err(FerryError::NotARepository {
                path: repo.to_path_buf(),
            });
        }

        let listing = self.vcs.list_branches(repo)?;
        let branch = current_branch(&listing).ok_or_else(|| FerryError::BranchUndetectable {
            path: repo.to_path_buf(),
        })?;
        debug!(%branch, repo = %repo.display(), "detected checked-out branch");

        self.vcs.stage_all(repo)?;
        debug!(%branch, "staged all changes");

        let message = self.commit_message();
        self.vcs.commit(repo, &message)?;
        info!(%branch, %message, "committed");

        self.vcs.force_push(repo, CANONICAL_REMOTE, &branch)?;
        info!(%branch, remote = CANONICAL_REMOTE, "force-pushed");

        let mut report = DeployReport::new(TargetKind::Git);
        report.branch = Some(branch);
        report.commit_message = Some(message);
        Ok(report)
    }
}
