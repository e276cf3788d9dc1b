//! VersionControl port - the narrow slice of git the deployer needs
//!
//! Implementations:
//! - `GitCli` - shells out to the `git` binary
//! - test fakes that record calls without a repository on disk

use std::path::Path;

use crate::error::FerryResult;

/// Remote name every push goes to
pub const CANONICAL_REMOTE: &str = "origin";

pub trait VersionControl {
    /// Raw `git branch` listing of the working copy at `repo`
    fn list_branches(&self, repo: &Path) -> FerryResult<String>;

    /// Stage every working-tree change, deletions included
    fn stage_all(&self, repo: &Path) -> FerryResult<()>;

    fn commit(&self, repo: &Path, message: &str) -> FerryResult<()>;

    /// Overwrite `branch` on `remote` with local history
    fn force_push(&self, repo: &Path, remote: &str, branch: &str) -> FerryResult<()>;
}

impl<T: VersionControl + ?Sized> VersionControl for &T {
    fn list_branches(&self, repo: &Path) -> FerryResult<String> {
        (**self).list_branches(repo)
    }

    fn stage_all(&self, repo: &Path) -> FerryResult<()> {
        (**self).stage_all(repo)
    }

    fn commit(&self, repo: &Path, message: &str) -> FerryResult<()> {
        (**self).commit(repo, message)
    }

    fn force_push(&self, repo: &Path, remote: &str, branch: &str) -> FerryResult<()> {
        (**self).force_push(repo, remote, branch)
    }
}
