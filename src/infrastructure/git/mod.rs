//! Git command-line adapter.
//!
//! Implements the `VersionControl` port by running the `git` binary inside the
//! working copy. Repository internals are never touched directly.

mod parse;

pub use parse::{current_branch, format_git_error};

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Output};

use tracing::trace;

use crate::domain::ports::VersionControl;
use crate::error::{FerryError, FerryResult};

/// `VersionControl` backed by the `git` executable on `PATH`
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: OsString::from("git"),
        }
    }

    /// Use a specific git executable
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run_git(&self, repo: &Path, step: &str, args: &[&str]) -> FerryResult<Output> {
        trace!(repo = %repo.display(), ?args, "running git");
        let output = Command::new(&self.program)
            .current_dir(repo)
            .args(args)
            .output()
            .map_err(|e| FerryError::Command {
                step: format!("git {}", step),
                message: e.to_string(),
            })?;

        if output.status.success() {
            Ok(output)
        } else {
            Err(FerryError::Command {
                step: format!("git {}", step),
                message: format_git_error(&output),
            })
        }
    }
}

impl VersionControl for GitCli {
    fn list_branches(&self, repo: &Path) -> FerryResult<String> {
        let output = self.run_git(repo, "branch", &["branch"])?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn stage_all(&self, repo: &Path) -> FerryResult<()> {
        self.run_git(repo, "add", &["add", "--all"]).map(drop)
    }

    fn commit(&self, repo: &Path, message: &str) -> FerryResult<()> {
        self.run_git(repo, "commit", &["commit", "-m", message])
            .map(drop)
    }

    fn force_push(&self, repo: &Path, remote: &str, branch: &str) -> FerryResult<()> {
        self.run_git(repo, "push", &["push", "--force", remote, branch])
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_program_is_command_error() {
        let dir = TempDir::new().unwrap();
        let git = GitCli::with_program("ferry-no-such-git-binary");
        let err = git.stage_all(dir.path()).unwrap_err();
        match err {
            FerryError::Command { step, .. } => assert_eq!(step, "git add"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn failing_step_surfaces_stderr() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let fake = dir.path().join("git");
        fs::write(
            &fake,
            "#!/bin/sh\necho \"fatal: unable to access remote\" >&2\nexit 128\n",
        )
        .unwrap();
        fs::set_permissions(&fake, fs::Permissions::from_mode(0o755)).unwrap();

        let git = GitCli::with_program(&fake);
        let err = git.force_push(dir.path(), "origin", "main").unwrap_err();
        assert_eq!(
            err.to_string(),
            "git push failed: fatal: unable to access remote"
        );
    }
}
