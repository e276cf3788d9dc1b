//! Deploy Result
//!
//! What a successful deployment attempt did.

use serde::Serialize;

use crate::domain::entities::ReplayMode;
use crate::domain::value_objects::TargetKind;

/// Result of a deploy operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployReport {
    pub backend: TargetKind,
    /// Replay mode, for the sftp backend
    pub mode: Option<ReplayMode>,
    /// Remote paths written
    pub uploaded: Vec<String>,
    /// Remote paths deleted
    pub deleted: Vec<String>,
    /// Entries the remote already had
    pub skipped: Vec<String>,
    /// Branch pushed, for the git backend
    pub branch: Option<String>,
    /// Commit message used, for the git backend
    pub commit_message: Option<String>,
}

impl DeployReport {
    pub fn new(backend: TargetKind) -> Self {
        Self {
            backend,
            mode: None,
            uploaded: Vec::new(),
            deleted: Vec::new(),
            skipped: Vec::new(),
            branch: None,
            commit_message: None,
        }
    }

    pub fn with_mode(mut self, mode: ReplayMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        match (&self.branch, self.mode) {
            (Some(branch), _) => format!(
                "pushed '{}' ({})",
                branch,
                self.commit_message.as_deref().unwrap_or_default()
            ),
            (None, mode) => format!(
                "{} replay: {} uploaded, {} deleted, {} unchanged",
                mode.unwrap_or(ReplayMode::Full).as_str(),
                self.uploaded.len(),
                self.deleted.len(),
                self.skipped.len()
            ),
        }
    }
}
