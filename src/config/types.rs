//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::deploy::{DeploySettings, DEFAULT_COMMIT_MESSAGE};
use crate::error::FerryResult;

use super::loader::{self, ConfigWarning};

/// Manifest location used when none is configured
pub const DEFAULT_STATE_PATH: &str = ".ferry.lock";

/// `[deploy]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Default target, used when none is given on the command line
    #[serde(default)]
    pub target: Option<String>,

    /// Commit message template; `{now}` is replaced with the process start time
    #[serde(default = "default_message")]
    pub message: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            target: None,
            message: default_message(),
        }
    }
}

fn default_message() -> String {
    DEFAULT_COMMIT_MESSAGE.to_string()
}

/// `[remote]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_mtime_resolution")]
    pub mtime_resolution_secs: u64,

    #[serde(default)]
    pub strict_mkdir: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            mtime_resolution_secs: default_mtime_resolution(),
            strict_mkdir: false,
        }
    }
}

fn default_mtime_resolution() -> u64 {
    1
}

/// `[state]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

fn default_state_path() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_PATH)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub state: StateConfig,
}

impl Config {
    /// Load from an explicit file, the project file, the user file, or defaults
    pub fn load_or_default(
        explicit: Option<&Path>,
        project_root: &Path,
    ) -> FerryResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(explicit, project_root)
    }

    /// Backend settings derived from this configuration
    pub fn to_settings(&self) -> DeploySettings {
        DeploySettings::new()
            .with_commit_message(self.deploy.message.clone())
            .with_mtime_resolution(self.remote.mtime_resolution_secs)
            .with_strict_mkdir(self.remote.strict_mkdir)
    }
}
