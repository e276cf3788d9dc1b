//! Common test utilities for Ferry CLI tests.
//!
//! `TestEnv` gives each test its own project directory and config home, and
//! runs the `ferry` binary with `FERRY_*` variables stripped so the host
//! environment cannot leak in.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a Ferry CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Isolated project and config directories
pub struct TestEnv {
    pub project_root: TempDir,
    pub config_home: TempDir,
    /// Directory prepended to `PATH` for fake tools
    pub bin_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let project_root = tempfile::tempdir().unwrap();
        let config_home = tempfile::tempdir().unwrap();
        let bin_dir = config_home.path().join("bin");
        fs::create_dir_all(&bin_dir).unwrap();
        Self {
            project_root,
            config_home,
            bin_dir,
        }
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let original_path = std::env::var("PATH").unwrap_or_default();
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_ferry"));
        cmd.args(args)
            .current_dir(self.project_root.path())
            .env("PATH", format!("{}:{}", self.bin_dir.display(), original_path))
            .env("HOME", self.config_home.path())
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env_remove("RUST_LOG")
            .env_remove("FERRY_TARGET")
            .env_remove("FERRY_COMMIT_MESSAGE")
            .env_remove("FERRY_STRICT_MKDIR")
            .env_remove("FERRY_MTIME_RESOLUTION");
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().unwrap();
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Install an executable shell script as `bin_dir/<name>`
    #[cfg(unix)]
    pub fn install_tool(&self, name: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin_dir.join(name);
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}
