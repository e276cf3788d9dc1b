//! TOML Manifest Repository
//!
//! Stores the deployment manifest (default `.ferry.lock`) in TOML format and
//! serializes deployments through an exclusive lock on a sibling file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::Manifest;
use crate::domain::ports::ManifestRepository;
use crate::error::{FerryError, FerryResult};

/// TOML representation of the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlManifest {
    version: u32,
    build_count: u64,
    #[serde(default)]
    files: BTreeMap<String, DateTime<Utc>>,
}

/// Held while a deployment runs; releases the lock on drop
#[derive(Debug)]
pub struct ManifestLock {
    file: fs::File,
    path: PathBuf,
}

impl Drop for ManifestLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        debug!(lock = %self.path.display(), "released deploy lock");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlManifestRepository;

impl TomlManifestRepository {
    pub fn new() -> Self {
        Self
    }

    fn lock_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".guard");
        path.with_file_name(name)
    }
}

fn state_error(path: &Path, err: impl std::fmt::Display) -> FerryError {
    FerryError::State {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Parse manifest TOML; `path` only labels errors.
pub fn parse_manifest(content: &str, path: &Path) -> FerryResult<Manifest> {
    let toml_manifest: TomlManifest = toml::from_str(content).map_err(|e| state_error(path, e))?;

    if toml_manifest.version != Manifest::VERSION {
        return Err(state_error(
            path,
            format!(
                "unsupported manifest version {} (expected {})",
                toml_manifest.version,
                Manifest::VERSION
            ),
        ));
    }

    Ok(Manifest::with_parts(
        toml_manifest.build_count,
        toml_manifest.files,
    ))
}

impl ManifestRepository for TomlManifestRepository {
    type Guard = ManifestLock;

    fn lock(&self, path: &Path) -> FerryResult<ManifestLock> {
        let lock_path = Self::lock_path(path);
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| state_error(parent, e))?;
        }

        let file = fs::File::create(&lock_path).map_err(|e| state_error(&lock_path, e))?;
        file.try_lock_exclusive().map_err(|_| {
            state_error(
                path,
                "another deployment holds the lock; wait for it to finish",
            )
        })?;
        debug!(lock = %lock_path.display(), "acquired deploy lock");

        Ok(ManifestLock {
            file,
            path: lock_path,
        })
    }

    fn load(&self, path: &Path) -> FerryResult<Manifest> {
        if !path.exists() {
            return Ok(Manifest::new());
        }

        let content = fs::read_to_string(path).map_err(|e| state_error(path, e))?;
        parse_manifest(&content, path)
    }

    fn save(&self, manifest: &Manifest, path: &Path) -> FerryResult<()> {
        let toml_manifest = TomlManifest {
            version: manifest.version(),
            build_count: manifest.build_count(),
            files: manifest.files().clone(),
        };
        let content = toml::to_string_pretty(&toml_manifest).map_err(|e| state_error(path, e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| state_error(parent, e))?;
        }

        // Write-then-rename so a crash never leaves a truncated manifest.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, content).map_err(|e| state_error(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| state_error(path, e))?;
        Ok(())
    }
}
