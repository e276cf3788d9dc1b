//! Build directory scanning
//!
//! Produces the `path -> modification time` view of the current build that
//! the manifest diffs against.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use ignore::WalkBuilder;

use crate::domain::entities::normalize_manifest_path;
use crate::error::{FerryError, FerryResult};

/// Version-control metadata is never part of the published tree
const SKIPPED_DIRS: &[&str] = &[".git"];

/// Every regular file under `root`, keyed by its forward-slash relative path.
///
/// No ignore files are honored: the build output is published as-is.
pub fn scan_build_dir(root: &Path) -> FerryResult<BTreeMap<String, DateTime<Utc>>> {
    if !root.is_dir() {
        return Err(FerryError::LocalIo {
            path: root.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "build directory not found"),
        });
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry| {
            !SKIPPED_DIRS
                .iter()
                .any(|skip| entry.file_name() == *skip)
        })
        .build();

    let mut files = BTreeMap::new();
    for result in walker {
        let entry = result.map_err(|e| walk_error(root, e))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        let modified = entry
            .metadata()
            .map_err(|e| walk_error(path, e))?
            .modified()
            .map_err(|source| FerryError::LocalIo {
                path: path.to_path_buf(),
                source,
            })?;

        let rel = path.strip_prefix(root).unwrap_or(path);
        files.insert(normalize_manifest_path(rel), DateTime::<Utc>::from(modified));
    }

    Ok(files)
}

fn walk_error(path: &Path, err: ignore::Error) -> FerryError {
    let message = err.to_string();
    FerryError::LocalIo {
        path: path.to_path_buf(),
        source: err
            .into_io_error()
            .unwrap_or_else(|| io::Error::other(message)),
    }
}
