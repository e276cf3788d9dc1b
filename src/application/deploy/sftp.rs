//! SFTP backend
//!
//! Replays the build diff against a remote directory over one SFTP session.
//!
//! - Full replay (fewer than two builds): every entry is written or deleted.
//!   Ancestor directories are created once per run, tracked in `CreatedDirs`.
//! - Differential replay: `Keep` entries the remote already has at least as
//!   fresh are skipped; ancestor directories are re-ensured per file.
//!
//! Entries are processed one at a time in diff order. The first failure
//! aborts the walk; whatever was already applied stays applied.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info, trace};

use crate::domain::entities::{Behavior, DiffEntry, ReplayMode, RunContext};
use crate::domain::ports::{RemoteConnector, RemoteFileSystem};
use crate::domain::value_objects::{remote_path, SftpOptions, TargetKind};
use crate::error::{FerryError, FerryResult, RemoteOp};
use crate::infrastructure::Ssh2Connector;

use super::options::DeploySettings;
use super::result::DeployReport;

const COPY_BUFFER_SIZE: usize = 32 * 1024;

/// Directories already handled during one full replay.
///
/// Owned by a single replay call; never shared between attempts.
#[derive(Debug, Default)]
pub struct CreatedDirs {
    dirs: HashSet<String>,
}

impl CreatedDirs {
    /// `true` the first time `dir` is seen
    pub fn first_visit(&mut self, dir: &str) -> bool {
        self.dirs.insert(dir.to_string())
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// Whether a local modification time beats the remote one.
///
/// Both sides are truncated to `resolution_secs` so sub-resolution
/// differences compare equal.
pub fn is_newer(local: DateTime<Utc>, remote: DateTime<Utc>, resolution_secs: u64) -> bool {
    let resolution = i64::try_from(resolution_secs.max(1)).unwrap_or(i64::MAX);
    local.timestamp().div_euclid(resolution) > remote.timestamp().div_euclid(resolution)
}

pub struct SftpDeployer<C = Ssh2Connector> {
    options: SftpOptions,
    mtime_resolution_secs: u64,
    strict_mkdir: bool,
    connector: C,
}

impl<C: RemoteConnector> SftpDeployer<C> {
    pub fn new(options: SftpOptions, settings: &DeploySettings, connector: C) -> Self {
        Self {
            options,
            mtime_resolution_secs: settings.mtime_resolution_secs,
            strict_mkdir: settings.strict_mkdir,
            connector,
        }
    }

    pub fn options(&self) -> &SftpOptions {
        &self.options
    }

    pub fn execute(&self, ctx: &RunContext) -> FerryResult<DeployReport> {
        // Dropped on every return path, closing the channel and the transport.
        let session = self.connector.connect(&self.options)?;
        info!(address = %self.options.address, "connected");

        self.prime_root(&session);

        let mode = ctx.replay_mode();
        info!(
            mode = mode.as_str(),
            build_count = ctx.build_count(),
            entries = ctx.diff().len(),
            "replaying diff"
        );

        let mut report = DeployReport::new(TargetKind::Sftp).with_mode(mode);
        match mode {
            ReplayMode::Full => self.replay_full(&session, ctx, &mut report)?,
            ReplayMode::Differential => self.replay_differential(&session, ctx, &mut report)?,
        }

        info!(
            uploaded = report.uploaded.len(),
            deleted = report.deleted.len(),
            skipped = report.skipped.len(),
            "deployment finished"
        );
        Ok(report)
    }

    /// Best effort: create the remote root and its ancestors, ignoring failures.
    fn prime_root(&self, fs: &impl RemoteFileSystem) {
        for dir in remote_path::ancestors(&self.options.directory).iter().rev() {
            if let Err(err) = fs.mkdir(dir) {
                trace!(dir = %dir, error = %err, "root mkdir failed; assuming it exists");
            }
        }
    }

    pub fn replay_full(
        &self,
        fs: &impl RemoteFileSystem,
        ctx: &RunContext,
        report: &mut DeployReport,
    ) -> FerryResult<()> {
        let mut created = CreatedDirs::default();
        ctx.diff().walk(|rel, entry| {
            let target = self.remote_target(rel);
            if entry.is_remove() {
                return self.delete(fs, rel, &target, report);
            }

            for dir in remote_path::ancestors(remote_path::parent(rel)).iter().rev() {
                if created.first_visit(dir) {
                    self.ensure_dir(fs, &self.remote_target(dir))?;
                }
            }
            self.upload(fs, ctx, rel, &target, report)
        })?;
        debug!(dirs = created.len(), "full replay done");
        Ok(())
    }

    pub fn replay_differential(
        &self,
        fs: &impl RemoteFileSystem,
        ctx: &RunContext,
        report: &mut DeployReport,
    ) -> FerryResult<()> {
        ctx.diff().walk(|rel, entry| {
            let target = self.remote_target(rel);
            match entry.behavior {
                Behavior::Remove => return self.delete(fs, rel, &target, report),
                Behavior::Keep if self.is_current(fs, &target, entry) => {
                    debug!(file = rel, "unchanged, skipping");
                    report.skipped.push(rel.to_string());
                    return Ok(());
                }
                Behavior::Keep | Behavior::Add => {}
            }

            for dir in remote_path::ancestors(remote_path::parent(rel)).iter().rev() {
                self.ensure_dir(fs, &self.remote_target(dir))?;
            }
            self.upload(fs, ctx, rel, &target, report)
        })
    }

    fn remote_target(&self, rel: &str) -> String {
        remote_path::join(&self.options.directory, rel)
    }

    /// Remote copy exists and the entry is not strictly newer
    fn is_current(&self, fs: &impl RemoteFileSystem, target: &str, entry: &DiffEntry) -> bool {
        match fs.modified(target) {
            Some(remote) => !is_newer(entry.mod_time, remote, self.mtime_resolution_secs),
            None => false,
        }
    }

    fn ensure_dir(&self, fs: &impl RemoteFileSystem, dir: &str) -> FerryResult<()> {
        match fs.mkdir(dir) {
            Ok(()) => {
                trace!(dir, "created remote directory");
                Ok(())
            }
            Err(err) if !self.strict_mkdir => {
                trace!(dir, error = %err, "mkdir failed; assuming it exists");
                Ok(())
            }
            Err(err) => {
                if fs.is_dir(dir) {
                    Ok(())
                } else {
                    Err(err)
                }
            }
        }
    }

    fn delete(
        &self,
        fs: &impl RemoteFileSystem,
        rel: &str,
        target: &str,
        report: &mut DeployReport,
    ) -> FerryResult<()> {
        if let Err(err) = fs.remove(target) {
            // Already gone, e.g. deleted by an earlier attempt that failed later on.
            if fs.modified(target).is_some() || fs.is_dir(target) {
                return Err(err);
            }
            debug!(file = rel, "already absent remotely");
        } else {
            debug!(file = rel, "deleted");
        }
        report.deleted.push(rel.to_string());
        Ok(())
    }

    fn upload(
        &self,
        fs: &impl RemoteFileSystem,
        ctx: &RunContext,
        rel: &str,
        target: &str,
        report: &mut DeployReport,
    ) -> FerryResult<()> {
        let local = ctx.local_path(rel);
        let mut source = File::open(&local).map_err(|source| FerryError::LocalIo {
            path: local.clone(),
            source,
        })?;
        let mut sink = fs.create(target)?;
        let bytes = stream_copy(&mut source, &mut sink, &local, target)?;
        drop(sink);

        debug!(file = rel, bytes, "uploaded");
        report.uploaded.push(rel.to_string());
        Ok(())
    }
}

/// Copy `source` into `sink`, attributing read errors to the local file and
/// write errors to the remote one.
fn stream_copy(
    source: &mut impl Read,
    sink: &mut dyn Write,
    local: &Path,
    target: &str,
) -> FerryResult<u64> {
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(FerryError::LocalIo {
                    path: local.to_path_buf(),
                    source,
                })
            }
        };
        sink.write_all(&buf[..n])
            .map_err(|e| FerryError::remote(RemoteOp::Write, target, e))?;
        total += n as u64;
    }
    sink.flush()
        .map_err(|e| FerryError::remote(RemoteOp::Write, target, e))?;
    Ok(total)
}
