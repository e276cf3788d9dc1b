//! Deploy target value object - parsed form of a target string.
//!
//! Target strings carry a scheme prefix that picks the backend:
//!
//! - `git://<path-to-working-copy>`
//! - `sftp://<user>:<password>@<host>[:port][/remote/path]`
//!
//! Backends are matched in a fixed order (`TargetKind::ALL`), so selection is
//! deterministic for every input.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use std::str::FromStr;

use crate::error::{FerryError, FerryResult};

/// Port used when an sftp target omits one
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Build directory for a remote path without a basename (the home directory)
const CURRENT_DIR: &str = ".";

/// The fixed set of backend kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Git,
    Sftp,
}

impl TargetKind {
    /// Registration order used for selection
    pub const ALL: [TargetKind; 2] = [TargetKind::Git, TargetKind::Sftp];

    pub fn scheme(&self) -> &'static str {
        match self {
            TargetKind::Git => "git",
            TargetKind::Sftp => "sftp",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            TargetKind::Git => "git://",
            TargetKind::Sftp => "sftp://",
        }
    }

    /// Whether `conf` carries this kind's scheme prefix
    pub fn matches(&self, conf: &str) -> bool {
        conf.starts_with(self.prefix())
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// Options for the git backend.
///
/// There is deliberately no branch here: the backend pushes whatever branch
/// is checked out in the working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOptions {
    pub directory: PathBuf,
}

/// Options for the sftp backend
#[derive(Clone, PartialEq, Eq)]
pub struct SftpOptions {
    pub user: String,
    pub password: String,
    /// `host:port`
    pub address: String,
    /// Remote root; relative paths resolve against the login directory
    pub directory: String,
    /// Root was written as `/~/...`
    pub home_relative: bool,
}

impl fmt::Debug for SftpOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SftpOptions")
            .field("user", &self.user)
            .field("password", &"***")
            .field("address", &self.address)
            .field("directory", &self.directory)
            .field("home_relative", &self.home_relative)
            .finish()
    }
}

/// A parsed deploy target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployTarget {
    Git(GitOptions),
    Sftp(SftpOptions),
}

impl DeployTarget {
    /// Select the first backend whose scheme prefix matches, then parse the rest.
    pub fn parse(conf: &str) -> FerryResult<Self> {
        let conf = conf.trim();
        for kind in TargetKind::ALL {
            if let Some(rest) = conf.strip_prefix(kind.prefix()) {
                return match kind {
                    TargetKind::Git => parse_git(rest).map(DeployTarget::Git),
                    TargetKind::Sftp => parse_sftp(rest).map(DeployTarget::Sftp),
                };
            }
        }
        Err(FerryError::UnrecognizedTarget {
            target: redact(conf),
        })
    }

    pub fn kind(&self) -> TargetKind {
        match self {
            DeployTarget::Git(_) => TargetKind::Git,
            DeployTarget::Sftp(_) => TargetKind::Sftp,
        }
    }

    /// Local directory the build should be written to for this target
    pub fn local_dir(&self) -> PathBuf {
        match self {
            DeployTarget::Git(opts) => opts.directory.clone(),
            DeployTarget::Sftp(opts) => Path::new(&opts.directory)
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(CURRENT_DIR)),
        }
    }
}

impl FromStr for DeployTarget {
    type Err = FerryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DeployTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployTarget::Git(opts) => write!(f, "git://{}", opts.directory.display()),
            DeployTarget::Sftp(opts) => {
                write!(f, "sftp://{}:***@{}", opts.user, opts.address)?;
                match (opts.home_relative, opts.directory.is_empty()) {
                    (true, true) => write!(f, "/~"),
                    (true, false) => write!(f, "/~/{}", opts.directory),
                    (false, true) => Ok(()),
                    (false, false) => write!(f, "{}", opts.directory),
                }
            }
        }
    }
}

fn parse_git(rest: &str) -> FerryResult<GitOptions> {
    if rest.is_empty() {
        return Err(FerryError::invalid_target(
            "git",
            "expected git://<repository-directory>",
        ));
    }
    Ok(GitOptions {
        directory: PathBuf::from(rest),
    })
}

fn parse_sftp(rest: &str) -> FerryResult<SftpOptions> {
    let parts: Vec<&str> = rest.split('@').collect();
    if parts.len() != 2 {
        return Err(FerryError::invalid_target(
            "sftp",
            "expected sftp://<user>:<password>@<host>[:port][/path]",
        ));
    }
    let creds: Vec<&str> = parts[0].split(':').collect();
    if creds.len() != 2 {
        return Err(FerryError::invalid_target(
            "sftp",
            "credentials must be <user>:<password>",
        ));
    }
    if creds[0].is_empty() {
        return Err(FerryError::invalid_target("sftp", "user must not be empty"));
    }

    let (host_port, path) = match parts[1].find('/') {
        Some(idx) => parts[1].split_at(idx),
        None => (parts[1], ""),
    };
    let address = normalize_address(host_port)?;

    // Only `/~` and `/~/...` name the home directory; `/~foo` is a literal path.
    let (directory, home_relative) = if path == "/~" {
        (String::new(), true)
    } else if let Some(home) = path.strip_prefix("/~/") {
        (home.trim_start_matches('/').to_string(), true)
    } else {
        (path.to_string(), false)
    };

    Ok(SftpOptions {
        user: creds[0].to_string(),
        password: creds[1].to_string(),
        address,
        directory,
        home_relative,
    })
}

/// `host` -> `host:22`; validates an explicit port.
fn normalize_address(host_port: &str) -> FerryResult<String> {
    if host_port.is_empty() {
        return Err(FerryError::invalid_target("sftp", "host must not be empty"));
    }

    // `[::1]:2222` / `[::1]`
    let port_sep = if host_port.starts_with('[') {
        host_port.find("]:").map(|i| i + 1)
    } else {
        host_port.rfind(':')
    };

    match port_sep {
        Some(idx) => {
            let (host, port) = (&host_port[..idx], &host_port[idx + 1..]);
            if host.is_empty() {
                return Err(FerryError::invalid_target("sftp", "host must not be empty"));
            }
            port.parse::<u16>().map_err(|_| {
                FerryError::invalid_target("sftp", format!("invalid port '{}'", port))
            })?;
            Ok(host_port.to_string())
        }
        None => Ok(format!("{}:{}", host_port, DEFAULT_SSH_PORT)),
    }
}

/// Hide credentials before echoing a target string back
fn redact(conf: &str) -> String {
    match (conf.find("://"), conf.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &conf[..scheme_end], &conf[at..])
        }
        _ => conf.to_string(),
    }
}
