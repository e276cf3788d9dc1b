//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{FerryError, FerryResult};

use super::types::Config;

/// Project configuration file, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "ferry.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> FerryResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| FerryError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_with_warnings(&content, path)
}

/// Parse TOML text; `path` only labels errors and warnings.
pub fn parse_with_warnings(content: &str, path: &Path) -> FerryResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| FerryError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve configuration: explicit file, then `./ferry.toml`, then the user
/// config file, then defaults. Environment overrides apply on top.
///
/// A file that exists but does not parse is an error, not a fallback.
pub fn load_or_default(
    explicit: Option<&Path>,
    project_root: &Path,
) -> FerryResult<(Config, Vec<ConfigWarning>)> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let project = project_root.join(PROJECT_CONFIG_FILE);
            if project.is_file() {
                Some(project)
            } else {
                user_config_path().filter(|p| p.is_file())
            }
        }
    };

    let (config, warnings) = match candidate {
        Some(path) => {
            debug!(config = %path.display(), "loading configuration");
            load_with_warnings(&path)?
        }
        None => (Config::default(), Vec::new()),
    };

    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (FERRY_* prefix)
fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

pub(crate) fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    // FERRY_TARGET
    if let Some(target) = var("FERRY_TARGET").filter(|t| !t.trim().is_empty()) {
        config.deploy.target = Some(target);
    }

    // FERRY_COMMIT_MESSAGE
    if let Some(message) = var("FERRY_COMMIT_MESSAGE") {
        config.deploy.message = message;
    }

    // FERRY_STRICT_MKDIR
    if let Some(val) = var("FERRY_STRICT_MKDIR") {
        config.remote.strict_mkdir = val.to_lowercase() != "false" && val != "0";
    }

    // FERRY_MTIME_RESOLUTION
    if let Some(val) = var("FERRY_MTIME_RESOLUTION") {
        match val.trim().parse() {
            Ok(secs) => config.remote.mtime_resolution_secs = secs,
            Err(_) => warn!(value = %val, "ignoring invalid FERRY_MTIME_RESOLUTION"),
        }
    }

    config
}

/// `<user config dir>/ferry/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ferry").join("config.toml"))
}

/// Line of `key = ...` (or a `[key]` table header), 1-based
fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| defines_key(line.trim_start(), key))
        .map(|i| i + 1)
}

fn defines_key(line: &str, key: &str) -> bool {
    if let Some(header) = line.strip_prefix('[') {
        let name = header
            .trim_start_matches('[')
            .split(']')
            .next()
            .unwrap_or_default()
            .trim();
        return name.rsplit('.').next() == Some(key);
    }
    let bare = line
        .strip_prefix('"')
        .and_then(|rest| rest.strip_prefix(key))
        .and_then(|rest| rest.strip_prefix('"'))
        .or_else(|| line.strip_prefix(key));
    bare.is_some_and(|rest| rest.trim_start().starts_with('='))
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "deploy",
        "target",
        "message",
        "remote",
        "mtime_resolution_secs",
        "strict_mkdir",
        "state",
        "path",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
