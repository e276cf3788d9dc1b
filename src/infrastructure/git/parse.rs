//! Git output parsing helpers.

use std::process::Output;

/// Text surfaced when a git step fails.
///
/// Whatever git printed on stderr wins; stdout is the fallback (git reports
/// "nothing to commit" there); a bare exit code is the last resort.
pub fn format_git_error(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !stdout.is_empty() {
        return stdout;
    }
    match output.status.code() {
        Some(code) => format!("exited with status {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Branch marked current (`* name`) in `git branch` output.
///
/// A detached HEAD (`* (HEAD detached at 1a2b3c)`) is not a branch and yields `None`.
pub fn current_branch(listing: &str) -> Option<String> {
    listing
        .lines()
        .find_map(|line| line.strip_prefix('*'))
        .map(str::trim)
        .filter(|name| !name.is_empty() && !name.starts_with('('))
        .and_then(|name| name.split_whitespace().last())
        .map(str::to_string)
}
