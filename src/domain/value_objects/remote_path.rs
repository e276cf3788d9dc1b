//! Remote path helpers.
//!
//! Remote paths are POSIX strings regardless of the local platform.

/// `dir` and each of its ancestors, deepest first.
///
/// `""`, `"."` and `"/"` are never returned. Callers that need to create the
/// chain iterate the result in reverse so parents exist before children.
pub fn ancestors(dir: &str) -> Vec<String> {
    let mut dirs = Vec::new();
    let mut current = dir.trim_end_matches('/');
    while !current.is_empty() && current != "." {
        dirs.push(current.to_string());
        current = match current.rfind('/') {
            Some(idx) => current[..idx].trim_end_matches('/'),
            None => "",
        };
    }
    dirs
}

/// Parent directory of a relative entry path, or `""` at the top level
pub fn parent(rel: &str) -> &str {
    rel.rfind('/').map(|idx| &rel[..idx]).unwrap_or("")
}

/// Join a remote root and a relative path
pub fn join(root: &str, rel: &str) -> String {
    let rel = rel.trim_start_matches('/');
    match (root.is_empty(), rel.is_empty()) {
        (true, _) => rel.to_string(),
        (false, true) => root.to_string(),
        (false, false) => format!("{}/{}", root.trim_end_matches('/'), rel),
    }
}
