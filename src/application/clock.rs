//! Process start time.
//!
//! `{now}` in commit templates is the moment the process started, not the
//! moment of the commit, so every deployment in one process shares it.

use std::sync::OnceLock;

use chrono::{DateTime, Local, SecondsFormat};

static PROCESS_START: OnceLock<DateTime<Local>> = OnceLock::new();

/// Wall-clock time captured on first call; `main` calls this first thing.
pub fn process_start() -> &'static DateTime<Local> {
    PROCESS_START.get_or_init(Local::now)
}

/// RFC 3339 with whole seconds, `Z` for UTC
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
