//! Deploy Options
//!
//! Settings shared by the backends, resolved once from configuration.

/// Commit template used when none is configured
pub const DEFAULT_COMMIT_MESSAGE: &str = "Site Updated at {now}";

/// Placeholder substituted with the process start time
pub const NOW_PLACEHOLDER: &str = "{now}";

/// Options for a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploySettings {
    /// Commit message template for the git backend
    pub commit_message: String,
    /// Granularity, in seconds, of the skip-if-unchanged comparison
    pub mtime_resolution_secs: u64,
    /// Only ignore ancestor mkdir failures when the directory turns out to exist
    pub strict_mkdir: bool,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            mtime_resolution_secs: 1,
            strict_mkdir: false,
        }
    }
}

impl DeploySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commit_message(mut self, template: impl Into<String>) -> Self {
        self.commit_message = template.into();
        self
    }

    pub fn with_mtime_resolution(mut self, secs: u64) -> Self {
        self.mtime_resolution_secs = secs;
        self
    }

    pub fn with_strict_mkdir(mut self, strict: bool) -> Self {
        self.strict_mkdir = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = DeploySettings::default();
        assert_eq!(settings.commit_message, "Site Updated at {now}");
        assert_eq!(settings.mtime_resolution_secs, 1);
        assert!(!settings.strict_mkdir);
    }

    #[test]
    fn builder_methods() {
        let settings = DeploySettings::new()
            .with_commit_message("deploy {now}")
            .with_mtime_resolution(2)
            .with_strict_mkdir(true);
        assert_eq!(settings.commit_message, "deploy {now}");
        assert_eq!(settings.mtime_resolution_secs, 2);
        assert!(settings.strict_mkdir);
    }
}
