//! Configuration module for Ferry
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (FERRY_*)
//! 3. `--config <file>`, or project config (./ferry.toml), or user config
//!    (<config dir>/ferry/config.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_or_default, parse_with_warnings, user_config_path, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{Config, DeployConfig, RemoteConfig, StateConfig, DEFAULT_STATE_PATH};
