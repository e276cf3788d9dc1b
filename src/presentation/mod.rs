//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Log subscriber setup for the binary

pub mod cli;
pub mod logging;

pub use cli::{Cli, Commands};
pub use logging::{init_tracing, level_for_verbosity};
