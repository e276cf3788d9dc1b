//! Command handlers for the `ferry` binary

pub mod check;
pub mod deploy;

pub use check::cmd_check;
pub use deploy::cmd_deploy;
