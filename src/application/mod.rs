//! Application Layer
//!
//! Orchestrates the deployment flow on top of the domain ports.
//!
//! - `deploy` - backend selection and the git / SFTP backends
//! - `clock` - the process start time used in commit messages

pub mod clock;
pub mod deploy;

pub use clock::{format_timestamp, process_start};
pub use deploy::{DeployReport, DeploySettings, Deployer, GitDeployer, SftpDeployer};
