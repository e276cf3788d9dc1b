//! Ferry CLI - publish a generated static site
//!
//! Usage: ferry <COMMAND>
//!
//! Commands:
//!   deploy  Publish the build directory to a git or SFTP target
//!   check   Validate a target string without connecting

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use ferry::application::clock::process_start;
use ferry::error::{ErrorClass, FerryError};
use ferry::presentation::{init_tracing, Cli, Commands};

mod commands;

use commands::deploy::DeployArgs;

fn main() -> ExitCode {
    // Pin `{now}` before anything else runs.
    process_start();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            exit_code(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Deploy {
            target,
            dir,
            state,
            full,
        } => commands::cmd_deploy(
            cli.config.as_deref(),
            DeployArgs {
                target,
                dir,
                state,
                full,
                json: cli.json,
            },
        ),
        Commands::Check { target } => commands::cmd_check(&target, cli.json),
    }
}

/// Configuration problems exit with 2, everything else with 1
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<FerryError>().map(FerryError::class) {
        Some(ErrorClass::Configuration) => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}
