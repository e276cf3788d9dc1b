use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use ferry::application::deploy::Deployer;
use ferry::config::{Config, PROJECT_CONFIG_FILE};
use ferry::domain::entities::{Manifest, RunContext};
use ferry::domain::ports::ManifestRepository;
use ferry::error::FerryError;
use ferry::infrastructure::{scan_build_dir, TomlManifestRepository};

/// Flags of `ferry deploy`
#[derive(Debug, Default)]
pub struct DeployArgs {
    pub target: Option<String>,
    pub dir: Option<PathBuf>,
    pub state: Option<PathBuf>,
    pub full: bool,
    pub json: bool,
}

pub fn cmd_deploy(config_path: Option<&Path>, args: DeployArgs) -> Result<()> {
    let project_root = std::env::current_dir()?;
    let (config, warnings) = Config::load_or_default(config_path, &project_root)?;
    for warning in &warnings {
        warn!(
            key = %warning.key,
            file = %warning.file.display(),
            line = ?warning.line,
            suggestion = ?warning.suggestion,
            "unknown configuration key"
        );
    }

    let target = args
        .target
        .or_else(|| config.deploy.target.clone())
        .ok_or_else(|| FerryError::Config {
            file: config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE)),
            message: "no deploy target; pass one or set [deploy] target".to_string(),
        })?;

    let deployer = Deployer::select(&target, &config.to_settings())?;
    let build_dir = args.dir.unwrap_or_else(|| deployer.local_dir());
    let state_path = args.state.unwrap_or_else(|| config.state.path.clone());

    let manifests = TomlManifestRepository::new();
    let _lock = manifests.lock(&state_path)?;
    let manifest = manifests.load(&state_path)?;

    let current = scan_build_dir(&build_dir)?;
    let build_count = if args.full {
        1
    } else {
        manifest.next_build_count()
    };
    let diff = manifest.diff_for(build_count, &current);
    info!(
        backend = deployer.name(),
        build_dir = %build_dir.display(),
        build_count,
        entries = diff.len(),
        "starting deployment"
    );

    let ctx = RunContext::new(&build_dir, build_count, diff);
    let report = deployer.execute(&ctx)?;

    // Only a successful run replaces the manifest, so a retry sees the same diff.
    manifests.save(&Manifest::with_parts(build_count, current), &state_path)?;

    if args.json {
        let output = serde_json::json!({
            "event": "deploy",
            "status": "success",
            "build_count": build_count,
            "report": report,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}: {}", deployer.name(), report.summary());
    }
    Ok(())
}
