use anyhow::Result;

use ferry::domain::value_objects::DeployTarget;

/// Parse `target` and print it with the password redacted
pub fn cmd_check(target: &str, json: bool) -> Result<()> {
    let parsed = DeployTarget::parse(target)?;

    if json {
        let output = serde_json::json!({
            "event": "check",
            "backend": parsed.kind(),
            "target": parsed.to_string(),
            "build_dir": parsed.local_dir().display().to_string(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("backend: {}", parsed.kind());
        println!("target:  {}", parsed);
        println!("build:   {}", parsed.local_dir().display());
    }
    Ok(())
}
