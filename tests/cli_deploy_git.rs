//! End-to-end git deployments.
//!
//! A fake `git` on PATH logs its arguments, so no real repository or remote
//! is needed.

#![cfg(unix)]

mod common;

use common::{read, TestEnv};

const FAKE_GIT: &str = r#"#!/bin/sh
echo "$@" >> "$FAKE_GIT_LOG"
if [ "$1" = "${FAKE_GIT_FAIL:-}" ]; then
  echo "fatal: $1 refused by fake remote" >&2
  exit 1
fi
if [ "$1" = "branch" ]; then
  printf '  old\n* %s\n' "${FAKE_GIT_BRANCH:-main}"
fi
exit 0
"#;

fn git_env() -> TestEnv {
    let env = TestEnv::new();
    env.install_tool("git", FAKE_GIT);
    std::fs::create_dir_all(env.project_path("site/.git")).unwrap();
    env.write_file("site/index.html", "<h1>hello</h1>");
    env.write_file("site/posts/first.html", "first");
    env
}

#[test]
fn test_deploy_git_stages_commits_and_force_pushes() {
    let env = git_env();
    let log = env.project_path("git.log");

    let result = env.run_with_env(
        &["deploy", "git://site"],
        &[("FAKE_GIT_LOG", log.to_str().unwrap())],
    );

    assert!(result.success, "stderr:\n{}", result.stderr);
    let calls: Vec<String> = read(&log).lines().map(str::to_string).collect();
    assert_eq!(calls.len(), 4, "calls: {:?}", calls);
    assert_eq!(calls[0], "branch");
    assert_eq!(calls[1], "add --all");
    assert!(calls[2].starts_with("commit -m Site Updated at "));
    assert!(!calls[2].contains("{now}"));
    assert_eq!(calls[3], "push --force origin main");
    assert!(result.stdout.contains("git: pushed 'main'"));
}

#[test]
fn test_deploy_git_writes_manifest_on_success() {
    let env = git_env();
    let log = env.project_path("git.log");

    let result = env.run_with_env(
        &["deploy", "git://site"],
        &[("FAKE_GIT_LOG", log.to_str().unwrap())],
    );
    assert!(result.success, "stderr:\n{}", result.stderr);

    let manifest = read(&env.project_path(".ferry.lock"));
    assert!(manifest.contains("build_count = 1"), "manifest:\n{}", manifest);
    assert!(manifest.contains("\"index.html\""));
    assert!(manifest.contains("\"posts/first.html\""));
    assert!(!manifest.contains(".git"));

    let again = env.run_with_env(
        &["deploy", "git://site"],
        &[("FAKE_GIT_LOG", log.to_str().unwrap())],
    );
    assert!(again.success, "stderr:\n{}", again.stderr);
    assert!(read(&env.project_path(".ferry.lock")).contains("build_count = 2"));
}

#[test]
fn test_deploy_git_uses_configured_target_and_message() {
    let env = git_env();
    let log = env.project_path("git.log");
    env.write_file(
        "ferry.toml",
        "[deploy]\ntarget = \"git://site\"\nmessage = \"Publish\"\n\n[state]\npath = \"state/site.lock\"\n",
    );

    let result = env.run_with_env(
        &["deploy"],
        &[
            ("FAKE_GIT_LOG", log.to_str().unwrap()),
            ("FAKE_GIT_BRANCH", "gh-pages"),
        ],
    );

    assert!(result.success, "stderr:\n{}", result.stderr);
    let calls = read(&log);
    assert!(calls.contains("commit -m Publish\n"));
    assert!(calls.contains("push --force origin gh-pages"));
    assert!(env.project_path("state/site.lock").exists());
}

#[test]
fn test_deploy_git_push_failure_keeps_manifest_and_surfaces_stderr() {
    let env = git_env();
    let log = env.project_path("git.log");

    let result = env.run_with_env(
        &["deploy", "git://site"],
        &[
            ("FAKE_GIT_LOG", log.to_str().unwrap()),
            ("FAKE_GIT_FAIL", "push"),
        ],
    );

    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("fatal: push refused by fake remote"),
        "stderr:\n{}",
        result.stderr
    );
    assert!(!env.project_path(".ferry.lock").exists());
}

#[test]
fn test_deploy_git_requires_repository() {
    let env = TestEnv::new();
    env.install_tool("git", FAKE_GIT);
    env.write_file("site/index.html", "x");
    let log = env.project_path("git.log");

    let result = env.run_with_env(
        &["deploy", "git://site"],
        &[("FAKE_GIT_LOG", log.to_str().unwrap())],
    );

    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("not a git repository"));
    assert!(!log.exists(), "git must not run outside a repository");
}

#[test]
fn test_deploy_without_target_is_configuration_error() {
    let env = TestEnv::new();

    let result = env.run(&["deploy"]);

    assert!(!result.success);
    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("no deploy target"));
}

#[test]
fn test_deploy_git_json_report() {
    let env = git_env();
    let log = env.project_path("git.log");

    let result = env.run_with_env(
        &["deploy", "git://site", "--json"],
        &[("FAKE_GIT_LOG", log.to_str().unwrap())],
    );

    assert!(result.success, "stderr:\n{}", result.stderr);
    let value: serde_json::Value = serde_json::from_str(result.stdout.trim()).unwrap();
    assert_eq!(value["event"], "deploy");
    assert_eq!(value["build_count"], 1);
    assert_eq!(value["report"]["backend"], "git");
    assert_eq!(value["report"]["branch"], "main");
}

#[test]
fn test_deploy_git_full_resets_build_count() {
    let env = git_env();
    let log = env.project_path("git.log");
    let log_env = [("FAKE_GIT_LOG", log.to_str().unwrap())];

    for _ in 0..2 {
        let result = env.run_with_env(&["deploy", "git://site"], &log_env);
        assert!(result.success, "stderr:\n{}", result.stderr);
    }
    assert!(read(&env.project_path(".ferry.lock")).contains("build_count = 2"));

    let result = env.run_with_env(&["deploy", "git://site", "--full"], &log_env);
    assert!(result.success, "stderr:\n{}", result.stderr);
    let manifest = read(&env.project_path(".ferry.lock"));
    assert!(manifest.contains("build_count = 1"), "manifest:\n{}", manifest);
}
