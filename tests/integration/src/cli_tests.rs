//! End-to-end CLI tests
//!
//! These cover the argument surface and the failures that must occur before
//! any external call: missing inputs, out-of-range values, malformed
//! repository references. Nothing here touches the network or the Azure CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `swa-sync` command with a scrubbed environment, so ambient workflow
/// variables (`INPUT_*`, `GITHUB_*`) never leak into assertions.
fn swa_sync() -> Command {
    let mut cmd = Command::cargo_bin("swa-sync").unwrap();
    cmd.env_clear();
    cmd
}

/// Sync invocation with every required input present and valid.
fn valid_sync() -> Command {
    let mut cmd = swa_sync();
    cmd.args([
        "sync",
        "--github-token",
        "token",
        "--swa-name",
        "my-app",
        "--swa-resource-group",
        "my-group",
        "--discussion-category-name",
        "Invites",
        "--target-repo",
        "octo/app",
    ]);
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    swa_sync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("cleanup"));
}

#[test]
fn test_sync_requires_github_token() {
    swa_sync()
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--github-token"));
}

#[test]
fn test_sync_rejects_out_of_range_expiration_hours() {
    valid_sync()
        .args(["--invitation-expiration-hours", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::"))
        .stdout(predicate::str::contains("between 1 and 168"));
}

#[test]
fn test_sync_rejects_malformed_target_repo() {
    valid_sync()
        .args(["--target-repo", "not-a-repo"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "invalid target repository format: not-a-repo",
        ));
}

#[test]
fn test_sync_requires_some_repository_reference() {
    let mut cmd = swa_sync();
    cmd.args([
        "sync",
        "--github-token",
        "token",
        "--swa-name",
        "my-app",
        "--swa-resource-group",
        "my-group",
        "--discussion-category-name",
        "Invites",
    ]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("no target repository"));
}

#[test]
fn test_sync_inputs_arrive_via_action_env() {
    // The same validation fires when inputs come in as INPUT_* variables,
    // the way a workflow step passes them.
    swa_sync()
        .arg("sync")
        .env("INPUT_GITHUB_TOKEN", "token")
        .env("INPUT_SWA_NAME", "my-app")
        .env("INPUT_SWA_RESOURCE_GROUP", "my-group")
        .env("INPUT_DISCUSSION_CATEGORY_NAME", "Invites")
        .env("INPUT_TARGET_REPO", "octo/app")
        .env("INPUT_INVITATION_EXPIRATION_HOURS", "400")
        .assert()
        .failure()
        .stdout(predicate::str::contains("between 1 and 168"));
}

#[test]
fn test_config_failure_writes_failure_summary_file() {
    let dir = TempDir::new().unwrap();
    let summary = dir.path().join("summary.md");

    valid_sync()
        .args(["--invitation-expiration-hours", "999"])
        .env("GITHUB_STEP_SUMMARY", &summary)
        .assert()
        .failure();

    let written = std::fs::read_to_string(&summary).unwrap();
    assert!(written.contains("## SWA role sync"));
    assert!(written.contains("- Status: failure"));
    assert!(written.contains("- Error:"));
}

#[test]
fn test_cleanup_rejects_unknown_mode() {
    swa_sync()
        .args([
            "cleanup",
            "--github-token",
            "token",
            "--discussion-category-name",
            "Invites",
            "--target-repo",
            "octo/app",
            "--cleanup-mode",
            "aggressive",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("cleanup-mode"));
}

#[test]
fn test_cleanup_requires_category_name() {
    swa_sync()
        .args(["cleanup", "--github-token", "token"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--discussion-category-name"));
}
