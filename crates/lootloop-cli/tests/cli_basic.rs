//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a temp data directory
//! and verify the JSON output.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "lootloop-cli", "--quiet", "--"])
        .args(args)
        .env("LOOTLOOP_DATA_DIR", data_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn status_reports_both_tracks_claimable() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["status"]);
    assert_eq!(code, 0, "status failed");

    let snapshots: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let tracks = snapshots.as_array().unwrap();
    assert_eq!(tracks.len(), 2);
    for track in tracks {
        assert_eq!(track["claimable"], true);
        assert_eq!(track["active_slot"], 0);
    }
}

#[test]
fn claim_succeeds_once_then_cools_down() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["claim", "--cadence", "daily"]);
    assert_eq!(code, 0, "first claim failed");
    let event: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(event["type"], "RewardClaimed");
    assert_eq!(event["kind"], "wood");
    assert_eq!(event["amount"], 10);

    let (_, stderr, code) = run_cli(dir.path(), &["claim", "--cadence", "daily"]);
    assert_eq!(code, 1, "second claim should be rejected");
    assert!(stderr.contains("not claimable"));
}

#[test]
fn wallet_reflects_claims() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["claim", "--cadence", "daily"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(dir.path(), &["wallet"]);
    assert_eq!(code, 0, "wallet failed");
    let balances: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(balances[0]["kind"], "wood");
    assert_eq!(balances[0]["balance"], 10);
}

#[test]
fn reset_restores_claimability() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["claim", "--cadence", "weekly"]);
    assert_eq!(code, 0);

    let (_, _, code) = run_cli(dir.path(), &["reset"]);
    assert_eq!(code, 0, "reset failed");

    let (stdout, _, code) = run_cli(dir.path(), &["status", "--cadence", "weekly"]);
    assert_eq!(code, 0);
    let snapshots: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshots[0]["claimable"], true);
    assert_eq!(snapshots[0]["active_slot"], 0);
}

#[test]
fn catalog_show_prints_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["catalog", "show"]);
    assert_eq!(code, 0, "catalog show failed");
    let catalog: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(catalog["daily"]["cooldown_secs"], 86400);
    assert_eq!(catalog["daily"]["rewards"].as_array().unwrap().len(), 3);
}

#[test]
fn watch_streams_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["watch", "--count", "2"]);
    assert_eq!(code, 0, "watch failed");

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let snapshots: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(snapshots.as_array().unwrap().len(), 2);
    }
}
