//! Integration tests for CLI JSON output behavior
//!
//! These tests verify that --json flags produce valid, parseable JSON output
//! for automation and scripting workflows.

use std::path::Path;
use std::process::{Command, Output};

fn capsync_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let output: Output = Command::new(env!("CARGO_BIN_EXE_capsync"))
        .current_dir(dir)
        .env("HOME", dir)
        .env("CAPSYNC_DATA_DIR", dir.join("data"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute capsync");

    assert!(
        output.status.success(),
        "capsync {} failed with exit code {:?}. stderr: {}",
        args.join(" "),
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("stdout should be valid JSON ({}), got: {}", e, stdout))
}

#[test]
fn test_accounts_list_json_empty_returns_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let accounts = capsync_json(dir.path(), &["accounts", "list", "--json"]);

    assert_eq!(accounts, serde_json::json!([]));
}

#[test]
fn test_accounts_list_json_fields() {
    let dir = tempfile::tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_capsync"))
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("CAPSYNC_DATA_DIR", dir.path().join("data"))
        .env("CAPSYNC_APP_PASSWORD", "pw")
        .args([
            "accounts",
            "add",
            "dave@cloud.example.com",
            "--url",
            "https://cloud.example.com",
            "--user",
            "dave",
        ])
        .status()
        .expect("Failed to execute capsync");
    assert!(status.success(), "password should be taken from the environment");

    let accounts = capsync_json(dir.path(), &["accounts", "list", "--json"]);
    let account = &accounts[0];

    assert_eq!(account["id"], 1);
    assert_eq!(account["account_name"], "dave@cloud.example.com");
    for field in [
        "cache_validation_token",
        "brand_color",
        "api_version",
        "direct_editing_available",
        "display_name",
    ] {
        assert!(
            account.get(field).is_some(),
            "account JSON should contain '{}', got: {}",
            field,
            account
        );
    }
    assert!(
        account.get("app_password").is_none(),
        "credentials must not leak into account output"
    );
}

#[test]
fn test_schedule_status_json() {
    let dir = tempfile::tempdir().unwrap();

    let status = capsync_json(dir.path(), &["schedule", "status", "--json"]);
    assert_eq!(status["name"], "capabilities");
    assert_eq!(status["state"], "unregistered");
    assert!(status["registration"].is_null());

    Command::new(env!("CARGO_BIN_EXE_capsync"))
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("CAPSYNC_DATA_DIR", dir.path().join("data"))
        .args(["schedule", "enable"])
        .status()
        .expect("Failed to execute capsync");

    let status = capsync_json(dir.path(), &["schedule", "status", "--json"]);
    assert_eq!(status["state"], "registered");
    assert_eq!(status["registration"]["request"]["interval_secs"], 86_400);
    assert!(status["next_run"].is_null(), "never run means no next_run yet");
}

#[test]
fn test_forced_tick_json_report() {
    let dir = tempfile::tempdir().unwrap();

    let report = capsync_json(dir.path(), &["tick", "--force", "--json"]);

    assert_eq!(report["attempted"], 0);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["cancelled"], false);
    assert_eq!(report["failures"], serde_json::json!([]));
}
