//! E2E error-path tests: stable error codes on stderr, warnings for unknown
//! focus ids, and JSON-wrapped errors.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn beadview_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("beadview"));
    cmd.current_dir(dir);
    cmd.env("BEADVIEW_LOG", "error");
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd.env_remove("FORMAT");
    cmd
}

fn project_with(snapshot: &str) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    std::fs::create_dir(dir.path().join(".beads")).expect("mkdir .beads");
    std::fs::write(dir.path().join(".beads/issues.jsonl"), snapshot).expect("write snapshot");
    dir
}

const SNAPSHOT: &str = "{\"id\":\"bd-1\",\"status\":\"open\"}\n";

#[test]
fn outside_project_is_not_initialized() {
    let dir = TempDir::new().expect("tempdir");
    beadview_cmd(dir.path())
        .args(["model", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1001]"))
        .stderr(predicate::str::contains("suggestion:"));
}

#[test]
fn missing_snapshot_file() {
    let dir = TempDir::new().expect("tempdir");
    beadview_cmd(dir.path())
        .args(["--input", "nope.jsonl", "model", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1003]"));
}

#[test]
fn malformed_snapshot_line() {
    let dir = project_with("{\"id\":\"bd-1\",\"status\":\"open\"}\n{\"id\":\"bd-2\",\"status\":\"exploded\"}\n");
    beadview_cmd(dir.path())
        .args(["model", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1004]"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn invalid_depth() {
    let dir = project_with(SNAPSHOT);
    beadview_cmd(dir.path())
        .args(["view", "bd-1", "--depth", "0", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2002]"));
}

#[test]
fn json_errors_are_wrapped() {
    let dir = project_with(SNAPSHOT);
    let output = beadview_cmd(dir.path())
        .args(["path", "bd-1", "--depth", "many", "--json"])
        .output()
        .expect("command should not crash");
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stderr).expect("stderr JSON");
    assert_eq!(json["error"]["error_code"], "E2002");
}

#[test]
fn broken_project_config() {
    let dir = project_with(SNAPSHOT);
    std::fs::create_dir(dir.path().join(".beadview")).expect("mkdir");
    std::fs::write(dir.path().join(".beadview/config.toml"), "view = [").expect("write");
    beadview_cmd(dir.path())
        .args(["model", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1002]"));
}

#[test]
fn unknown_focus_warns_and_renders_empty_view() {
    let dir = project_with(SNAPSHOT);
    beadview_cmd(dir.path())
        .args(["view", "bd-missing", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "warning: Item not found: bd-missing (E2001)",
        ));
}

#[test]
fn unknown_focus_is_silent_in_json() {
    let dir = project_with(SNAPSHOT);
    let output = beadview_cmd(dir.path())
        .args(["chain", "bd-missing", "--json"])
        .output()
        .expect("command should not crash");
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["blockerNodeIds"], serde_json::json!([]));
    assert_eq!(json["firstActionableBlockerId"], Value::Null);
}
