//! Integration tests for the CLI surface.

#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::new(cargo_bin("beepcut"));
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("timeline"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_no_inputs_prints_help() {
    let mut cmd = Command::new(cargo_bin("beepcut"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::new(cargo_bin("beepcut"));
    cmd.current_dir(dir.path());
    cmd.arg("does-not-exist.mp4");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_timeline_with_missing_catalog_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::new(cargo_bin("beepcut"));
    cmd.current_dir(dir.path());
    cmd.args(["timeline", "--incidents", "missing.json"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn test_timeline_from_catalog_writes_document() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("incidents.json"),
        r#"{"GHOST.MP4": [10.0]}"#,
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin("beepcut"));
    cmd.current_dir(dir.path());
    cmd.args(["timeline", "--incidents", "incidents.json", "--out", "timeline.json"]);

    cmd.assert().success();

    // The only incident points at a file that does not exist, so it lands
    // in the skip report and the timeline stays empty.
    let contents = std::fs::read_to_string(dir.path().join("timeline.json")).unwrap();
    let document: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(document["total_duration_frames"], 0);
    assert_eq!(document["skipped"][0]["file_id"], "GHOST.MP4");
    assert!(document["placements"].as_array().unwrap().is_empty());
}

#[test]
fn test_invalid_fps_is_rejected_at_parse_time() {
    let mut cmd = Command::new(cargo_bin("beepcut"));
    cmd.args(["timeline", "--fps=0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("positive"));
}

#[test]
fn test_config_path_prints_a_path() {
    let mut cmd = Command::new(cargo_bin("beepcut"));
    cmd.args(["config", "path"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("beepcut"));
}
