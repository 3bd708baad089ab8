//! Binary-level CLI tests
//!
//! These exercise argument parsing and configuration validation only; the
//! recording loop itself needs a live capture device and a real encoder.

use assert_cmd::Command;
use predicates::prelude::*;

fn clipcam() -> Command {
    Command::cargo_bin("clipcam").unwrap()
}

#[test]
fn test_help_lists_configuration_flags() {
    clipcam()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--segment-duration"))
        .stdout(predicate::str::contains("--clip-duration"))
        .stdout(predicate::str::contains("--device"))
        .stdout(predicate::str::contains("--log-file"));
}

#[test]
fn test_rejects_clip_longer_than_segment() {
    clipcam()
        .args(["--segment-duration", "60", "--clip-duration", "120"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("clip_duration"));
}

#[test]
fn test_rejects_zero_segment_duration() {
    clipcam()
        .args(["--segment-duration", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("segment_duration"));
}

#[test]
fn test_rejects_missing_explicit_config_file() {
    let dir = tempfile::TempDir::new().unwrap();
    clipcam()
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file"));
}

#[test]
fn test_rejects_non_numeric_duration() {
    clipcam()
        .args(["--segment-duration", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--segment-duration"));
}
