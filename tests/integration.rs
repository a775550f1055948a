// Integration tests for the dumpscope CLI surface.
//
// These tests use assert_cmd to invoke the binary and verify
// exit codes and stdout/stderr output.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to build a Command for the dumpscope binary.
fn dumpscope() -> Command {
    Command::cargo_bin("dumpscope").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    dumpscope()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dumpscope"));
}

#[test]
fn cli_help_flag() {
    dumpscope()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("diagnostic dump"));
}

#[test]
fn analyze_requires_path() {
    dumpscope()
        .arg("analyze")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn analyze_rejects_unknown_format() {
    dumpscope()
        .args(["analyze", "/tmp", "--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn quiet_and_verbose_conflict() {
    dumpscope()
        .args(["analyze", "/tmp", "-q", "-v"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn analyze_missing_path_exits_with_runtime_failure() {
    dumpscope()
        .args(["analyze", "/definitely/not/a/dump"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}
