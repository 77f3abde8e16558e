//! Driver tests: token output on stdout, failure reports on stderr.

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn scrap_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_scrap"))
}

#[test]
fn test_cli_demo_line() {
    let mut cmd = Command::new(scrap_bin());
    cmd.env_remove("RUST_LOG");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Type LITERAL_DOUBLE value: 3.0"))
        .stdout(predicate::str::contains("Type EQUAL value: null"));
}

#[test]
fn test_cli_lexes_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("input.scrap");
    fs::write(&input_path, "x = 'hi'\n").unwrap();

    let mut cmd = Command::new(scrap_bin());
    cmd.arg(&input_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Type IDENTIFIER value: x"))
        .stdout(predicate::str::contains("Type LITERAL_STRING value: hi"));
}

#[test]
fn test_cli_reports_input_failure_once() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("binary.scrap");
    fs::write(&input_path, [b'a', b' ', 0xff]).unwrap();

    let mut cmd = Command::new(scrap_bin());
    cmd.env_remove("RUST_LOG").arg(&input_path);

    let output = cmd.assert().failure().get_output().clone();
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(stderr.matches("Error: InvalidUtf8").count(), 1, "{}", stderr);
    assert_eq!(stderr.matches("input is not valid UTF-8").count(), 1, "{}", stderr);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Type IDENTIFIER value: a"));
}
