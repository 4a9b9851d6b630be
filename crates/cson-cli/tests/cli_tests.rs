//! Integration tests for the `cson` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the decode, check,
//! and stats subcommands through the actual binary, including stdin/stdout
//! piping, file I/O, and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the well-formed fixture (4 lines, one of them blank).
fn sample_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.cson")
}

/// Helper: path to the fixture whose third line has an unclosed `{`.
fn broken_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/broken.cson")
}

fn cson() -> Command {
    Command::cargo_bin("cson").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Decode subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn decode_stdin_to_stdout() {
    cson()
        .arg("decode")
        .write_stdin("1,{2,3}\ntrue,\"x\"\n")
        .assert()
        .success()
        .stdout("[1,[2,3]]\n[true,\"x\"]\n");
}

#[test]
fn decode_file_to_stdout() {
    let output = cson()
        .args(["decode", "-i", sample_path()])
        .output()
        .expect("decode should run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("output should be UTF-8");
    let values: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is one JSON value"))
        .collect();
    assert_eq!(
        values,
        vec![
            serde_json::json!([1, "alice", true]),
            serde_json::json!([[2, 3], [4.5, "b"]]),
            serde_json::json!([]),
            serde_json::json!([[[1], []]]),
        ]
    );
}

#[test]
fn decode_file_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("out.jsonl");

    cson()
        .args(["decode", "-i", sample_path(), "-o"])
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&out_path).expect("output file must exist");
    assert_eq!(content.lines().count(), 4);
    assert!(content.starts_with("[1,\"alice\",true]\n"));
}

#[test]
fn decode_pretty() {
    cson()
        .args(["decode", "--pretty"])
        .write_stdin("[1]")
        .assert()
        .success()
        .stdout("[\n  [\n    1\n  ]\n]\n");
}

#[test]
fn decode_invalid_input_fails_without_output() {
    cson()
        .args(["decode", "-i", broken_path()])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to decode CSON"))
        .stderr(predicate::str::contains("line 3, column 1"));
}

#[test]
fn decode_partial_keeps_earlier_records() {
    cson()
        .args(["decode", "--partial", "-i", broken_path()])
        .assert()
        .failure()
        .stdout("[1,2]\n[3]\n")
        .stderr(predicate::str::contains("after 2 record(s)"))
        .stderr(predicate::str::contains("unclosed object"));
}

#[test]
fn decode_missing_file_fails() {
    cson()
        .args(["decode", "-i", "/nonexistent/input.cson"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_valid_file() {
    cson()
        .args(["check", "-i", sample_path()])
        .assert()
        .success()
        .stdout("4 line(s) OK\n");
}

#[test]
fn check_invalid_stdin() {
    cson()
        .arg("check")
        .write_stdin("1,foo\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid CSON"))
        .stderr(predicate::str::contains("unrecognized bareword `foo`"));
}

#[test]
fn check_empty_input() {
    cson()
        .arg("check")
        .write_stdin("")
        .assert()
        .success()
        .stdout("0 line(s) OK\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Stats subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stats_counts_kinds() {
    cson()
        .args(["stats", "-i", sample_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lines:      4"))
        .stdout(predicate::str::contains("integer:    4"))
        .stdout(predicate::str::contains("float:      1"))
        .stdout(predicate::str::contains("string:     2"))
        .stdout(predicate::str::contains("bool:       1"))
        .stdout(predicate::str::contains("object:     2"))
        .stdout(predicate::str::contains("array:      3"));
}

#[test]
fn stats_handles_very_deep_nesting() {
    let depth = 100_000;
    let line = format!("{}1{}\n", "[".repeat(depth), "]".repeat(depth));
    cson()
        .arg("stats")
        .write_stdin(line)
        .assert()
        .success()
        .stdout(predicate::str::contains("integer:    1"))
        .stdout(predicate::str::contains(format!("array:      {depth}")));
}

// ─────────────────────────────────────────────────────────────────────────────
// General
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn no_subcommand_shows_usage() {
    cson()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn version_flag() {
    cson()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cson"));
}
