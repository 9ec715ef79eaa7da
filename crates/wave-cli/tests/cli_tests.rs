//! Integration tests for the `wave` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the parse, get,
//! animal and encode subcommands through the actual binary, including
//! stdin/stdout piping, file I/O, upstream exit statuses and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

const REX: &str = r#"(record (name "Rex") (species "Dog") (age 3) (is-mammal true))"#;

/// Helper: path to a fixture under tests/fixtures.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn wave() -> Command {
    Command::cargo_bin("wave").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Parse subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parse_stdin_to_json() {
    let output = wave()
        .arg("parse")
        .write_stdin(REX)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("stdout must be JSON");
    assert_eq!(
        json,
        serde_json::json!({"name": "Rex", "species": "Dog", "age": 3, "is-mammal": true})
    );
}

#[test]
fn parse_json_preserves_field_order() {
    wave()
        .arg("parse")
        .write_stdin("(record (zeta 1) (alpha 2))")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r#"(?s)"zeta".*"alpha""#).unwrap());
}

#[test]
fn parse_to_canonical_wave() {
    wave()
        .args(["parse", "--format", "wave"])
        .write_stdin("(record\n  (age   3)\n  (age 7)\n  (name \"Rex\"))\n")
        .assert()
        .success()
        .stdout("(record (age 7) (name \"Rex\"))\n");
}

#[test]
fn parse_file_to_file() {
    let output_path = std::env::temp_dir().join("wave-cli-test-parse-output.json");
    let _ = std::fs::remove_file(&output_path);

    wave()
        .args(["parse", "-i", fixture("nested.wave").as_str(), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["owner"]["name"], "Ann");
    assert_eq!(json["owner"]["age"], 40);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn parse_malformed_fails() {
    wave()
        .arg("parse")
        .write_stdin(r#"(record (name "Unterminated)"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse WAVE input"))
        .stderr(predicate::str::contains("unterminated string literal"));
}

#[test]
fn parse_unrecognized_token_reports_span() {
    wave()
        .arg("parse")
        .write_stdin("(record (count abc))")
        .assert()
        .failure()
        .stderr(predicate::str::contains("15..18"));
}

#[test]
fn parse_missing_file_fails() {
    wave()
        .args(["parse", "-i", "/nonexistent/result.wave"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn parse_skipped_on_upstream_failure() {
    wave()
        .args(["parse", "--exit-status", "3"])
        .write_stdin(REX)
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("exited with status 3"));
}

#[test]
fn exit_status_above_255_is_rejected() {
    wave()
        .args(["parse", "--exit-status", "256"])
        .write_stdin("(record)")
        .assert()
        .failure()
        .code(predicate::ne(0))
        .stdout(predicate::str::is_empty());
}

#[test]
fn exit_status_negative_is_rejected() {
    wave()
        .args(["parse", "--exit-status=-1"])
        .write_stdin("(record)")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn exit_status_255_is_passed_through() {
    wave()
        .args(["get", "name", "--exit-status", "255"])
        .write_stdin(REX)
        .assert()
        .code(255)
        .stdout(predicate::str::is_empty());
}

#[test]
fn get_top_level_field_from_file() {
    wave()
        .args(["get", "age", "-i", fixture("animal.wave").as_str()])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn parse_runs_on_upstream_success() {
    wave()
        .args(["parse", "--exit-status", "0", "--format", "wave"])
        .write_stdin(REX)
        .assert()
        .success()
        .stdout(format!("{REX}\n"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Get subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn get_string_field() {
    wave()
        .args(["get", "name"])
        .write_stdin(REX)
        .assert()
        .success()
        .stdout("\"Rex\"\n");
}

#[test]
fn get_raw_string_field() {
    wave()
        .args(["get", "name", "--raw"])
        .write_stdin(REX)
        .assert()
        .success()
        .stdout("Rex\n");
}

#[test]
fn get_nested_field() {
    wave()
        .args(["get", "owner.age", "-i", fixture("nested.wave").as_str()])
        .assert()
        .success()
        .stdout("40\n");
}

#[test]
fn get_record_field() {
    wave()
        .args(["get", "owner", "-i", fixture("nested.wave").as_str()])
        .assert()
        .success()
        .stdout("(record (name \"Ann\") (age 40))\n");
}

#[test]
fn get_missing_field_fails() {
    wave()
        .args(["get", "color"])
        .write_stdin(REX)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field `color`"));
}

#[test]
fn get_through_scalar_fails() {
    wave()
        .args(["get", "name.first"])
        .write_stdin(REX)
        .assert()
        .failure()
        .stderr(predicate::str::contains("string value"));
}

#[test]
fn get_requires_record() {
    wave()
        .args(["get", "name"])
        .write_stdin("42")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a record at top level"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Animal subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn animal_prints_fields() {
    wave()
        .args(["animal", "-i", fixture("animal.wave").as_str()])
        .assert()
        .success()
        .stdout(
            "--- Parsed object ---\n  Name: Rex\n  Species: Dog\n  Age: 3\n  IsMammal: true\n",
        );
}

#[test]
fn animal_missing_field_fails() {
    wave()
        .arg("animal")
        .write_stdin("(record)")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field `name`"));
}

#[test]
fn animal_skipped_on_upstream_failure() {
    wave()
        .args(["animal", "--exit-status", "1"])
        .write_stdin("")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Encode subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn encode_json_file() {
    wave()
        .args(["encode", "-i", fixture("animal.json").as_str()])
        .assert()
        .success()
        .stdout(format!("{REX}\n"));
}

#[test]
fn encode_then_parse_roundtrip() {
    let encoded = wave()
        .arg("encode")
        .write_stdin(r#"{"pet":{"name":"Rex","age":3},"ok":false}"#)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let output = wave()
        .arg("parse")
        .write_stdin(encoded)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"pet": {"name": "Rex", "age": 3}, "ok": false})
    );
}

#[test]
fn encode_unrepresentable_json_fails() {
    wave()
        .arg("encode")
        .write_stdin(r#"{"weights":[1.5,2.5]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("$.weights"));
}

// ─────────────────────────────────────────────────────────────────────────────
// General
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn verbose_logs_to_stderr() {
    wave()
        .args(["-v", "parse", "--format", "wave"])
        .env_remove("RUST_LOG")
        .write_stdin(REX)
        .assert()
        .success()
        .stdout(format!("{REX}\n"))
        .stderr(predicate::str::contains("read input"));
}

#[test]
fn quiet_by_default() {
    wave()
        .args(["parse", "--format", "wave"])
        .env_remove("RUST_LOG")
        .write_stdin(REX)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn help_lists_subcommands() {
    wave()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("animal"))
        .stdout(predicate::str::contains("encode"));
}

#[test]
fn missing_subcommand_fails() {
    wave().assert().failure();
}
