//! Integration tests running the actual crate binary on the fixture files: Test the full E2E path.

use std::path::PathBuf;
use std::process::{Command, Output};

use crate::fixture_path;

fn run_binary(inputs: &[PathBuf]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_poi-stream-rs"))
        .args(inputs)
        .env("LOG_FORMAT", "json")
        .output()
        .expect("failed to execute binary")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("binary output was not valid UTF-8")
}

#[test]
fn two_files_to_csv() {
    let expected = std::fs::read_to_string(fixture_path("two_cells_and_stops_expected.csv"))
        .expect("failed to read expected output fixture");

    let output = run_binary(&[fixture_path("two_cells.json"), fixture_path("stops.json")]);

    assert!(
        output.status.success(),
        "binary exited with non-zero status.\nstderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    // single producer, so the output order is deterministic
    assert_eq!(stdout_of(&output), expected);
}

#[test]
fn bad_coordinates_are_skipped() {
    let expected = std::fs::read_to_string(fixture_path("bad_coordinates_expected.csv"))
        .expect("failed to read expected output fixture");

    let output = run_binary(&[fixture_path("bad_coordinates.json")]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), expected);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expected 2 coordinates, found 1"), "stderr: {stderr}");
}

#[test]
fn truncated_input_fails_after_writing_earlier_rows() {
    let output = run_binary(&[fixture_path("two_cells.json"), fixture_path("truncated.json")]);

    assert!(!output.status.success());
    let stdout = stdout_of(&output);
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        rows,
        [
            "kind,name,lon,lat",
            "stop,Fountain,8.5,47.25",
            "gym,Town Hall,8.625,47.375",
            "stop,Early,1.5,2.5",
        ]
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parse error"), "stderr: {stderr}");
}

#[test]
fn missing_file_fails_without_output() {
    let output = run_binary(&[fixture_path("two_cells.json"), fixture_path("missing.json")]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn no_arguments_prints_usage() {
    let output = run_binary(&[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}
