//! Tests for invalid inputs: rejected file lists and failures in the middle of a run.

use claims::{assert_err, assert_matches};
use poi_stream_rs::{CancellationToken, Error, ParseError, PipelineConfig, stream_cells};

use crate::{fixture_path, names, run_to_end, write_document};

#[test]
fn missing_file_is_rejected_before_streaming() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let error = assert_err!(stream_cells(
        [fixture_path("two_cells.json"), missing.clone()],
        &PipelineConfig::default(),
        CancellationToken::new()
    ));

    assert_matches!(error, Error::Config { path, .. } if path == missing);
}

#[test]
fn directory_is_rejected_before_streaming() {
    let dir = tempfile::tempdir().unwrap();

    let error = assert_err!(stream_cells(
        [dir.path()],
        &PipelineConfig::default(),
        CancellationToken::new()
    ));

    assert_matches!(error, Error::Config { reason, .. } if reason.contains("not a regular file"));
}

#[test]
fn truncated_file_ends_the_run_with_a_parse_error() {
    let truncated = fixture_path("truncated.json");
    let files = [fixture_path("two_cells.json"), truncated.clone()];

    let outcome = run_to_end(&files, &PipelineConfig::default());

    // everything before the damage is delivered: two cells of the first file, one of the second
    assert_eq!(outcome.cells.len(), 3);
    assert_eq!(names(&outcome.cells), ["Fountain", "Mural", "Town Hall", "Early"]);
    assert_eq!(outcome.errors.len(), 1);
    assert_matches!(
        &outcome.errors[0],
        Error::Parse { path, source: ParseError::UnexpectedEof { .. } } if *path == truncated
    );
    assert!(!outcome.success);
    assert_eq!(outcome.cells_sent, 3);
}

#[test]
fn files_after_a_failure_are_not_opened() {
    let files = [fixture_path("truncated.json"), fixture_path("two_cells.json")];

    let outcome = run_to_end(&files, &PipelineConfig::default());

    assert_eq!(names(&outcome.cells), ["Early"]);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.files_opened, 1);
}

#[test]
fn top_level_array_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(dir.path(), "array.json", "[1, 2, 3]");

    let outcome = run_to_end(&[path], &PipelineConfig::default());

    assert!(outcome.cells.is_empty());
    assert_matches!(outcome.errors.as_slice(), [Error::Parse { .. }]);
}

#[test]
fn cell_which_is_not_an_array_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(
        dir.path(),
        "object_cell.json",
        r#"{"a": [{"name": "First"}], "b": {"name": "Second"}}"#,
    );

    let outcome = run_to_end(&[path], &PipelineConfig::default());

    assert_eq!(names(&outcome.cells), ["First"]);
    assert_matches!(
        outcome.errors.as_slice(),
        [Error::Parse { source: ParseError::Decode(_), .. }]
    );
}
