//! Property-based tests: random multi-file documents must come out complete and in order, whatever the settings.

use std::path::PathBuf;

use poi_stream_rs::PipelineConfig;
use proptest::prelude::*;

use crate::{names, run_to_end, write_document};

/// Per file, per cell: the number of POI entries.
type Layout = Vec<Vec<usize>>;

proptest! {
    #[test]
    fn random_documents_stream_completely_and_in_order(
        layout in prop::collection::vec(prop::collection::vec(0usize..4, 0..6), 1..4),
        capacity in 1usize..5,
        buffer in 1usize..64,
        pretty in any::<bool>(),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let files: Vec<PathBuf> = layout
            .iter()
            .enumerate()
            .map(|(f, cells)| {
                write_document(dir.path(), &format!("cells_{f}.json"), &document(f, cells, pretty))
            })
            .collect();
        let config = PipelineConfig::default()
            .with_channel_capacity(capacity)
            .and_then(|c| c.with_read_buffer_size(buffer))
            .unwrap();

        let outcome = run_to_end(&files, &config);

        prop_assert!(outcome.errors.is_empty());
        prop_assert_eq!(names(&outcome.cells), expected_names(&layout));
        let sizes: Vec<usize> = outcome.cells.iter().map(|cell| cell.len()).collect();
        prop_assert_eq!(sizes, layout.concat());
        prop_assert_eq!(outcome.cells_sent, outcome.cells.len());
        prop_assert_eq!(outcome.files_opened, layout.len());
    }
}

fn poi_name(file: usize, cell: usize, entry: usize) -> String {
    format!("f{file}c{cell}e{entry}")
}

fn document(file: usize, cells: &[usize], pretty: bool) -> String {
    let (indent, newline) = if pretty { ("  ", "\n") } else { ("", "") };
    let body: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(c, &entries)| {
            let pois: Vec<String> = (0..entries)
                .map(|e| {
                    format!(
                        r#"{{"name": "{}", "stop": true, "s2l20": "{c:x}{e:x}", "loc": {{"type": "Point", "coordinates": [1.5, 2.5]}}}}"#,
                        poi_name(file, c, e)
                    )
                })
                .collect();
            format!(r#"{indent}"cell-{c}": [{}]"#, pois.join(", "))
        })
        .collect();
    format!("{{{newline}{}{newline}}}{newline}", body.join(&format!(",{newline}")))
}

fn expected_names(layout: &Layout) -> Vec<String> {
    layout
        .iter()
        .enumerate()
        .flat_map(|(f, cells)| {
            cells.iter().enumerate().flat_map(move |(c, &entries)| {
                (0..entries).map(move |e| poi_name(f, c, e))
            })
        })
        .collect()
}
