mod config;
mod domain;
mod engine;
mod error;
mod input;
mod output;
mod telemetry;

use std::path::PathBuf;

pub use config::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_READ_BUFFER_SIZE, PipelineConfig};
pub use domain::{Cell, Geometry, LonLat, PoiEntry};
pub use engine::{CancellationToken, CellProducer, CellStream, Completion, Event};
pub use error::{Error, ParseError};
pub use output::{MarkerKind, Placemark, PlacemarkCollector, Summary};
pub use telemetry::setup_logging;

/// Streams the POI cells of a sequence of JSON files.
///
/// Each file holds one JSON object whose values are arrays of POI entries, one array per spatial cell. The files
/// are read one after the other on a dedicated producer thread, and every array is delivered as one [`Cell`]. At
/// most [`PipelineConfig::channel_capacity`] cells are buffered ahead of the consumer, so memory use does not grow
/// with the size of the input.
///
/// The file list is validated before anything is spawned: an empty list, a missing path or a path which is not a
/// regular file is reported right here. Files are opened only when the producer gets to them, so a file which can
/// not be opened ends the run with an [`Error::Io`].
///
/// # Error handling
///
/// Once running, the first failure (an unreadable file or malformed JSON) stops the producer. The stream yields all
/// cells sent before the failure and then the error, exactly once. Errors of later stages, e.g., a POI whose
/// geometry is not a coordinate pair, are for the consumer to handle (see [`PlacemarkCollector`]).
///
/// # Cancellation
///
/// Cancelling `cancel` (or calling [`CellStream::cancel`]) lets the producer stop before its next cell. Dropping
/// the stream cancels it as well.
///
/// # Example
///
/// ```no_run
/// use poi_stream_rs::{CancellationToken, PipelineConfig, PlacemarkCollector, stream_cells};
///
/// let config = PipelineConfig::default();
/// let cells = stream_cells(["cells_1.json", "cells_2.json"], &config, CancellationToken::new()).unwrap();
///
/// let mut wtr = csv::Writer::from_writer(std::io::stdout());
/// let mut collector = PlacemarkCollector::new();
/// for cell in cells {
///     for placemark in collector.process_cell(&cell.unwrap()) {
///         wtr.serialize(&placemark).unwrap();
///     }
/// }
/// wtr.flush().unwrap();
/// ```
pub fn stream_cells(
    files: impl IntoIterator<Item = impl Into<PathBuf>>,
    config: &PipelineConfig,
    cancel: CancellationToken,
) -> Result<CellStream, Error> {
    CellStream::spawn(files, config, cancel)
}
