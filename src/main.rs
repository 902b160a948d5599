use anyhow::Result;
use poi_stream_rs::{CancellationToken, PipelineConfig, PlacemarkCollector, setup_logging, stream_cells};
use std::{env, path::PathBuf, time::Instant};
use tracing::info;

fn main() -> Result<()> {
    setup_logging()?;

    let files = get_files()?;
    let config = PipelineConfig::from_env()?;
    let writer = get_writer();

    let started = Instant::now();
    let cells = stream_cells(files, &config, CancellationToken::new())?;

    let mut wtr = csv::Writer::from_writer(writer);
    let mut collector = PlacemarkCollector::new();
    let mut failure = None;
    for cell in cells {
        match cell {
            Ok(cell) => {
                for placemark in collector.process_cell(&cell) {
                    wtr.serialize(&placemark)?;
                }
            }
            // the stream ends right after its error
            Err(e) => failure = Some(e),
        }
    }
    wtr.flush()?;

    info!(elapsed = ?started.elapsed(), "{}", collector.summary());
    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn get_files() -> Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    if files.is_empty() {
        anyhow::bail!("Usage: poi-stream-rs <cells.json>...");
    }
    Ok(files)
}

fn get_writer() -> impl std::io::Write {
    std::io::stdout()
}
