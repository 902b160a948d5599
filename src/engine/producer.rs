//! Module for the producer side of the pipeline: walks the source documents and emits one cell per array value

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::mpsc::SyncSender,
};

use serde::de::{MapAccess, Visitor};
use tracing::{debug, error, info};

use crate::{
    Error, PipelineConfig,
    domain::Cell,
    engine::CancellationToken,
    error::stream_error,
    input::{FileSequence, Flow, SourceFile, TokenCursor, read_object},
};

/// Tokens in front of the first array of a document: the opening brace and the first key.
pub(crate) const LEADING_TOKENS: usize = 2;
/// Tokens after each array: the key of the next array, or the closing brace after the last one.
pub(crate) const TRAILING_TOKENS: usize = 1;

/// Messages sent from the producer to the consumer.
#[derive(Debug)]
pub enum Event {
    Cell(Cell),
    /// The last message of every run, sent exactly once after the last cell.
    Done(Completion),
}

/// Terminal report of a producer run.
#[derive(Debug, Default)]
pub struct Completion {
    cells_sent: usize,
    files_opened: usize,
    cancelled: bool,
    failed: bool,
    error: Option<Error>,
}

impl Completion {
    /// Report for a run whose producer vanished without a terminal event.
    pub(crate) fn lost() -> Self {
        Self {
            failed: true,
            ..Self::default()
        }
    }

    pub fn cells_sent(&self) -> usize {
        self.cells_sent
    }

    pub fn files_opened(&self) -> usize {
        self.files_opened
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// `false` if the run stored an error, even after the error was taken out of the report.
    pub fn is_success(&self) -> bool {
        !self.failed
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    // first failure wins
    fn record_error(&mut self, error: Error) {
        if self.failed {
            debug!(%error, "ignoring error after the first failure");
            return;
        }
        self.failed = true;
        self.error = Some(error);
    }
}

/// Streams the cells of a list of source files into a bounded channel.
///
/// The producer owns the file cursors and the decoder state; the receiving side of the channel only ever sees
/// complete cells followed by a single [`Event::Done`].
#[derive(Debug)]
pub struct CellProducer {
    files: FileSequence,
    output: SyncSender<Event>,
    cancel: CancellationToken,
}

impl CellProducer {
    /// Validates the file list up front: fails if the list is empty or any path is missing or not a regular file.
    pub fn new(
        files: impl IntoIterator<Item = impl Into<PathBuf>>,
        output: SyncSender<Event>,
        cancel: CancellationToken,
        config: &PipelineConfig,
    ) -> Result<Self, Error> {
        let paths = files.into_iter().map(Into::into).collect();
        let files = FileSequence::new(paths, config.read_buffer_size())?;
        Ok(Self {
            files,
            output,
            cancel,
        })
    }

    /// Streams all files in order. Nothing is returned to the caller: the outcome, including the first error,
    /// travels to the consumer inside the terminal [`Event::Done`].
    pub fn run(self) {
        let Self {
            files,
            output,
            cancel,
        } = self;
        let mut signal = CompletionSignal {
            output,
            report: Completion::default(),
        };

        info!(files = ?files.paths(), "starting cell producer");
        for source in files {
            if cancel.is_cancelled() {
                info!("cancellation requested, not opening further files");
                signal.report.cancelled = true;
                break;
            }

            let flow = source.and_then(|source| {
                signal.report.files_opened += 1;
                stream_file(source, &mut signal, &cancel)
            });
            match flow {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => break,
                Err(err) => {
                    error!(error = %err, "cell producer aborted");
                    signal.report.record_error(err);
                    break;
                }
            }
        }
    }
}

fn stream_file(
    source: SourceFile,
    signal: &mut CompletionSignal,
    cancel: &CancellationToken,
) -> Result<Flow, Error> {
    let SourceFile { path, reader } = source;
    debug!(path = %path.display(), "streaming file");

    let cells = FileCells {
        path: &path,
        signal,
        cancel,
    };
    read_object(reader, cells).map_err(|e| stream_error(&path, e))
}

/// Walks the top-level object of one file, sending each array value as a cell.
struct FileCells<'a> {
    path: &'a Path,
    signal: &'a mut CompletionSignal,
    cancel: &'a CancellationToken,
}

impl<'de> Visitor<'de> for FileCells<'_> {
    type Value = Flow;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON object of POI cells")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Flow, A::Error> {
        let mut tokens = TokenCursor::new(map);
        let mut cells = 0usize;
        tokens.skip_tokens(LEADING_TOKENS)?;
        while tokens.more() {
            if self.cancel.is_cancelled() {
                info!(path = %self.path.display(), "cancellation requested, stopping cell producer");
                self.signal.report.cancelled = true;
                return Ok(Flow::Stop);
            }

            let cell: Cell = tokens.decode_next()?;
            if !self.signal.send(cell) {
                debug!("consumer disconnected, stopping cell producer");
                return Ok(Flow::Stop);
            }
            cells += 1;

            tokens.skip_tokens(TRAILING_TOKENS)?;
        }

        debug!(path = %self.path.display(), cells, "file done");
        Ok(Flow::Continue)
    }
}

/// Owns the sending side of the channel. Dropping it sends the terminal [`Event::Done`], so that every exit path of
/// a run, a panic included, signals completion exactly once.
struct CompletionSignal {
    output: SyncSender<Event>,
    report: Completion,
}

impl CompletionSignal {
    /// Blocks while the channel is full. Returns `false` if the consumer is gone.
    fn send(&mut self, cell: Cell) -> bool {
        match self.output.send(Event::Cell(cell)) {
            Ok(()) => {
                self.report.cells_sent += 1;
                true
            }
            Err(_) => false,
        }
    }
}

impl Drop for CompletionSignal {
    fn drop(&mut self) {
        let mut report = std::mem::take(&mut self.report);
        if std::thread::panicking() {
            report.record_error(Error::ProducerPanicked);
        }
        info!(
            cells = report.cells_sent,
            files = report.files_opened,
            cancelled = report.cancelled,
            failed = report.failed,
            "cell producer done"
        );
        // Fails only if the consumer is gone, in which case nobody waits for the signal.
        let _ = self.output.send(Event::Done(report));
    }
}
