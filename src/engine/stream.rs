//! Module exposing a producer running on its own thread as a finite iterator of cells

use std::{
    iter::FusedIterator,
    path::PathBuf,
    sync::mpsc::{Receiver, sync_channel},
    thread::JoinHandle,
};

use tracing::warn;

use crate::{
    Error, PipelineConfig,
    domain::Cell,
    engine::{CancellationToken, CellProducer, Completion, Event},
};

/// Consumer side of a pipeline run.
///
/// Yields every cell in file order and document order, then the error of the run (if any) exactly once, then
/// `None` forever. A stream can not be restarted.
#[derive(Debug)]
pub struct CellStream {
    events: Receiver<Event>,
    cancel: CancellationToken,
    producer: Option<JoinHandle<()>>,
    completion: Option<Completion>,
}

impl CellStream {
    pub(crate) fn spawn(
        files: impl IntoIterator<Item = impl Into<PathBuf>>,
        config: &PipelineConfig,
        cancel: CancellationToken,
    ) -> Result<Self, Error> {
        let (output, events) = sync_channel(config.channel_capacity());
        let producer = CellProducer::new(files, output, cancel.clone(), config)?;

        let handle = std::thread::Builder::new()
            .name("cell-producer".to_string())
            .spawn(move || producer.run())
            .map_err(Error::Spawn)?;

        Ok(Self {
            events,
            cancel,
            producer: Some(handle),
            completion: None,
        })
    }

    /// Asks the producer to stop after the cell it is working on. Cells already in the channel are still yielded.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// The terminal report, available once the stream has ended.
    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.completion.is_some()
    }

    fn finish(&mut self, completion: Completion) {
        self.completion = Some(completion);
        // the producer sends its terminal event as the very last step, joining does not block for long
        if let Some(handle) = self.producer.take()
            && handle.join().is_err()
        {
            warn!("cell producer thread panicked");
        }
    }
}

impl Iterator for CellStream {
    type Item = Result<Cell, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_finished() {
            return None;
        }
        match self.events.recv() {
            Ok(Event::Cell(cell)) => Some(Ok(cell)),
            Ok(Event::Done(mut completion)) => {
                let error = completion.take_error();
                self.finish(completion);
                error.map(Err)
            }
            Err(_) => {
                self.finish(Completion::lost());
                Some(Err(Error::ProducerLost))
            }
        }
    }
}

impl FusedIterator for CellStream {}

impl Drop for CellStream {
    fn drop(&mut self) {
        let Some(handle) = self.producer.take() else {
            return;
        };
        self.cancel.cancel();
        // Unblocks a producer waiting on a full channel. Ends once the producer dropped its sender.
        self.events.iter().for_each(drop);
        if handle.join().is_err() {
            warn!("cell producer thread panicked");
        }
    }
}
