//! Module for the core of the pipeline: the producer, its cancellation and completion protocol, and the stream
//! handed to the consumer

mod cancel;
mod producer;
mod stream;

pub use cancel::CancellationToken;
pub use producer::{CellProducer, Completion, Event};
pub use stream::CellStream;

pub(crate) use producer::{LEADING_TOKENS, TRAILING_TOKENS};
