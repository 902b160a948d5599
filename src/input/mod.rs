//! Module turning the user-provided files into a stream of typed values that can be provided to the producer.

mod files;
mod tokenizer;

pub(crate) use files::{FileSequence, SourceFile};
pub(crate) use tokenizer::{Flow, TokenCursor, read_object};
