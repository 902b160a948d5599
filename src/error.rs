//! Module defining the errors which are exposed to the users of the crate

use std::path::{Path, PathBuf};

use serde_json::error::Category;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The list of input files is empty
    #[error("configuration error: no input files given")]
    NoInputFiles,

    /// An input path which can not be streamed, e.g., a missing file or a directory
    #[error("configuration error — {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// A pipeline setting with an unusable value, e.g., a channel capacity of zero
    #[error("configuration error — {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    /// Failure opening or reading a source file
    #[error("I/O error — {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON or a token sequence not matching the expected document shape
    #[error("parse error — {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Well-formed JSON whose content violates a record invariant, e.g., a geometry without exactly two coordinates
    #[error("data integrity error — {record}: {message}")]
    DataIntegrity { record: String, message: String },

    /// The producer went away without sending its completion signal
    #[error("the producer terminated without signaling completion")]
    ProducerLost,

    /// The producer panicked; cells delivered before the panic remain valid
    #[error("the producer panicked")]
    ProducerPanicked,

    /// The producer thread could not be started
    #[error("failed to spawn the producer thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Errors raised while walking a JSON document. Classified from the errors of `serde_json`.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected end of input at line {line}, column {column}")]
    UnexpectedEof { line: usize, column: usize },

    /// Malformed JSON, e.g., a missing separator or an invalid escape in a key
    #[error("malformed JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// Well-formed JSON not matching the expected types
    #[error("failed to decode value: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("read failure: {0}")]
    Read(#[source] std::io::Error),
}

impl From<serde_json::Error> for ParseError {
    fn from(error: serde_json::Error) -> Self {
        match error.classify() {
            Category::Io => ParseError::Read(error.into()),
            Category::Eof => ParseError::UnexpectedEof {
                line: error.line(),
                column: error.column(),
            },
            Category::Syntax => ParseError::Syntax(error),
            Category::Data => ParseError::Decode(error),
        }
    }
}

/// Attaches the path of the file being streamed. Read failures surfacing through the tokenizer
/// are reported as I/O errors, everything else as parse errors.
pub(crate) fn stream_error(path: &Path, error: ParseError) -> Error {
    match error {
        ParseError::Read(source) => Error::Io {
            path: path.to_path_buf(),
            source,
        },
        other => Error::Parse {
            path: path.to_path_buf(),
            source: other,
        },
    }
}

pub(crate) fn config_error(path: impl Into<PathBuf>, reason: impl Into<String>) -> Error {
    Error::Config {
        path: path.into(),
        reason: reason.into(),
    }
}

pub(crate) fn integrity_error(record: impl Into<String>, message: impl Into<String>) -> Error {
    Error::DataIntegrity {
        record: record.into(),
        message: message.into(),
    }
}
