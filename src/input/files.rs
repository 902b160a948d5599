//! Module for the ordered list of source files making up one logical stream

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::Error;
use crate::error::config_error;

/// Source files, validated up front and opened one at a time in list order.
#[derive(Debug)]
pub(crate) struct FileSequence {
    paths: Vec<PathBuf>,
    next: usize,
    buffer_size: usize,
}

/// An opened source file, ready to be tokenized.
#[derive(Debug)]
pub(crate) struct SourceFile {
    pub(crate) path: PathBuf,
    pub(crate) reader: BufReader<File>,
}

impl FileSequence {
    /// Validates every path before anything is read, so that a bad entry at the end of the list is reported
    /// before time is spent on the files in front of it.
    pub(crate) fn new(paths: Vec<PathBuf>, buffer_size: usize) -> Result<Self, Error> {
        if paths.is_empty() {
            return Err(Error::NoInputFiles);
        }
        for path in &paths {
            ensure_regular_file(path)?;
        }
        Ok(Self {
            paths,
            next: 0,
            buffer_size,
        })
    }

    pub(crate) fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Iterator for FileSequence {
    type Item = Result<SourceFile, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.get(self.next)?.clone();
        self.next += 1;

        let opened = File::open(&path)
            .map(|file| BufReader::with_capacity(self.buffer_size, file))
            .map_err(|source| Error::Io {
                path: path.clone(),
                source,
            });
        Some(opened.map(|reader| SourceFile { path, reader }))
    }
}

fn ensure_regular_file(path: &Path) -> Result<(), Error> {
    let metadata =
        std::fs::metadata(path).map_err(|e| config_error(path, format!("cannot access file: {e}")))?;
    if !metadata.is_file() {
        return Err(config_error(path, "not a regular file"));
    }
    Ok(())
}
