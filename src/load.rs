//! Purpose: Load input bytes for the parser from files or stdin.
//! Exports: `LoadOptions`, `load`, `load_stdin`.
//! Role: I/O collaborator; the parser core only ever sees the returned buffer.
//! Invariants: Buffer sizing is configuration, never a parser-core constant.
//! Invariants: I/O failures surface as `ErrorKind::Io` and carry the path.
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;

use crate::core::error::{Error, ErrorKind};

const DEFAULT_INITIAL_CAPACITY: usize = 4096;

#[derive(Clone, Copy, Debug)]
pub struct LoadOptions {
    /// Starting size of the read buffer; growth doubles from here.
    pub initial_capacity: usize,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the whole file at `path` into a buffer.
pub fn load(path: &Path, options: &LoadOptions) -> Result<Vec<u8>, Error> {
    let file = File::open(path).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to open input file")
            .with_path(path)
            .with_source(err)
    })?;
    let content = read_all(file, options).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read input file")
            .with_path(path)
            .with_source(err)
    })?;
    debug!(path = %path.display(), bytes = content.len(), "loaded input file");
    Ok(content)
}

/// Read all of stdin into a buffer. Used by the CLI when the input argument
/// is `-`.
pub fn load_stdin(options: &LoadOptions) -> Result<Vec<u8>, Error> {
    let content = read_all(io::stdin().lock(), options).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read stdin")
            .with_source(err)
    })?;
    debug!(bytes = content.len(), "loaded stdin");
    Ok(content)
}

fn read_all(mut reader: impl Read, options: &LoadOptions) -> io::Result<Vec<u8>> {
    let mut content = Vec::with_capacity(options.initial_capacity);
    reader.read_to_end(&mut content)?;
    Ok(content)
}
