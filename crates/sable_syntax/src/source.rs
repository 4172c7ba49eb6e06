//! Loaded source files.
//!
//! A [`Source`] owns the raw bytes of one compilation unit together with the
//! path it was read from. It is immutable after loading: the scanner walks
//! the bytes, the literal parsers re-read token ranges out of them, and the
//! diagnostics sink slices them for error context. Nothing mutates them.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use sable_base::Span;

/// Longest accepted source path, in bytes.
pub const MAXIMUM_PATH_SIZE: usize = 255;

/// One loaded source file: its path and its raw bytes.
///
/// The source is the single owner of the input text. Every [`Span`] in the
/// token stream and the AST indexes into `data`.
#[derive(Debug)]
pub struct Source {
    path: String,
    data: Vec<u8>,
}

/// Failure to load a source file.
#[derive(Debug)]
pub enum SourceError {
    /// The path exceeds [`MAXIMUM_PATH_SIZE`] bytes.
    PathTooLong(usize),
    /// The underlying read failed.
    Io(io::Error),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::PathTooLong(len) => {
                write!(f, "path of {} bytes exceeds the {} byte limit", len, MAXIMUM_PATH_SIZE)
            }
            SourceError::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SourceError {
    fn from(e: io::Error) -> Self {
        SourceError::Io(e)
    }
}

impl Source {
    /// Reads the entire file at `path` into an owned buffer.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Source, SourceError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if display.len() > MAXIMUM_PATH_SIZE {
            return Err(SourceError::PathTooLong(display.len()));
        }
        let data = fs::read(path)?;
        Ok(Source { path: display, data })
    }

    /// Wraps an in-memory buffer as a source. Used by tests and the
    /// token-dump driver.
    pub fn from_bytes(path: &str, data: Vec<u8>) -> Result<Source, SourceError> {
        if path.len() > MAXIMUM_PATH_SIZE {
            return Err(SourceError::PathTooLong(path.len()));
        }
        Ok(Source { path: path.to_string(), data })
    }

    /// The path this source was loaded from, for diagnostics.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The raw bytes of the file.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Length of the file in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` for an empty file.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The bytes covered by `span`, clamped to the file.
    pub fn slice(&self, span: Span) -> &[u8] {
        let start = span.start.min(self.data.len());
        let end = span.end.min(self.data.len());
        &self.data[start..end]
    }
}
