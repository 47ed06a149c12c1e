//! Error types for bytecode buffer operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bytecode buffer operations
#[derive(Error, Debug)]
pub enum BytecodeError {
    #[error("Bytecode buffer is empty, nothing to save")]
    EmptyBuffer,

    #[error("Bytecode file {path:?} is empty")]
    EmptyFile { path: PathBuf },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Short write: expected {expected} bytes, wrote {written}")]
    ShortWrite { expected: usize, written: usize },

    #[error("Size mismatch: expected {expected} bytes, read {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

impl BytecodeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BytecodeError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying failure was a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(self, BytecodeError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Convenient Result type
pub type Result<T> = std::result::Result<T, BytecodeError>;
