//! Error types for Laser Logic
//!
//! Storage I/O is the only external failure class. Beam evaluation itself
//! cannot fail.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which step of a storage operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Open,
    Read,
    Create,
    Write,
    Close,
}

impl StorageOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageOp::Open => "open",
            StorageOp::Read => "read",
            StorageOp::Create => "create",
            StorageOp::Write => "write",
            StorageOp::Close => "close",
        }
    }

    /// Numeric cause for this step on the read or write path
    fn base_code(&self, writing: bool) -> i32 {
        match (self, writing) {
            (StorageOp::Open, false) => 10,
            (StorageOp::Read, _) => 11,
            (StorageOp::Close, false) => 12,
            (StorageOp::Create, _) => 20,
            (StorageOp::Open, true) => 21,
            (StorageOp::Write, _) => 22,
            (StorageOp::Close, true) => 23,
        }
    }
}

impl fmt::Display for StorageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to {op} {}: {source}", .path.display())]
    Storage {
        op: StorageOp,
        writing: bool,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("puzzle file has {got} bytes, expected {expected}")]
    PuzzleFileSize { expected: usize, got: usize },

    #[error("puzzle {index} is invalid: {reason}")]
    InvalidPuzzle { index: usize, reason: String },

    #[error("puzzle index {index} is out of range (0-{max})")]
    PuzzleIndex { index: usize, max: usize },

    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn reading(op: StorageOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Storage {
            op,
            writing: false,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn writing(op: StorageOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Storage {
            op,
            writing: true,
            path: path.into(),
            source,
        }
    }

    /// Numeric cause shown on the error screen (0 for non-storage errors)
    pub fn code(&self) -> i32 {
        match self {
            Error::Storage { op, writing, .. } => op.base_code(*writing),
            _ => 0,
        }
    }

    /// "reading" or "writing" for storage errors
    pub fn direction(&self) -> &'static str {
        match self {
            Error::Storage { writing: true, .. } => "writing",
            _ => "reading",
        }
    }
}
