//! Error types for matrix-mul operations.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}:{line}: invalid number {token:?}: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
        source: std::num::ParseFloatError,
    },

    #[error("{}:{line}: row has {found} values, expected {expected}", path.display())]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{}: file contains no matrix rows", path.display())]
    EmptyFile { path: PathBuf },

    #[error("matrix must have at least one row and one column")]
    EmptyMatrix,

    #[error("row {row} has {found} values, expected {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("matrix dimension mismatch: A is {0}x{1}, B is {2}x{3}")]
    DimensionMismatch(usize, usize, usize, usize),

    #[error("invalid worker count {0}: at least one worker is required")]
    InvalidWorkerCount(i64),

    #[error("worker pool error: {0}")]
    Pool(#[from] work_pool::Error),

    #[error("block worker {0} panicked")]
    BlockWorkerFailed(usize),

    #[error("row {0} was produced more than once")]
    DuplicateRow(usize),

    #[error("row {0} was never produced")]
    MissingRow(usize),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File open, read or write failure, or an input file with no rows.
    Io,
    /// Input text that does not describe a rectangular numeric grid.
    Format,
    /// Matrices whose shapes cannot be multiplied.
    Dimension,
    /// Invalid caller configuration.
    Config,
    /// Failure inside the worker pool.
    Pool,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Read { .. } | Error::Write { .. } | Error::EmptyFile { .. } => ErrorKind::Io,
            Error::Parse { .. }
            | Error::RaggedRow { .. }
            | Error::EmptyMatrix
            | Error::NotRectangular { .. } => ErrorKind::Format,
            Error::DimensionMismatch(..) => ErrorKind::Dimension,
            Error::InvalidWorkerCount(_) => ErrorKind::Config,
            Error::Pool(work_pool::Error::NoWorkers) => ErrorKind::Config,
            Error::Pool(_)
            | Error::BlockWorkerFailed(_)
            | Error::DuplicateRow(_)
            | Error::MissingRow(_) => ErrorKind::Pool,
        }
    }
}
