//! Error type for a benchmark run.

use matrix_mul::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Matrix(#[from] matrix_mul::Error),

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Matrix(e) => e.kind(),
            Error::Report(_) => ErrorKind::Io,
        }
    }
}
