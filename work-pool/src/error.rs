//! Error types for work-pool operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("worker pool needs at least one worker")]
    NoWorkers,

    #[error("job queue is full (capacity {0})")]
    QueueFull(usize),

    #[error("job queue is sealed")]
    QueueSealed,

    #[error("worker failed: {0}")]
    WorkerFailed(#[from] tokio::task::JoinError),
}
