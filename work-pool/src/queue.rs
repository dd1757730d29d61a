//! Sealed job queue shared by the pool's workers.

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Mutex, mpsc};
use tracing::trace;

use crate::Error;

/// Creates a bounded job queue able to hold `capacity` jobs.
///
/// The queue has a single producer ([`JobSender`]) and any number of
/// consumers ([`JobQueue`] handles). Sizing it to the full job count lets the
/// producer enqueue every job up front without ever waiting on a consumer.
pub fn job_queue<J>(capacity: usize) -> (JobSender<J>, JobQueue<J>) {
    let capacity = capacity.max(1);
    let (tx, rx) = mpsc::channel(capacity);
    let sender = JobSender {
        tx,
        capacity,
        pushed: 0,
    };
    let queue = JobQueue {
        inner: Arc::new(Mutex::new(rx)),
    };
    (sender, queue)
}

/// Producing half of a job queue.
///
/// Dropping it (or calling [`JobSender::seal`]) seals the queue: consumers
/// drain whatever is left and then observe the end of the queue.
pub struct JobSender<J> {
    tx: mpsc::Sender<J>,
    capacity: usize,
    pushed: usize,
}

impl<J> JobSender<J> {
    /// Enqueues a job without blocking.
    pub fn push(&mut self, job: J) -> Result<(), Error> {
        match self.tx.try_send(job) {
            Ok(()) => {
                self.pushed += 1;
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(Error::QueueFull(self.capacity)),
            Err(TrySendError::Closed(_)) => Err(Error::QueueSealed),
        }
    }

    /// Seals the queue, returning how many jobs were enqueued.
    pub fn seal(self) -> usize {
        trace!(jobs = self.pushed, "sealing job queue");
        self.pushed
    }
}

/// Consuming half of a job queue. Cloning yields another handle on the same queue.
pub struct JobQueue<J> {
    inner: Arc<Mutex<mpsc::Receiver<J>>>,
}

impl<J> Clone for JobQueue<J> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<J> JobQueue<J> {
    /// Claims the next job.
    ///
    /// Blocks the calling thread while the queue is empty but not yet sealed,
    /// and returns `None` once it is sealed and drained. Must be called from a
    /// plain thread (e.g. inside `spawn_blocking`), never from async code.
    pub fn claim(&self) -> Option<J> {
        self.inner.blocking_lock().blocking_recv()
    }
}
