//! Fixed-size worker pool with a coordinator that seals the result queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::Error;
use crate::queue::{JobQueue, job_queue};

/// A fixed number of OS-thread workers consuming a shared job queue.
///
/// Each call to [`WorkerPool::spawn`] runs one batch:
/// 1. Every job is enqueued up front and the job queue is sealed
/// 2. `workers` threads claim jobs until the queue is drained
/// 3. Every result is published on a result queue sized to hold all of them
/// 4. A coordinator waits for all workers, then seals the result queue
///
/// The caller drains the results through the returned [`Completion`].
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
}

/// Per-worker job counts for a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub per_worker: Vec<usize>,
}

impl PoolStats {
    /// Total number of jobs handled by all workers.
    pub fn total(&self) -> usize {
        self.per_worker.iter().sum()
    }
}

/// Handle on a running batch.
pub struct Completion<R> {
    results: mpsc::Receiver<R>,
    coordinator: JoinHandle<Result<PoolStats, Error>>,
}

impl<R> Completion<R> {
    /// Receives the next result, in completion order.
    ///
    /// Returns `None` once every worker has exited and the coordinator has
    /// sealed the result queue.
    pub async fn recv(&mut self) -> Option<R> {
        self.results.recv().await
    }

    /// Waits for the coordinator and returns the batch statistics.
    ///
    /// Fails with [`Error::WorkerFailed`] if any worker panicked.
    pub async fn finish(self) -> Result<PoolStats, Error> {
        drop(self.results);
        self.coordinator.await?
    }
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self, Error> {
        if workers == 0 {
            return Err(Error::NoWorkers);
        }
        Ok(Self { workers })
    }

    /// Starts a batch of jobs on the pool.
    ///
    /// The jobs are collected up front so both queues can be sized to the
    /// whole batch. Must be called from within a tokio runtime.
    pub fn spawn<I, J, R, F>(&self, jobs: I, work: F) -> Result<Completion<R>, Error>
    where
        I: IntoIterator<Item = J>,
        J: Send + 'static,
        R: Send + 'static,
        F: Fn(J) -> R + Send + Sync + 'static,
    {
        let jobs: Vec<J> = jobs.into_iter().collect();
        let capacity = jobs.len();

        let (mut sender, queue) = job_queue(capacity);
        for job in jobs {
            sender.push(job)?;
        }
        let queued = sender.seal();
        debug!(jobs = queued, workers = self.workers, "job queue sealed");

        let (result_tx, results) = mpsc::channel(capacity.max(1));
        let work = Arc::new(work);

        let handles: Vec<JoinHandle<usize>> = (0..self.workers)
            .map(|id| {
                let queue = queue.clone();
                let results = result_tx.clone();
                let work = Arc::clone(&work);
                tokio::task::spawn_blocking(move || run_worker(id, &queue, &results, &*work))
            })
            .collect();

        let coordinator = tokio::spawn(async move {
            let mut stats = PoolStats::default();
            for handle in handles {
                stats.per_worker.push(handle.await?);
            }
            drop(result_tx);
            debug!(
                jobs = stats.total(),
                per_worker = ?stats.per_worker,
                "all workers done, result queue sealed"
            );
            Ok::<_, Error>(stats)
        });

        Ok(Completion {
            results,
            coordinator,
        })
    }
}

fn run_worker<J, R>(
    id: usize,
    queue: &JobQueue<J>,
    results: &mpsc::Sender<R>,
    work: &impl Fn(J) -> R,
) -> usize {
    let mut handled = 0;
    while let Some(job) = queue.claim() {
        if results.blocking_send(work(job)).is_err() {
            warn!(worker = id, "result queue closed, stopping worker");
            break;
        }
        handled += 1;
    }
    trace!(worker = id, handled, "job queue drained");
    handled
}
