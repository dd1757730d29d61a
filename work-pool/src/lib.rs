//! A fixed-size pool of OS-thread workers fed by a sealed job queue.
//!
//! `work-pool` runs a finite batch of jobs on a fixed number of workers and
//! hands the results back to a single collector. Both hand-off queues are
//! bounded tokio channels sized to the batch, so neither the producer nor the
//! workers ever wait on the other side.
//!
//! # Lifecycle
//!
//! - **Start**: all jobs are enqueued, the job queue is sealed, workers spawn
//! - **Drain**: workers claim jobs until the sealed queue runs dry
//! - **Shutdown**: a coordinator joins every worker, then seals the result queue
//!
//! # Example
//!
//! ```no_run
//! use work_pool::WorkerPool;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), work_pool::Error> {
//!     let pool = WorkerPool::new(4)?;
//!     let mut completion = pool.spawn(0..8u64, |x| x * 2)?;
//!
//!     let mut sum = 0;
//!     while let Some(r) = completion.recv().await {
//!         sum += r;
//!     }
//!     completion.finish().await?;
//!     assert_eq!(sum, 56);
//!     Ok(())
//! }
//! ```

mod error;
mod pool;
mod queue;

pub use error::Error;
pub use pool::{Completion, PoolStats, WorkerPool};
pub use queue::{JobQueue, JobSender, job_queue};
