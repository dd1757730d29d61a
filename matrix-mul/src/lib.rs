//! Dense matrix multiplication, sequential and row-parallel.
//!
//! `matrix-mul` reads matrices from whitespace-delimited text files,
//! multiplies them either with a single-threaded reference loop or on a fixed
//! pool of worker threads, and writes the result back as text.
//!
//! # Parallel Scheme
//!
//! - **Jobs**: one per output row, all enqueued before the workers start
//! - **Workers**: claim row indices and compute whole rows against the
//!   shared, read-only inputs
//! - **Collector**: drains `(row, values)` results and places each by index
//!
//! Every cell is accumulated in the same order on both paths, so the parallel
//! result equals the sequential one exactly.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use matrix_mul::{Matrix, io, parallel, sequential};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), matrix_mul::Error> {
//!     let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
//!     let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]])?;
//!
//!     let seq = sequential::multiply(&a, &b)?;
//!     let par = parallel::multiply(Arc::new(a), Arc::new(b), 4).await?;
//!     assert_eq!(seq, par);
//!     assert_eq!(par.into_rows(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
//!
//!     io::store("C.txt", &seq).await?;
//!     Ok(())
//! }
//! ```

mod error;
pub mod io;
mod matrix;
pub mod parallel;
pub mod sequential;

pub use error::{Error, ErrorKind};
pub use matrix::{Dims, Matrix, check_compatible};
