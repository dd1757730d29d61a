//! Benchmark driver comparing sequential and row-parallel matrix multiplication.

pub mod config;
pub mod driver;
mod error;

pub use config::{Config, Strategy};
pub use driver::{Report, run};
pub use error::Error;
