//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use matrix_mul::Error;

/// Multiplies two matrices sequentially and in parallel, then reports the speedup.
#[derive(Debug, Clone, Parser)]
#[command(name = "matmul-bench", version)]
pub struct Config {
    /// Number of workers for the parallel run
    #[arg(short = 'p', default_value_t = 4, allow_negative_numbers = true)]
    pub workers: i64,

    /// Input file for matrix A
    #[arg(short = 'a', default_value = "A.txt")]
    pub matrix_a: PathBuf,

    /// Input file for matrix B
    #[arg(short = 'b', default_value = "B.txt")]
    pub matrix_b: PathBuf,

    /// Directory the result files are written to
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    pub out_dir: PathBuf,

    /// How rows are handed to the parallel workers
    #[arg(short = 's', long, value_enum, default_value_t = Strategy::Queue)]
    pub strategy: Strategy,
}

/// Row distribution used by the parallel run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Strategy {
    /// Workers claim one row at a time from a shared queue
    #[default]
    Queue,
    /// Each worker gets one contiguous block of rows up front
    Blocked,
}

impl Config {
    /// The validated worker count.
    pub fn worker_count(&self) -> Result<usize, Error> {
        usize::try_from(self.workers)
            .ok()
            .filter(|&w| w > 0)
            .ok_or(Error::InvalidWorkerCount(self.workers))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: 4,
            matrix_a: PathBuf::from("A.txt"),
            matrix_b: PathBuf::from("B.txt"),
            out_dir: PathBuf::from("."),
            strategy: Strategy::Queue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_mul::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["matmul-bench"]).unwrap();
        assert_eq!(config.workers, 4);
        assert_eq!(config.matrix_a, PathBuf::from("A.txt"));
        assert_eq!(config.matrix_b, PathBuf::from("B.txt"));
        assert_eq!(config.out_dir, PathBuf::from("."));
        assert_eq!(config.strategy, Strategy::Queue);
        assert_eq!(config.worker_count().unwrap(), 4);
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "matmul-bench",
            "-p",
            "8",
            "-a",
            "x.txt",
            "-b",
            "y.txt",
            "--strategy",
            "blocked",
        ])
        .unwrap();
        assert_eq!(config.worker_count().unwrap(), 8);
        assert_eq!(config.matrix_a, PathBuf::from("x.txt"));
        assert_eq!(config.matrix_b, PathBuf::from("y.txt"));
        assert_eq!(config.strategy, Strategy::Blocked);
    }

    #[test]
    fn test_invalid_worker_counts() {
        for raw in ["0", "-3"] {
            let config = Config::try_parse_from(["matmul-bench", "-p", raw]).unwrap();
            let err = config.worker_count().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config);
        }
    }

    #[test]
    fn test_non_numeric_worker_count_rejected_by_parser() {
        assert!(Config::try_parse_from(["matmul-bench", "-p", "many"]).is_err());
    }
}
