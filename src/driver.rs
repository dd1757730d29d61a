//! Loads the inputs, times both multipliers and writes their results.

use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use matrix_mul::{check_compatible, io, parallel, sequential};
use tracing::{info, warn};

use crate::Error;
use crate::config::{Config, Strategy};

pub const SEQUENTIAL_OUTPUT: &str = "C_out_secuencial.txt";
pub const PARALLEL_OUTPUT: &str = "C_out_paralelo.txt";

/// Timings of one run.
#[derive(Debug, Clone)]
pub struct Report {
    pub workers: usize,
    pub sequential: Duration,
    pub parallel: Duration,
    pub results_match: bool,
}

impl Report {
    /// Sequential time over parallel time, if the parallel time is non-zero.
    pub fn speedup(&self) -> Option<f64> {
        let parallel = self.parallel.as_secs_f64();
        (parallel > 0.0).then(|| self.sequential.as_secs_f64() / parallel)
    }
}

fn sequential_line(elapsed: Duration) -> String {
    format!("Tiempo secuencial: {:.6} segundos", elapsed.as_secs_f64())
}

fn parallel_line(workers: usize, elapsed: Duration) -> String {
    format!(
        "Tiempo paralelo ({} goroutines): {:.6} segundos",
        workers,
        elapsed.as_secs_f64()
    )
}

fn speedup_line(speedup: f64) -> String {
    format!("Speedup: {:.2}x", speedup)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", sequential_line(self.sequential))?;
        writeln!(f, "{}", parallel_line(self.workers, self.parallel))?;
        if let Some(speedup) = self.speedup() {
            writeln!(f, "{}", speedup_line(speedup))?;
        }
        Ok(())
    }
}

/// Runs both multiplications, writing each timing line to `out` as soon as
/// its stage finishes.
///
/// Everything that can be validated up front (worker count, both inputs,
/// their shapes) is checked before any multiplication starts, so a failed run
/// leaves no output files behind.
pub async fn run(config: &Config, out: &mut impl Write) -> Result<Report, Error> {
    let workers = config.worker_count()?;

    let a = io::load(&config.matrix_a).await?;
    let b = io::load(&config.matrix_b).await?;
    check_compatible(&a, &b)?;
    info!(a = %a.dims(), b = %b.dims(), workers, strategy = ?config.strategy, "matrices loaded");

    let start = Instant::now();
    let c_seq = sequential::multiply(&a, &b)?;
    let sequential_time = start.elapsed();
    info!(elapsed = ?sequential_time, "sequential multiply done");
    io::store(config.out_dir.join(SEQUENTIAL_OUTPUT), &c_seq).await?;
    writeln!(out, "{}", sequential_line(sequential_time))?;

    let start = Instant::now();
    let c_par = match config.strategy {
        Strategy::Queue => parallel::multiply(Arc::new(a), Arc::new(b), workers).await?,
        Strategy::Blocked => parallel::multiply_blocked(&a, &b, workers)?,
    };
    let parallel_time = start.elapsed();
    info!(elapsed = ?parallel_time, workers, "parallel multiply done");
    io::store(config.out_dir.join(PARALLEL_OUTPUT), &c_par).await?;
    writeln!(out, "{}", parallel_line(workers, parallel_time))?;

    let report = Report {
        workers,
        sequential: sequential_time,
        parallel: parallel_time,
        results_match: c_seq.bitwise_eq(&c_par),
    };
    if !report.results_match {
        warn!("sequential and parallel results differ");
    }
    if let Some(speedup) = report.speedup() {
        writeln!(out, "{}", speedup_line(speedup))?;
    }

    Ok(report)
}
