//! Row-partitioned parallel multiplication.
//!
//! Two ways of handing rows to workers:
//!
//! - [`multiply`]: each output row is one job. A fixed pool of workers claims
//!   row indices from a sealed queue, computes whole rows against the shared,
//!   read-only inputs and publishes `(row, values)` pairs. The collector
//!   scatters every pair into its slot by index, so completion order never
//!   affects the result.
//! - [`multiply_blocked`]: rows are split up front into contiguous blocks,
//!   one per worker, and each worker writes straight into its own disjoint
//!   slice of the output.

use std::ops::Range;
use std::sync::Arc;
use std::thread;

use tracing::debug;
use work_pool::WorkerPool;

use crate::Error;
use crate::matrix::{Matrix, check_compatible};
use crate::sequential::compute_row;

/// One computed row of the output matrix.
struct RowResult {
    row: usize,
    values: Vec<f64>,
}

/// Computes `C = A × B` using `workers` threads.
///
/// The result is identical, bit for bit, to [`crate::sequential::multiply`]:
/// only the distribution of rows is parallel, each row is accumulated in the
/// same order. More workers than rows is fine; the surplus exit immediately.
pub async fn multiply(a: Arc<Matrix>, b: Arc<Matrix>, workers: usize) -> Result<Matrix, Error> {
    if workers == 0 {
        return Err(Error::InvalidWorkerCount(0));
    }
    check_compatible(&a, &b)?;

    let n = a.row_count();
    let pool = WorkerPool::new(workers)?;
    let mut completion = pool.spawn(0..n, move |row| RowResult {
        row,
        values: compute_row(&a, &b, row),
    })?;

    let mut slots: Vec<Option<Vec<f64>>> = vec![None; n];
    while let Some(RowResult { row, values }) = completion.recv().await {
        let slot = &mut slots[row];
        if slot.is_some() {
            return Err(Error::DuplicateRow(row));
        }
        *slot = Some(values);
    }

    let stats = completion.finish().await?;
    debug!(rows = n, workers, per_worker = ?stats.per_worker, "parallel multiply done");

    let rows = slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| slot.ok_or(Error::MissingRow(i)))
        .collect::<Result<Vec<_>, _>>()?;
    Matrix::from_rows(rows)
}

/// Computes `C = A × B` with a static block partition over `workers` threads.
///
/// Worker `p` gets `N / workers` consecutive rows, and the first
/// `N % workers` workers get one extra. Workers left with no rows are not
/// started. The result is identical, bit for bit, to
/// [`crate::sequential::multiply`].
pub fn multiply_blocked(a: &Matrix, b: &Matrix, workers: usize) -> Result<Matrix, Error> {
    if workers == 0 {
        return Err(Error::InvalidWorkerCount(0));
    }
    check_compatible(a, b)?;

    let n = a.row_count();
    let blocks = block_ranges(n, workers);
    let mut rows: Vec<Vec<f64>> = vec![Vec::new(); n];
    let mut rest = rows.as_mut_slice();

    thread::scope(|scope| {
        let handles: Vec<_> = blocks
            .iter()
            .filter(|block| !block.is_empty())
            .map(|block| {
                let (slots, tail) = std::mem::take(&mut rest).split_at_mut(block.len());
                rest = tail;
                let start = block.start;
                scope.spawn(move || {
                    for (offset, slot) in slots.iter_mut().enumerate() {
                        *slot = compute_row(a, b, start + offset);
                    }
                })
            })
            .collect();

        for (worker, handle) in handles.into_iter().enumerate() {
            handle
                .join()
                .map_err(|_| Error::BlockWorkerFailed(worker))?;
        }
        Ok::<_, Error>(())
    })?;

    debug!(rows = n, workers, blocks = ?blocks, "blocked multiply done");
    Matrix::from_rows(rows)
}

/// Splits `0..n` into `workers` contiguous ranges, spreading the remainder
/// over the first ranges.
pub fn block_ranges(n: usize, workers: usize) -> Vec<Range<usize>> {
    let per_worker = n / workers;
    let extra = n % workers;
    let mut start = 0;
    (0..workers)
        .map(|p| {
            let len = per_worker + usize::from(p < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::sequential;

    fn mat(rows: &[&[f64]]) -> Arc<Matrix> {
        Arc::new(Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap())
    }

    #[tokio::test]
    async fn test_2x2_every_worker_count() {
        let a = mat(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = mat(&[&[5.0, 6.0], &[7.0, 8.0]]);
        let expected = Matrix::from_rows(vec![vec![19.0, 22.0], vec![43.0, 50.0]]).unwrap();

        for workers in 1..=4 {
            let c = multiply(Arc::clone(&a), Arc::clone(&b), workers)
                .await
                .unwrap();
            assert_eq!(c, expected, "workers = {}", workers);
        }
        assert_eq!(sequential::multiply(&a, &b).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_single_output_row() {
        let a = mat(&[&[1.0, 2.0, 3.0]]);
        let b = mat(&[&[4.0], &[5.0], &[6.0]]);
        let c = multiply(a, b, 4).await.unwrap();
        assert_eq!(c.into_rows(), vec![vec![32.0]]);
    }

    #[tokio::test]
    async fn test_zero_workers_is_config_error() {
        let a = mat(&[&[1.0]]);
        let err = multiply(Arc::clone(&a), a, 0).await.unwrap_err();
        assert!(matches!(err, Error::InvalidWorkerCount(0)));
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[tokio::test]
    async fn test_mismatch_rejected_before_spawning() {
        let a = mat(&[&[1.0, 2.0]]);
        let b = mat(&[&[1.0], &[2.0], &[3.0]]);
        let err = multiply(a, b, 2).await.unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch(1, 2, 3, 1)));
    }

    #[test]
    fn test_block_ranges() {
        assert_eq!(block_ranges(10, 3), vec![0..4, 4..7, 7..10]);
        assert_eq!(block_ranges(4, 4), vec![0..1, 1..2, 2..3, 3..4]);
        assert_eq!(block_ranges(2, 4), vec![0..1, 1..2, 2..2, 2..2]);
        assert_eq!(block_ranges(7, 1), vec![0..7]);
    }

    #[test]
    fn test_blocked_matches_sequential() {
        let a = mat(&[
            &[1.0, 0.5, -2.0],
            &[2.0, -1.0, 0.25],
            &[0.0, 3.0, 1.5],
            &[4.0, 4.0, 4.0],
            &[-0.5, 0.1, 9.0],
        ]);
        let b = mat(&[&[2.0, 4.0], &[6.0, 8.0], &[0.3, -0.7]]);
        let expected = sequential::multiply(&a, &b).unwrap();

        for workers in [1, 2, 3, 5, 10] {
            let c = multiply_blocked(&a, &b, workers).unwrap();
            assert!(c.bitwise_eq(&expected), "workers = {}", workers);
        }
    }

    #[test]
    fn test_blocked_rejects_bad_input() {
        let a = mat(&[&[1.0, 2.0]]);
        assert!(matches!(
            multiply_blocked(&a, &a, 2),
            Err(Error::DimensionMismatch(1, 2, 1, 2))
        ));
        let one = mat(&[&[1.0]]);
        let err = multiply_blocked(&one, &one, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_far_more_workers_than_rows() {
        let a = mat(&[&[1.0, 0.5], &[2.0, -1.0], &[0.0, 3.0]]);
        let b = mat(&[&[2.0, 4.0], &[6.0, 8.0]]);
        let c = multiply(Arc::clone(&a), Arc::clone(&b), 64).await.unwrap();
        assert_eq!(c, sequential::multiply(&a, &b).unwrap());
    }
}
