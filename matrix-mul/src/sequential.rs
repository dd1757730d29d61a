//! Single-threaded reference multiplication.

use crate::Error;
use crate::matrix::{Matrix, check_compatible};

/// Computes `C = A × B` with the classic triple loop.
///
/// This is the correctness oracle for the parallel path: every cell is
/// accumulated left to right over `k`, starting from `0.0`.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, Error> {
    check_compatible(a, b)?;
    let rows = (0..a.row_count()).map(|i| compute_row(a, b, i)).collect();
    Matrix::from_rows(rows)
}

/// Computes row `i` of `A × B`. Shapes must already be compatible.
pub(crate) fn compute_row(a: &Matrix, b: &Matrix, i: usize) -> Vec<f64> {
    let a_row = a.row(i);
    let p = b.col_count();
    let mut out = vec![0.0; p];
    for (j, cell) in out.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (k, &a_ik) in a_row.iter().enumerate() {
            sum += a_ik * b.get(k, j);
        }
        *cell = sum;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_2x2() {
        let a = mat(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = mat(&[&[5.0, 6.0], &[7.0, 8.0]]);
        let c = multiply(&a, &b).unwrap();
        assert_eq!(c, mat(&[&[19.0, 22.0], &[43.0, 50.0]]));
    }

    #[test]
    fn test_row_times_column() {
        let a = mat(&[&[1.0, 2.0, 3.0]]);
        let b = mat(&[&[4.0], &[5.0], &[6.0]]);
        assert_eq!(multiply(&a, &b).unwrap(), mat(&[&[32.0]]));
    }

    #[test]
    fn test_2x3_times_3x2() {
        let a = mat(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let b = mat(&[&[7.0, 8.0], &[9.0, 10.0], &[11.0, 12.0]]);
        assert_eq!(
            multiply(&a, &b).unwrap(),
            mat(&[&[58.0, 64.0], &[139.0, 154.0]])
        );
    }

    #[test]
    fn test_identity_leaves_matrix_unchanged() {
        let a = mat(&[&[1.5, -2.25, 3.0], &[0.1, 0.2, 0.3]]);
        let id = Matrix::identity(3).unwrap();
        assert_eq!(multiply(&a, &id).unwrap(), a);
    }

    #[test]
    fn test_mismatch_rejected() {
        let a = mat(&[&[1.0, 2.0]]);
        let b = mat(&[&[1.0, 2.0]]);
        assert!(matches!(
            multiply(&a, &b),
            Err(Error::DimensionMismatch(1, 2, 1, 2))
        ));
    }
}
