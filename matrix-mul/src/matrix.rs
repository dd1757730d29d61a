//! Dense row-major matrix type.

use std::fmt;

use crate::Error;

/// Shape of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub rows: usize,
    pub cols: usize,
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// An immutable, rectangular matrix of `f64`.
///
/// Every row has the same length and there is at least one row and one
/// column. Multiplication never mutates its inputs; it builds a new `Matrix`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: Vec<Vec<f64>>,
}

impl Matrix {
    /// Builds a matrix from its rows, checking the shape invariants.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, Error> {
        let cols = rows.first().map_or(0, |row| row.len());
        if cols == 0 {
            return Err(Error::EmptyMatrix);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(|r| r.len())
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(Error::NotRectangular {
                row,
                expected: cols,
                found,
            });
        }
        Ok(Self { rows })
    }

    /// The `n`x`n` identity matrix. `n` must be at least 1.
    pub fn identity(n: usize) -> Result<Self, Error> {
        let rows = (0..n)
            .map(|i| {
                let mut row = vec![0.0; n];
                row[i] = 1.0;
                row
            })
            .collect();
        Self::from_rows(rows)
    }

    pub fn dims(&self) -> Dims {
        Dims {
            rows: self.rows.len(),
            cols: self.rows[0].len(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows[0].len()
    }

    /// Row `i`. Panics if `i` is out of bounds.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    /// Element at row `i`, column `j`. Panics if out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }

    /// Exact equality on the bit patterns of every element.
    ///
    /// Unlike `==`, a NaN equals an identical NaN, and `0.0` differs from `-0.0`.
    pub fn bitwise_eq(&self, other: &Matrix) -> bool {
        self.dims() == other.dims()
            && self
                .rows_iter()
                .zip(other.rows_iter())
                .all(|(x, y)| x.iter().zip(y).all(|(a, b)| a.to_bits() == b.to_bits()))
    }
}

/// Checks that `a` (NxM) can be multiplied by `b` (MxP).
pub fn check_compatible(a: &Matrix, b: &Matrix) -> Result<(), Error> {
    let (da, db) = (a.dims(), b.dims());
    if da.cols != db.rows {
        return Err(Error::DimensionMismatch(da.rows, da.cols, db.rows, db.cols));
    }
    Ok(())
}
