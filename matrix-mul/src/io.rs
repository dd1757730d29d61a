//! Reading and writing matrices as whitespace-delimited text.
//!
//! One matrix row per line, values separated by whitespace. Blank lines are
//! skipped on input. Output uses single spaces and 15 digits after the
//! decimal point, with a newline after every row.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::debug;

use crate::Error;
use crate::matrix::Matrix;

const DECIMALS: usize = 15;

/// Reads a matrix from a text file.
pub async fn load(path: impl AsRef<Path>) -> Result<Matrix, Error> {
    let path = path.as_ref();
    let read_err = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).await.map_err(read_err)?;
    let mut lines = BufReader::new(file).lines();
    let mut parser = RowParser::new(path);
    while let Some(line) = lines.next_line().await.map_err(read_err)? {
        parser.push_line(&line)?;
    }

    let matrix = parser.finish()?;
    debug!(path = %path.display(), dims = %matrix.dims(), "loaded matrix");
    Ok(matrix)
}

/// Writes a matrix to a text file, creating or truncating it.
pub async fn store(path: impl AsRef<Path>, matrix: &Matrix) -> Result<(), Error> {
    let path = path.as_ref();
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).await.map_err(write_err)?;
    let mut out = BufWriter::new(file);
    for row in matrix.rows_iter() {
        let mut line = format_row(row);
        line.push('\n');
        out.write_all(line.as_bytes()).await.map_err(write_err)?;
    }
    out.flush().await.map_err(write_err)?;

    debug!(path = %path.display(), dims = %matrix.dims(), "stored matrix");
    Ok(())
}

/// Formats one row: space-separated, fixed 15-decimal precision, no newline.
pub fn format_row(row: &[f64]) -> String {
    row.iter()
        .map(|v| format!("{:.*}", DECIMALS, v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Accumulates rows line by line, enforcing a rectangular shape.
struct RowParser {
    path: PathBuf,
    line_no: usize,
    rows: Vec<Vec<f64>>,
}

impl RowParser {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            line_no: 0,
            rows: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) -> Result<(), Error> {
        self.line_no += 1;
        if line.trim().is_empty() {
            return Ok(());
        }

        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|source| Error::Parse {
                    path: self.path.clone(),
                    line: self.line_no,
                    token: token.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(first) = self.rows.first() {
            if first.len() != row.len() {
                return Err(Error::RaggedRow {
                    path: self.path.clone(),
                    line: self.line_no,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }

        self.rows.push(row);
        Ok(())
    }

    fn finish(self) -> Result<Matrix, Error> {
        if self.rows.is_empty() {
            return Err(Error::EmptyFile { path: self.path });
        }
        Matrix::from_rows(self.rows)
    }
}
