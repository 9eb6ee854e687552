//! Training data for a network: a fixed-width table where each row holds the
//! input values followed by the target values.
//!
//! Text format (see [`parse_table`]):
//! - whitespace/newline separated floating-point tokens, read row-major
//! - the row count is the number of non-blank lines
//! - the column count is supplied by the caller

use std::path::Path;

use crate::error::{NnError, NnResult};
use crate::math::matrix::Matrix;

const XOR_TABLE: &str = include_str!("../../data/xor.txt");

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    table: Matrix,
    input_width: usize,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

impl Dataset {
    /// Splits every row of `table` into `input_width` inputs and the remaining
    /// target columns. At least one column must be left for the target.
    pub fn from_table(table: Matrix, input_width: usize) -> NnResult<Dataset> {
        if input_width == 0 || input_width >= table.cols() {
            return Err(NnError::mismatch(
                "dataset",
                (table.rows(), input_width + 1),
                table.shape(),
            ));
        }
        Ok(Dataset { table, input_width })
    }

    /// Builds a dataset from owned rows; all rows must share one width.
    pub fn from_rows(rows: &[Vec<f32>], input_width: usize) -> NnResult<Dataset> {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(NnError::mismatch("dataset", (1, cols), (1, row.len())));
            }
            data.extend_from_slice(row);
        }
        Dataset::from_table(Matrix::from_vec(rows.len(), cols, data)?, input_width)
    }

    /// Reads a table of `column_count` columns from `path`.
    pub fn load<P: AsRef<Path>>(path: P, column_count: usize, input_width: usize) -> NnResult<Dataset> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| NnError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Dataset::from_table(parse_table(&text, column_count)?, input_width)
    }

    /// The four-row XOR truth table `{x1, x2, y}`.
    pub fn xor() -> NnResult<Dataset> {
        Dataset::from_table(parse_table(XOR_TABLE, 3)?, 2)
    }

    pub fn len(&self) -> usize {
        self.table.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.table.rows() == 0
    }

    pub fn input_width(&self) -> usize {
        self.input_width
    }

    pub fn target_width(&self) -> usize {
        self.table.cols() - self.input_width
    }

    pub fn table(&self) -> &Matrix {
        &self.table
    }

    pub fn input(&self, i: usize) -> &[f32] {
        &self.table.row(i)[..self.input_width]
    }

    pub fn target(&self, i: usize) -> &[f32] {
        &self.table.row(i)[self.input_width..]
    }

    /// `(input, target)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f32], &[f32])> + '_ {
        (0..self.len()).map(move |i| (self.input(i), self.target(i)))
    }
}

/// Parses whitespace-separated floats into a `rows x column_count` table,
/// where `rows` is the number of non-blank lines in `text`.
pub fn parse_table(text: &str, column_count: usize) -> NnResult<Matrix> {
    let row_count = text.lines().filter(|l| !l.trim().is_empty()).count();
    let expected = row_count * column_count;

    let mut data = Vec::with_capacity(expected);
    for (line_idx, line) in text.lines().enumerate() {
        for token in line.split_whitespace() {
            if data.len() == expected {
                return Err(NnError::Parse {
                    line: line_idx + 1,
                    reason: format!("unexpected extra token '{}' after {} values", token, expected),
                });
            }
            let value = token.parse::<f32>().map_err(|_| NnError::Parse {
                line: line_idx + 1,
                reason: format!("'{}' is not a valid number", token),
            })?;
            data.push(value);
        }
    }

    if data.len() < expected {
        return Err(NnError::Parse {
            line: text.lines().count(),
            reason: format!(
                "expected {} values ({} rows x {} columns), found {}",
                expected, row_count, column_count, data.len()
            ),
        });
    }

    Matrix::from_vec(row_count, column_count, data)
}
