use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{NnError, NnResult};

/// Dense row-major 2-D container of `f32`.
///
/// Element `(i, j)` lives at `data[i * cols + j]`; `data.len() == rows * cols`
/// holds for every constructed value, including deserialized ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

#[derive(Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = NnError;

    fn try_from(raw: RawMatrix) -> NnResult<Matrix> {
        Matrix::from_vec(raw.rows, raw.cols, raw.data)
    }
}

/// Allocates `len` zeroed floats, reporting exhaustion instead of aborting.
pub(crate) fn alloc_zeroed(len: usize) -> NnResult<Vec<f32>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| NnError::Allocation { requested: len })?;
    data.resize(len, 0.0);
    Ok(data)
}

/// Overwrites `data` with independent samples from `[low, high)`, or with `low`
/// when the range is empty (`low == high`).
///
/// # Panics
/// If `low > high`.
pub(crate) fn fill_uniform<R: Rng + ?Sized>(data: &mut [f32], rng: &mut R, low: f32, high: f32) {
    if low == high {
        data.fill(low);
        return;
    }
    for x in data.iter_mut() {
        *x = rng.gen_range(low..high);
    }
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> NnResult<Matrix> {
        let len = rows
            .checked_mul(cols)
            .ok_or(NnError::Allocation { requested: usize::MAX })?;
        Ok(Matrix { rows, cols, data: alloc_zeroed(len)? })
    }

    /// Wraps an existing row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> NnResult<Matrix> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(NnError::mismatch("from_vec", (rows, cols), (1, data.len())));
        }
        Ok(Matrix { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn at(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.cols + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f32) {
        self.data[i * self.cols + j] = value;
    }

    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn fill_random_uniform<R: Rng + ?Sized>(&mut self, rng: &mut R, low: f32, high: f32) {
        fill_uniform(&mut self.data, rng, low, high);
    }

    /// Elementwise copy; shapes must match and `self` is untouched otherwise.
    pub fn copy_from(&mut self, src: &Matrix) -> NnResult<()> {
        crate::math::ops::copy(&mut self.view_mut(), src.view())
    }

    pub fn view(&self) -> MatrixRef<'_> {
        MatrixRef::new(self.rows, self.cols, &self.data)
    }

    pub fn view_mut(&mut self) -> MatrixMut<'_> {
        MatrixMut::new(self.rows, self.cols, &mut self.data)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.cols)?;
        for i in 0..self.rows {
            writeln!(f)?;
            for x in self.row(i) {
                write!(f, "{:.2} ", x)?;
            }
        }
        Ok(())
    }
}

/// Read-only borrowed matrix. Produced by [`Matrix::view`] or, as a `1 x n`
/// row, by [`Vector::as_row`](crate::math::vector::Vector::as_row).
#[derive(Debug, Clone, Copy)]
pub struct MatrixRef<'a> {
    rows: usize,
    cols: usize,
    data: &'a [f32],
}

impl<'a> MatrixRef<'a> {
    pub(crate) fn new(rows: usize, cols: usize, data: &'a [f32]) -> MatrixRef<'a> {
        debug_assert_eq!(data.len(), rows * cols);
        MatrixRef { rows, cols, data }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &'a [f32] {
        self.data
    }

    pub fn at(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.cols + j]
    }
}

/// Mutable borrowed matrix. Holding one excludes every other borrow of the
/// same buffer, so a destination can never alias an operand.
#[derive(Debug)]
pub struct MatrixMut<'a> {
    rows: usize,
    cols: usize,
    data: &'a mut [f32],
}

impl<'a> MatrixMut<'a> {
    pub(crate) fn new(rows: usize, cols: usize, data: &'a mut [f32]) -> MatrixMut<'a> {
        debug_assert_eq!(data.len(), rows * cols);
        MatrixMut { rows, cols, data }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &[f32] {
        &*self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut *self.data
    }

    pub fn at(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.cols + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f32) {
        self.data[i * self.cols + j] = value;
    }

    pub fn view(&self) -> MatrixRef<'_> {
        MatrixRef::new(self.rows, self.cols, &*self.data)
    }
}
