use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{NnError, NnResult};
use crate::math::matrix::{alloc_zeroed, fill_uniform, MatrixMut, MatrixRef};

/// Dense 1-D container of `f32`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    /// Allocates a zero-filled vector of `len` elements.
    pub fn zeros(len: usize) -> NnResult<Vector> {
        Ok(Vector { data: alloc_zeroed(len)? })
    }

    pub fn from_vec(data: Vec<f32>) -> Vector {
        Vector { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Overwrites every element with an independent sample from `[low, high)`;
    /// every element becomes `low` when `low == high`. Panics if `low > high`.
    pub fn fill_random_uniform<R: Rng + ?Sized>(&mut self, rng: &mut R, low: f32, high: f32) {
        fill_uniform(&mut self.data, rng, low, high);
    }

    /// Elementwise copy from `src`. Lengths must match; on mismatch `self` is untouched.
    pub fn copy_from_slice(&mut self, src: &[f32]) -> NnResult<()> {
        if src.len() != self.data.len() {
            return Err(NnError::mismatch("copy", (1, self.data.len()), (1, src.len())));
        }
        self.data.copy_from_slice(src);
        Ok(())
    }

    pub fn copy_from(&mut self, src: &Vector) -> NnResult<()> {
        self.copy_from_slice(&src.data)
    }

    /// Borrows the buffer as a `1 x len` matrix without copying.
    pub fn as_row(&self) -> MatrixRef<'_> {
        MatrixRef::new(1, self.data.len(), &self.data)
    }

    /// Mutable `1 x len` view; writes through it land in this vector.
    pub fn as_row_mut(&mut self) -> MatrixMut<'_> {
        let len = self.data.len();
        MatrixMut::new(1, len, &mut self.data)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for x in &self.data {
            write!(f, "{:.2} ", x)?;
        }
        Ok(())
    }
}
