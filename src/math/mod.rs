pub mod matrix;
pub mod ops;
pub mod vector;

pub use matrix::{Matrix, MatrixMut, MatrixRef};
pub use vector::Vector;
