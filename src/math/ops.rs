//! In-place kernels over borrowed matrices.
//!
//! Every kernel checks shapes before touching `dst`, so a rejected call leaves
//! the destination exactly as it was. Destinations are `&mut MatrixMut`, which
//! the borrow checker keeps disjoint from the `MatrixRef` operands.

use crate::error::{NnError, NnResult};
use crate::math::matrix::{MatrixMut, MatrixRef};

/// `dst = a * b`.
///
/// Requires `a.cols == b.rows`, `dst.rows == a.rows` and `dst.cols == b.cols`.
pub fn multiply(dst: &mut MatrixMut<'_>, a: MatrixRef<'_>, b: MatrixRef<'_>) -> NnResult<()> {
    let (a_rows, a_cols) = a.shape();
    let (b_rows, b_cols) = b.shape();
    if a_cols != b_rows {
        return Err(NnError::mismatch("multiply", (a_cols, b_cols), b.shape()));
    }
    if dst.shape() != (a_rows, b_cols) {
        return Err(NnError::mismatch("multiply", (a_rows, b_cols), dst.shape()));
    }

    for i in 0..a_rows {
        for j in 0..b_cols {
            let mut sum = 0.0;
            for k in 0..a_cols {
                sum += a.at(i, k) * b.at(k, j);
            }
            dst.set(i, j, sum);
        }
    }
    Ok(())
}

/// `dst += a`, elementwise.
pub fn add_in_place(dst: &mut MatrixMut<'_>, a: MatrixRef<'_>) -> NnResult<()> {
    if dst.shape() != a.shape() {
        return Err(NnError::mismatch("add_in_place", dst.shape(), a.shape()));
    }
    for (d, x) in dst.data_mut().iter_mut().zip(a.data()) {
        *d += x;
    }
    Ok(())
}

/// Replaces every element `x` with `f(x)`.
pub fn apply_elementwise<F>(dst: &mut MatrixMut<'_>, f: F)
where
    F: Fn(f32) -> f32,
{
    for x in dst.data_mut().iter_mut() {
        *x = f(*x);
    }
}

/// Elementwise copy of `src` into `dst`.
pub fn copy(dst: &mut MatrixMut<'_>, src: MatrixRef<'_>) -> NnResult<()> {
    if dst.shape() != src.shape() {
        return Err(NnError::mismatch("copy", dst.shape(), src.shape()));
    }
    dst.data_mut().copy_from_slice(src.data());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Matrix, Vector};

    fn m(rows: usize, cols: usize, data: &[f32]) -> Matrix {
        Matrix::from_vec(rows, cols, data.to_vec()).unwrap()
    }

    #[test]
    fn multiply_computes_dense_product() {
        let a = m(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = m(3, 2, &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let mut dst = Matrix::zeros(2, 2).unwrap();
        multiply(&mut dst.view_mut(), a.view(), b.view()).unwrap();
        assert_eq!(dst.data(), &[58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn multiply_rejects_inner_mismatch_without_writing() {
        let a = m(2, 3, &[1.0; 6]);
        let b = m(2, 2, &[1.0; 4]);
        let mut dst = m(2, 2, &[-1.0, -2.0, -3.0, -4.0]);
        let err = multiply(&mut dst.view_mut(), a.view(), b.view()).unwrap_err();
        match err {
            NnError::DimensionMismatch { op, expected, found } => {
                assert_eq!(op, "multiply");
                // `b` must have `a.cols` rows; report its real shape.
                assert_eq!(expected, (3, 2));
                assert_eq!(found, (2, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(dst.data(), &[-1.0, -2.0, -3.0, -4.0]);
    }

    #[test]
    fn multiply_rejects_wrong_destination_shape() {
        let a = m(1, 2, &[1.0, 1.0]);
        let b = m(2, 3, &[1.0; 6]);
        let mut dst = m(1, 2, &[5.0, 5.0]);
        assert!(multiply(&mut dst.view_mut(), a.view(), b.view()).is_err());
        assert_eq!(dst.data(), &[5.0, 5.0]);
    }

    #[test]
    fn adding_zeros_after_multiply_is_a_no_op() {
        for &(r, k, c) in &[(1, 1, 1), (1, 2, 3), (3, 2, 1), (4, 4, 4)] {
            let a = Matrix::from_vec(r, k, (0..r * k).map(|x| x as f32 * 0.5 - 1.0).collect()).unwrap();
            let b = Matrix::from_vec(k, c, (0..k * c).map(|x| 2.0 - x as f32).collect()).unwrap();
            let mut dst = Matrix::zeros(r, c).unwrap();
            multiply(&mut dst.view_mut(), a.view(), b.view()).unwrap();
            let product = dst.clone();
            add_in_place(&mut dst.view_mut(), Matrix::zeros(r, c).unwrap().view()).unwrap();
            assert_eq!(dst, product);
        }
    }

    #[test]
    fn add_in_place_rejects_shape_mismatch() {
        let mut dst = m(1, 2, &[1.0, 2.0]);
        assert!(add_in_place(&mut dst.view_mut(), m(2, 1, &[3.0, 4.0]).view()).is_err());
        assert_eq!(dst.data(), &[1.0, 2.0]);
        add_in_place(&mut dst.view_mut(), m(1, 2, &[3.0, 4.0]).view()).unwrap();
        assert_eq!(dst.data(), &[4.0, 6.0]);
    }

    #[test]
    fn apply_elementwise_maps_every_element() {
        let mut v = Vector::from_vec(vec![1.0, -2.0, 3.0]);
        apply_elementwise(&mut v.as_row_mut(), |x| x * x);
        assert_eq!(v.data(), &[1.0, 4.0, 9.0]);
    }

    #[test]
    fn row_view_shares_storage_with_vector() {
        let input = Vector::from_vec(vec![1.0, 2.0]);
        let weights = m(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let mut out = Vector::zeros(2).unwrap();
        multiply(&mut out.as_row_mut(), input.as_row(), weights.view()).unwrap();
        assert_eq!(out.data(), input.data());
    }
}
