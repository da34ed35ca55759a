//! Matrix inverse via Gauss-Jordan elimination

use super::decompositions::{InverseOptions, Pivoting};
use super::helpers::validate_square_matrix;
use super::scalar::LinalgElement;
use crate::array::{NdArray, Shape, Storage};
use crate::dtype::{Complex128, DType};
use crate::error::{Error, Result};

/// Matrix inverse with default options
///
/// See [`inv_with`].
pub fn inv(a: &NdArray) -> Result<NdArray> {
    inv_with(a, InverseOptions::default())
}

/// Matrix inverse via Gauss-Jordan elimination on `[A | I]`
///
/// Real dtypes are eliminated in `f64`, complex dtypes in complex128. The
/// result keeps the input dtype, except int32 which is returned as float64.
///
/// # Errors
///
/// - `ShapeMismatch` / `InvalidArgument` if `a` is not a square matrix
/// - `SingularMatrix` if a pivot column has no nonzero candidate
///
/// # Example
///
/// ```
/// use ndmat::prelude::*;
///
/// let a = NdArray::from_rows(&[[4.0, 7.0], [2.0, 6.0]], DType::F64)?;
/// let a_inv = inv(&a)?;
/// let expected = [0.6, -0.7, -0.2, 0.4];
/// for (x, e) in a_inv.to_vec::<f64>().iter().zip(expected) {
///     assert!((x - e).abs() < 1e-12);
/// }
/// # Ok::<(), ndmat::error::Error>(())
/// ```
pub fn inv_with(a: &NdArray, options: InverseOptions) -> Result<NdArray> {
    let n = validate_square_matrix(a.shape())?;
    let out_dtype = a.dtype().float_counterpart();

    let out = if a.is_complex() {
        into_storage(inverse_typed::<Complex128>(a, n, options.pivoting)?, out_dtype)
    } else {
        into_storage(inverse_typed::<f64>(a, n, options.pivoting)?, out_dtype)
    };
    Ok(NdArray::from_storage(Shape::from_validated(&[n, n]), out))
}

fn into_storage<T: LinalgElement>(values: Vec<T>, dtype: DType) -> Storage {
    let mut out = Storage::zeros(values.len(), dtype);
    for (i, value) in values.into_iter().enumerate() {
        let (re, im) = value.into_parts();
        out.store_parts(i, re, im);
    }
    out
}

fn inverse_typed<T: LinalgElement>(a: &NdArray, n: usize, pivoting: Pivoting) -> Result<Vec<T>> {
    let width = 2 * n;
    let storage = a.storage();

    // Augmented [A | I], row-major n × 2n
    let mut aug = vec![T::ZERO; n * width];
    let mut scale = 0.0f64;
    for row in 0..n {
        for col in 0..n {
            let v = T::load(storage, row * n + col);
            scale = scale.max(v.abs_val());
            aug[row * width + col] = v;
        }
        aug[row * width + n + row] = T::ONE;
    }
    let tiny = f64::EPSILON * scale * n as f64;

    for i in 0..n {
        let pivot_row = select_pivot(&aug, width, n, i, pivoting)
            .ok_or(Error::SingularMatrix { column: i })?;
        if pivot_row != i {
            swap_rows(&mut aug, width, i, pivot_row);
        }

        let pivot = aug[i * width + i];
        if pivot.abs_val() <= tiny {
            log::warn!(
                "gauss-jordan pivot {:.3e} in column {} is tiny relative to matrix scale {:.3e}",
                pivot.abs_val(),
                i,
                scale
            );
        }

        for j in 0..width {
            aug[i * width + j] = aug[i * width + j] / pivot;
        }

        for r in 0..n {
            if r == i {
                continue;
            }
            let factor = aug[r * width + i];
            if factor.is_zero_val() {
                continue;
            }
            for j in 0..width {
                let delta = factor * aug[i * width + j];
                aug[r * width + j] = aug[r * width + j] - delta;
            }
        }
    }

    Ok((0..n)
        .flat_map(|row| aug[row * width + n..(row + 1) * width].to_vec())
        .collect())
}

/// Row to use as pivot for column `col`, `None` if the column has no nonzero candidate
fn select_pivot<T: LinalgElement>(
    aug: &[T],
    width: usize,
    n: usize,
    col: usize,
    pivoting: Pivoting,
) -> Option<usize> {
    let entry = |row: usize| aug[row * width + col];
    match pivoting {
        Pivoting::FirstNonzero => (col..n).find(|&row| !entry(row).is_zero_val()),
        Pivoting::Partial => {
            let (best, magnitude) = (col..n)
                .map(|row| (row, entry(row).abs_val()))
                .fold((col, 0.0f64), |acc, cand| if cand.1 > acc.1 { cand } else { acc });
            (magnitude > 0.0).then_some(best)
        }
    }
}

fn swap_rows<T>(aug: &mut [T], width: usize, a: usize, b: usize) {
    let (lo, hi) = (a.min(b), a.max(b));
    let (head, tail) = aug.split_at_mut(hi * width);
    head[lo * width..(lo + 1) * width].swap_with_slice(&mut tail[..width]);
}
