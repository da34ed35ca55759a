//! General (non-symmetric) eigendecomposition

use super::decompositions::{EigOptions, EigenDecomposition};
use super::eigenvectors::{left_eigenvectors, right_eigenvectors};
use super::helpers::validate_square_matrix;
use super::hessenberg::{accumulate, clear_below_subdiagonal, reduce};
use super::schur::hessenberg_qr;
use super::work::ComplexMatrix;
use crate::array::NdArray;
use crate::error::Result;

/// Eigenvalues and optionally left/right eigenvectors of a square matrix
///
/// The matrix is reduced to Hessenberg form, brought to complex Schur form
/// `A = Q·T·Qᴴ` by shifted QR, and the eigenvectors of `T` are mapped back
/// through `Q`. All outputs use the complex counterpart of the input dtype.
///
/// Eigenvalues appear in the order of the Schur diagonal, not sorted.
/// Right eigenvectors are the columns of `right`, left eigenvectors the rows
/// of `left`, each scaled to unit Euclidean norm.
///
/// # Errors
///
/// - `ShapeMismatch` / `InvalidArgument` if `a` is not a square matrix
/// - `NoConvergence` if one active block needs more than
///   `options.max_iterations` QR sweeps
///
/// # Example
///
/// ```
/// use ndmat::prelude::*;
///
/// // Rotation by 90°: eigenvalues ±i
/// let a = NdArray::from_rows(&[[0.0, -1.0], [1.0, 0.0]], DType::F64)?;
/// let dec = eig(&a, EigOptions::default())?;
/// let mut ims: Vec<f64> = dec
///     .eigenvalues
///     .to_vec::<Complex128>()
///     .iter()
///     .map(|z| z.im)
///     .collect();
/// ims.sort_by(|x, y| x.total_cmp(y));
/// assert!((ims[0] + 1.0).abs() < 1e-12 && (ims[1] - 1.0).abs() < 1e-12);
/// assert!(dec.right.is_some() && dec.left.is_none());
/// # Ok::<(), ndmat::error::Error>(())
/// ```
pub fn eig(a: &NdArray, options: EigOptions) -> Result<EigenDecomposition> {
    let n = validate_square_matrix(a.shape())?;
    let dtype = a.dtype().complex_counterpart();
    let wants_vectors = options.left || options.right;

    let mut t = ComplexMatrix::from_array(a);
    if n == 1 {
        let unit = ComplexMatrix::identity(1);
        return Ok(EigenDecomposition {
            eigenvalues: t.diagonal(dtype)?,
            left: options.left.then(|| unit.to_array(dtype)).transpose()?,
            right: options.right.then(|| unit.to_array(dtype)).transpose()?,
        });
    }

    let tau = reduce(&mut t);
    let mut q = if wants_vectors {
        let mut q = t.clone();
        accumulate(&mut q, &tau);
        Some(q)
    } else {
        None
    };
    clear_below_subdiagonal(&mut t);

    hessenberg_qr(&mut t, q.as_mut(), options.max_iterations)?;
    log::debug!(
        "eig: n={n}, left={}, right={}",
        options.left,
        options.right
    );

    let eigenvalues = t.diagonal(dtype)?;
    let (left, right) = match q {
        Some(q) => {
            let left = if options.left {
                let mut el = left_eigenvectors(&t).matmul(&q.adjoint());
                normalize_rows(&mut el);
                Some(el.to_array(dtype)?)
            } else {
                None
            };
            let right = if options.right {
                let mut er = q.matmul(&right_eigenvectors(&t));
                normalize_columns(&mut er);
                Some(er.to_array(dtype)?)
            } else {
                None
            };
            (left, right)
        }
        None => (None, None),
    };

    Ok(EigenDecomposition {
        eigenvalues,
        left,
        right,
    })
}

/// Eigenvalues only, skipping the accumulation of `Q`
pub fn eigvals(a: &NdArray) -> Result<NdArray> {
    Ok(eig(a, EigOptions::values_only())?.eigenvalues)
}

fn normalize_columns(m: &mut ComplexMatrix) {
    let n = m.n();
    for col in 0..n {
        let norm = (0..n).fold(0.0f64, |acc, row| acc.hypot(m[(row, col)].magnitude()));
        if norm > 0.0 {
            for row in 0..n {
                m[(row, col)] = m[(row, col)] / norm;
            }
        }
    }
}

fn normalize_rows(m: &mut ComplexMatrix) {
    let n = m.n();
    for row in 0..n {
        let norm = (0..n).fold(0.0f64, |acc, col| acc.hypot(m[(row, col)].magnitude()));
        if norm > 0.0 {
            for col in 0..n {
                m[(row, col)] = m[(row, col)] / norm;
            }
        }
    }
}
