//! Reduction to upper Hessenberg form by complex Householder reflections
//!
//! The reduction runs in two phases. [`reduce`] walks the rows bottom-up and
//! annihilates everything left of the subdiagonal, storing each reflector in
//! the row it cleared plus a scalar in `T`. [`accumulate`] replays those
//! reflectors on a copy of the reduced matrix to build the unitary `Q` with
//! `A = Q·H·Qᴴ`.

use super::decompositions::HessenbergDecomposition;
use super::helpers::validate_square_matrix;
use super::work::ComplexMatrix;
use crate::array::NdArray;
use crate::dtype::Complex128;
use crate::error::{Error, Result};

/// Phase 0: two-sided reduction in place
///
/// On return the upper Hessenberg part of `a` holds `H`; row `i` left of
/// column `i - 1` holds the reflector vector for step `i` and the returned
/// vector holds its scalar. Callers must clear below the subdiagonal
/// ([`clear_below_subdiagonal`]) before using `a` as `H`.
pub(crate) fn reduce(a: &mut ComplexMatrix) -> Vec<Complex128> {
    let n = a.n();
    let mut t = vec![Complex128::ZERO; n];

    for i in (2..n).rev() {
        let scale: f64 = (0..i).map(|k| a[(i, k)].abs1()).sum();
        let scale_inv = 1.0 / scale;
        if scale == 0.0 || !scale_inv.is_finite() {
            t[i] = Complex128::ZERO;
            a[(i, i - 1)] = Complex128::ZERO;
            continue;
        }

        let mut h = 0.0;
        for k in 0..i {
            a[(i, k)] = a[(i, k)].scale(scale_inv);
            h += a[(i, k)].magnitude_squared();
        }

        let f_val = a[(i, i - 1)];
        let f = f_val.magnitude();
        let g = h.sqrt();
        a[(i, i - 1)] = Complex128::new(-g * scale, 0.0);

        if f == 0.0 {
            t[i] = Complex128::new(g, 0.0);
        } else {
            let phase = f_val / f;
            t[i] = f_val + phase.scale(g);
            a[(i, i - 1)] *= phase;
        }

        h += g * f;
        let h = 1.0 / h.sqrt();
        t[i] = t[i].scale(h);
        for k in 0..i - 1 {
            a[(i, k)] = a[(i, k)].scale(h);
        }

        // Right application on the rows above
        for j in 0..i {
            let mut g = t[i].conj() * a[(j, i - 1)];
            for k in 0..i - 1 {
                g += a[(i, k)].conj() * a[(j, k)];
            }
            a[(j, i - 1)] -= g * t[i];
            for k in 0..i - 1 {
                let v = a[(i, k)];
                a[(j, k)] -= g * v;
            }
        }

        // Left application on every column
        for j in 0..n {
            let mut g = t[i] * a[(i - 1, j)];
            for k in 0..i - 1 {
                g += a[(i, k)] * a[(k, j)];
            }
            a[(i - 1, j)] -= g * t[i].conj();
            for k in 0..i - 1 {
                let v = a[(i, k)].conj();
                a[(k, j)] -= g * v;
            }
        }
    }

    t
}

/// Phase 1: build `Q` from the reflectors left in `q` by [`reduce`]
///
/// `q` must be a copy of the reduced matrix; it is overwritten with `Q`.
pub(crate) fn accumulate(q: &mut ComplexMatrix, t: &[Complex128]) {
    let n = q.n();
    if n == 1 {
        q[(0, 0)] = Complex128::ONE;
        return;
    }

    q[(0, 0)] = Complex128::ONE;
    q[(1, 1)] = Complex128::ONE;
    q[(0, 1)] = Complex128::ZERO;
    q[(1, 0)] = Complex128::ZERO;

    for i in 2..n {
        if !t[i].is_zero() {
            for j in 0..i {
                let mut g = t[i] * q[(i - 1, j)];
                for k in 0..i - 1 {
                    g += q[(i, k)] * q[(k, j)];
                }
                q[(i - 1, j)] -= g * t[i].conj();
                for k in 0..i - 1 {
                    let v = q[(i, k)].conj();
                    q[(k, j)] -= g * v;
                }
            }
        }

        q[(i, i)] = Complex128::ONE;
        for j in 0..i {
            q[(j, i)] = Complex128::ZERO;
            q[(i, j)] = Complex128::ZERO;
        }
    }
}

/// Zero every entry with `row > col + 1`
pub(crate) fn clear_below_subdiagonal(a: &mut ComplexMatrix) {
    let n = a.n();
    for col in 0..n {
        for row in col + 2..n {
            a[(row, col)] = Complex128::ZERO;
        }
    }
}

/// Full reduction of a working matrix: returns `(Q, H)`
pub(crate) fn reduce_with_q(mut a: ComplexMatrix) -> (ComplexMatrix, ComplexMatrix) {
    let t = reduce(&mut a);
    let mut q = a.clone();
    accumulate(&mut q, &t);
    clear_below_subdiagonal(&mut a);
    (q, a)
}

/// Hessenberg decomposition `A = Q·H·Qᴴ`
///
/// Works for real and complex input; both factors use the complex
/// counterpart of the input dtype.
///
/// # Example
///
/// ```
/// use ndmat::prelude::*;
///
/// let a = NdArray::from_rows(
///     &[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]],
///     DType::F64,
/// )?;
/// let HessenbergDecomposition { q, h } = hessenberg(&a)?;
/// assert_eq!(h.item(&[2, 0])?, Scalar::Complex(Complex128::ZERO));
/// assert_eq!(q.dtype(), DType::Complex128);
/// # Ok::<(), ndmat::error::Error>(())
/// ```
pub fn hessenberg(a: &NdArray) -> Result<HessenbergDecomposition> {
    validate_square_matrix(a.shape())?;
    let dtype = a.dtype().complex_counterpart();
    let (q, h) = reduce_with_q(ComplexMatrix::from_array(a));
    Ok(HessenbergDecomposition {
        q: q.to_array(dtype)?,
        h: h.to_array(dtype)?,
    })
}

/// Reduce a complex matrix to Hessenberg form in place, returning `Q`
///
/// On success `a` holds `H`. Real arrays cannot hold the complex result and
/// are rejected with `UnsupportedDType`.
pub fn hessenberg_in_place(a: &mut NdArray) -> Result<NdArray> {
    if !a.is_complex() {
        return Err(Error::unsupported_dtype(a.dtype(), "hessenberg_in_place"));
    }
    validate_square_matrix(a.shape())?;

    let dtype = a.dtype();
    let (q, h) = reduce_with_q(ComplexMatrix::from_array(a));
    *a = h.to_array(dtype)?;
    q.to_array(dtype)
}
