//! Complex Schur form by implicitly shifted QR iteration on a Hessenberg matrix

use super::decompositions::SchurDecomposition;
use super::hessenberg::reduce_with_q;
use super::helpers::validate_square_matrix;
use super::work::ComplexMatrix;
use crate::array::NdArray;
use crate::dtype::Complex128;
use crate::error::{Error, Result};

/// Default cap on QR sweeps per active block
pub(crate) const DEFAULT_MAX_ITERATIONS: usize = 60;

/// Unitary Givens pair `(c, s)` mapping `(x, y)` onto `(v, 0)`
///
/// Falls back to the identity rotation when both inputs are zero.
#[inline]
fn givens(x: Complex128, y: Complex128) -> (Complex128, Complex128, f64) {
    let v = x.magnitude().hypot(y.magnitude());
    if v == 0.0 {
        (Complex128::ONE, Complex128::ZERO, 0.0)
    } else {
        (x / v, y / v, v)
    }
}

/// Apply the rotation to rows `r` and `r + 1`, columns `cols`
#[inline]
fn rotate_rows(
    a: &mut ComplexMatrix,
    r: usize,
    cols: std::ops::Range<usize>,
    c: Complex128,
    s: Complex128,
) {
    let (cc, cs) = (c.conj(), s.conj());
    for k in cols {
        let x = a[(r, k)];
        let y = a[(r + 1, k)];
        a[(r, k)] = cc * x + cs * y;
        a[(r + 1, k)] = c * y - s * x;
    }
}

/// Apply the rotation to columns `col` and `col + 1`, rows `rows`
#[inline]
fn rotate_cols(
    a: &mut ComplexMatrix,
    col: usize,
    rows: std::ops::Range<usize>,
    c: Complex128,
    s: Complex128,
) {
    let (cc, cs) = (c.conj(), s.conj());
    for k in rows {
        let x = a[(k, col)];
        let y = a[(k, col + 1)];
        a[(k, col)] = c * x + s * y;
        a[(k, col + 1)] = cc * y - cs * x;
    }
}

/// One implicit-shift QR sweep over the active block `[n0, n1)`
///
/// The first rotation introduces the shift, the rest chase the resulting
/// bulge down the subdiagonal. Rotations touch the full rows and columns so
/// that `a` stays similar to the original matrix, and are mirrored into `q`
/// when accumulating.
fn qr_step(
    n0: usize,
    n1: usize,
    a: &mut ComplexMatrix,
    mut q: Option<&mut ComplexMatrix>,
    shift: Complex128,
) {
    let n = a.n();

    let (c, s, _) = givens(a[(n0, n0)] - shift, a[(n0 + 1, n0)]);
    rotate_rows(a, n0, n0..n, c, s);
    rotate_cols(a, n0, 0..n1.min(n0 + 3), c, s);
    if let Some(q) = q.as_deref_mut() {
        rotate_cols(q, n0, 0..n, c, s);
    }

    for j in n0..n1.saturating_sub(2) {
        let (c, s, v) = givens(a[(j + 1, j)], a[(j + 2, j)]);
        a[(j + 1, j)] = Complex128::new(v, 0.0);
        a[(j + 2, j)] = Complex128::ZERO;

        rotate_rows(a, j + 1, j + 1..n, c, s);
        rotate_cols(a, j + 1, 0..n1.min(j + 4), c, s);
        if let Some(q) = q.as_deref_mut() {
            rotate_cols(q, j + 1, 0..n, c, s);
        }
    }
}

/// Wilkinson shift from the trailing 2×2 block of `[.., n1)`
///
/// The block is divided by its largest entry before the discriminant is
/// formed and the chosen root is scaled back afterwards.
fn wilkinson_shift(a: &ComplexMatrix, n1: usize) -> Complex128 {
    let block = [
        a[(n1 - 2, n1 - 2)],
        a[(n1 - 2, n1 - 1)],
        a[(n1 - 1, n1 - 2)],
        a[(n1 - 1, n1 - 1)],
    ];
    let m = block.iter().map(|z| z.abs1()).fold(0.0, f64::max);
    if m == 0.0 || !m.is_finite() {
        return block[3];
    }
    let [p, b, c, d] = block.map(|z| z / m);

    let t = p + d;
    let diff = d - p;
    let disc = diff * diff + (c * b).scale(4.0);
    let root = if disc.re > 0.0 {
        disc.sqrt()
    } else {
        (-disc).sqrt() * Complex128::I
    };

    let first = (t + root).scale(0.5);
    let second = (t - root).scale(0.5);
    let closer = if (d - first).magnitude() > (d - second).magnitude() {
        second
    } else {
        first
    };
    closer.scale(m)
}

/// Reduce an upper Hessenberg matrix to upper triangular Schur form in place
///
/// Deflated eigenvalues stay on the diagonal in the order they converge.
/// When `q` is given, every rotation is also applied to it from the right.
pub(crate) fn hessenberg_qr(
    a: &mut ComplexMatrix,
    mut q: Option<&mut ComplexMatrix>,
    max_iterations: usize,
) -> Result<()> {
    let n = a.n();
    if n == 1 {
        return Ok(());
    }
    let eps = f64::EPSILON;

    // Frobenius norm of the Hessenberg band, folded with hypot to stay finite
    let mut norm = 0.0f64;
    for x in 0..n {
        for y in 0..(x + 2).min(n) {
            norm = norm.hypot(a[(y, x)].magnitude());
        }
    }
    let norm = norm / n as f64;
    if norm == 0.0 {
        return Ok(());
    }

    let mut its = 0usize;
    let mut sweeps = 0usize;
    let (mut n0, mut n1) = (0usize, n);

    loop {
        let mut k = n0;
        while k + 1 < n1 {
            let mut s = a[(k, k)].abs1() + a[(k + 1, k + 1)].abs1();
            if s < eps * norm {
                s = norm;
            }
            if a[(k + 1, k)].magnitude() < eps * s {
                break;
            }
            k += 1;
        }

        if k + 1 < n1 {
            log::trace!("qr deflation at ({}, {}) after {} iterations", k + 1, k, its);
            a[(k + 1, k)] = Complex128::ZERO;
            n0 = k + 1;
            its = 0;
            if n0 + 1 >= n1 {
                n0 = 0;
                n1 = k + 1;
                if n1 < 2 {
                    log::debug!("qr converged: n={n}, {sweeps} sweeps");
                    return Ok(());
                }
            }
            continue;
        }

        let shift = match its % 30 {
            10 => a[(n1 - 1, n1 - 2)],
            20 => Complex128::new(a[(n1 - 1, n1 - 2)].magnitude(), 0.0),
            29 => Complex128::new(norm, 0.0),
            _ => wilkinson_shift(a, n1),
        };

        its += 1;
        sweeps += 1;
        qr_step(n0, n1, a, q.as_deref_mut(), shift);

        if its > max_iterations {
            log::debug!("qr gave up on block [{n0}, {n1}) after {its} iterations");
            return Err(Error::NoConvergence { iterations: its });
        }
    }
}

/// Complex Schur decomposition `A = Q·T·Qᴴ`
///
/// `T` is upper triangular with the eigenvalues of `A` on its diagonal.
/// Both factors use the complex counterpart of the input dtype.
pub fn schur(a: &NdArray) -> Result<SchurDecomposition> {
    validate_square_matrix(a.shape())?;
    let dtype = a.dtype().complex_counterpart();

    let (mut q, mut t) = reduce_with_q(ComplexMatrix::from_array(a));
    hessenberg_qr(&mut t, Some(&mut q), DEFAULT_MAX_ITERATIONS)?;

    Ok(SchurDecomposition {
        q: q.to_array(dtype)?,
        t: t.to_array(dtype)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;

    #[test]
    fn test_wilkinson_shift_picks_closer_root() {
        // Trailing block [[1, 0], [0, 5]] has eigenvalues 1 and 5
        let mut a = ComplexMatrix::zeros(2);
        a[(0, 0)] = Complex128::new(1.0, 0.0);
        a[(1, 1)] = Complex128::new(5.0, 0.0);
        assert_eq!(wilkinson_shift(&a, 2), Complex128::new(5.0, 0.0));
    }

    #[test]
    fn test_wilkinson_shift_scales_with_block() {
        // [[0, 1], [-1, 0]] has eigenvalues ±i
        for scale in [1.0, 1e160, 1e-160] {
            let mut a = ComplexMatrix::zeros(2);
            a[(0, 1)] = Complex128::new(scale, 0.0);
            a[(1, 0)] = Complex128::new(-scale, 0.0);
            let shift = wilkinson_shift(&a, 2);
            assert!(shift.re.abs() <= 1e-15 * scale, "{scale:e}: {shift:?}");
            assert!(
                (shift.im.abs() - scale).abs() <= 1e-15 * scale,
                "{scale:e}: {shift:?}"
            );
        }
    }

    #[test]
    fn test_huge_entries_still_deflate_correctly() {
        let mut a = ComplexMatrix::zeros(2);
        a[(0, 1)] = Complex128::new(1e160, 0.0);
        a[(1, 0)] = Complex128::new(-1e160, 0.0);
        hessenberg_qr(&mut a, None, DEFAULT_MAX_ITERATIONS).unwrap();
        for i in 0..2 {
            assert!((a[(i, i)].magnitude() / 1e160 - 1.0).abs() < 1e-12);
        }
        assert!((a[(0, 0)] + a[(1, 1)]).magnitude() < 1e-12 * 1e160);
    }

    #[test]
    fn test_schur_triangular_and_similar() {
        let a = NdArray::from_rows(
            &[[2.0, -1.0, 0.0], [1.0, 3.0, 1.0], [0.5, -2.0, 1.0]],
            DType::F64,
        )
        .unwrap();
        let SchurDecomposition { q, t } = schur(&a).unwrap();

        for row in 1..3 {
            for col in 0..row {
                assert_eq!(t.item(&[row, col]).unwrap().magnitude(), 0.0);
            }
        }

        let back = q.matmul(&t).unwrap().matmul(&q.conj().transpose()).unwrap();
        let diff = back.sub(&a.astype(DType::Complex128)).unwrap();
        assert!(crate::ops::norm(&diff) < 1e-10);
    }

    #[test]
    fn test_zero_matrix_is_schur() {
        let a = NdArray::zeros(&[3, 3], DType::F64).unwrap();
        let dec = schur(&a).unwrap();
        assert!(dec.t.real().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_iteration_cap() {
        // NaN never deflates
        let mut a = ComplexMatrix::identity(3);
        a[(1, 0)] = Complex128::new(f64::NAN, 0.0);
        a[(2, 1)] = Complex128::new(1.0, 0.0);
        assert_eq!(
            hessenberg_qr(&mut a, None, 5),
            Err(Error::NoConvergence { iterations: 6 })
        );
    }
}
