//! Eigenvectors of an upper triangular matrix by back and forward substitution
//!
//! Both solvers follow the same scheme: the eigenvector for `T[i, i]` has a
//! unit entry at position `i` and is solved outward from there. Near-equal
//! diagonal entries are separated by clamping the divisor to `smin`, and the
//! running vector is rescaled whenever an entry grows past `1/√eps`.

use super::work::ComplexMatrix;
use crate::dtype::Complex128;

/// Shared clamping thresholds for an `n × n` triangular solve
struct Thresholds {
    eps: f64,
    smlnum: f64,
    simin: f64,
}

impl Thresholds {
    fn new(n: usize) -> Self {
        let eps = f64::EPSILON;
        Self {
            eps,
            smlnum: f64::MIN_POSITIVE * (n as f64 / eps),
            simin: 1.0 / eps.sqrt(),
        }
    }

    /// Divisor `T[j, j] - s`, clamped away from zero
    #[inline]
    fn divisor(&self, diag: Complex128, s: Complex128) -> Complex128 {
        let smin = (self.eps * s.magnitude()).max(self.smlnum);
        let t = diag - s;
        if t.magnitude() < smin {
            Complex128::new(smin, 0.0)
        } else {
            t
        }
    }
}

/// Right eigenvectors of upper triangular `t`, one per column
///
/// Column `i` satisfies `T·x = T[i, i]·x` and is zero below row `i`.
pub(crate) fn right_eigenvectors(t: &ComplexMatrix) -> ComplexMatrix {
    let n = t.n();
    let th = Thresholds::new(n);
    let mut er = ComplexMatrix::identity(n);

    for i in 1..n {
        let s = t[(i, i)];
        let mut rmax = 1.0f64;

        for j in (0..i).rev() {
            let mut r = Complex128::ZERO;
            for k in j + 1..=i {
                r += t[(j, k)] * er[(k, i)];
            }
            let value = -r / th.divisor(t[(j, j)], s);
            er[(j, i)] = value;
            rmax = rmax.max(value.magnitude());

            if rmax > th.simin {
                for k in j..=i {
                    er[(k, i)] = er[(k, i)] / rmax;
                }
                rmax = 1.0;
            }
        }

        if rmax != 1.0 {
            for k in 0..=i {
                er[(k, i)] = er[(k, i)] / rmax;
            }
        }
    }

    er
}

/// Left eigenvectors of upper triangular `t`, one per row
///
/// Row `i` satisfies `y·T = T[i, i]·y` and is zero left of column `i`.
pub(crate) fn left_eigenvectors(t: &ComplexMatrix) -> ComplexMatrix {
    let n = t.n();
    let th = Thresholds::new(n);
    let mut el = ComplexMatrix::identity(n);

    for i in 0..n.saturating_sub(1) {
        let s = t[(i, i)];
        let mut rmax = 1.0f64;

        for j in i + 1..n {
            let mut r = Complex128::ZERO;
            for k in i..j {
                r += el[(i, k)] * t[(k, j)];
            }
            let value = -r / th.divisor(t[(j, j)], s);
            el[(i, j)] = value;
            rmax = rmax.max(value.magnitude());

            if rmax > th.simin {
                for k in i..=j {
                    el[(i, k)] = el[(i, k)] / rmax;
                }
                rmax = 1.0;
            }
        }

        if rmax != 1.0 {
            for k in i..n {
                el[(i, k)] = el[(i, k)] / rmax;
            }
        }
    }

    el
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangular(rows: &[[f64; 3]; 3]) -> ComplexMatrix {
        let mut t = ComplexMatrix::zeros(3);
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                t[(i, j)] = Complex128::new(v, 0.0);
            }
        }
        t
    }

    #[test]
    fn test_right_2x2() {
        let mut t = ComplexMatrix::zeros(2);
        t[(0, 0)] = Complex128::new(1.0, 0.0);
        t[(0, 1)] = Complex128::new(2.0, 0.0);
        t[(1, 1)] = Complex128::new(3.0, 0.0);

        let er = right_eigenvectors(&t);
        assert_eq!(er[(0, 1)], Complex128::new(1.0, 0.0));
        assert_eq!(er[(1, 1)], Complex128::new(1.0, 0.0));

        let el = left_eigenvectors(&t);
        assert_eq!(el[(0, 0)], Complex128::new(1.0, 0.0));
        assert_eq!(el[(0, 1)], Complex128::new(-1.0, 0.0));
    }

    #[test]
    fn test_residuals_3x3() {
        let t = triangular(&[[2.0, 1.0, -1.0], [0.0, -1.0, 4.0], [0.0, 0.0, 5.0]]);
        let er = right_eigenvectors(&t);
        let el = left_eigenvectors(&t);

        let tr = t.matmul(&er);
        let lt = el.matmul(&t);
        for i in 0..3 {
            let lambda = t[(i, i)];
            for k in 0..3 {
                assert!((tr[(k, i)] - er[(k, i)] * lambda).magnitude() < 1e-12);
                assert!((lt[(i, k)] - el[(i, k)] * lambda).magnitude() < 1e-12);
            }
        }
    }

    #[test]
    fn test_repeated_diagonal_stays_finite() {
        let t = triangular(&[[1.0, 1.0, 0.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]]);
        let er = right_eigenvectors(&t);
        let el = left_eigenvectors(&t);
        for i in 0..3 {
            for j in 0..3 {
                assert!(er[(i, j)].is_finite());
                assert!(el[(i, j)].is_finite());
                assert!(er[(i, j)].magnitude() <= 1.0);
            }
        }
    }
}
