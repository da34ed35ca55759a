//! Decomposition result types and solver options

use crate::array::NdArray;

/// Hessenberg decomposition result: A = Q @ H @ Q^H
///
/// Both factors use the complex counterpart of the input dtype.
#[derive(Clone, Debug, PartialEq)]
pub struct HessenbergDecomposition {
    /// Unitary transformation matrix Q [n, n]
    pub q: NdArray,

    /// Upper Hessenberg matrix H [n, n]
    /// Entries with row > col + 1 are exactly zero
    pub h: NdArray,
}

/// Complex Schur decomposition result: A = Q @ T @ Q^H
///
/// Unlike a real Schur form there are no 2×2 blocks: complex conjugate
/// eigenvalue pairs appear as two separate diagonal entries of T.
#[derive(Clone, Debug, PartialEq)]
pub struct SchurDecomposition {
    /// Unitary matrix Q [n, n]
    pub q: NdArray,

    /// Upper triangular Schur form T [n, n]
    /// Eigenvalues on the diagonal, in deflation order
    pub t: NdArray,
}

/// General eigendecomposition result
///
/// For a square matrix A:
/// - `A @ right[:, i] = eigenvalues[i] * right[:, i]`
/// - `left[i, :] @ A = eigenvalues[i] * left[i, :]`
///
/// Eigenvalues are not sorted; they follow the diagonal of the Schur form.
/// Every returned eigenvector has unit Euclidean norm.
#[derive(Clone, Debug, PartialEq)]
pub struct EigenDecomposition {
    /// Eigenvalues λ [n], complex dtype
    pub eigenvalues: NdArray,

    /// Left eigenvectors as rows [n, n], if requested
    pub left: Option<NdArray>,

    /// Right eigenvectors as columns [n, n], if requested
    pub right: Option<NdArray>,
}

/// Options for [`eig`](super::eig)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EigOptions {
    /// Compute left eigenvectors (rows)
    pub left: bool,
    /// Compute right eigenvectors (columns)
    pub right: bool,
    /// QR sweeps allowed on one active block before giving up
    pub max_iterations: usize,
}

impl Default for EigOptions {
    fn default() -> Self {
        Self {
            left: false,
            right: true,
            max_iterations: super::schur::DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl EigOptions {
    /// Eigenvalues only
    pub fn values_only() -> Self {
        Self {
            left: false,
            right: false,
            ..Self::default()
        }
    }

    /// Set whether left eigenvectors are computed
    pub fn with_left(mut self, left: bool) -> Self {
        self.left = left;
        self
    }

    /// Set whether right eigenvectors are computed
    pub fn with_right(mut self, right: bool) -> Self {
        self.right = right;
        self
    }

    /// Set the per-block QR iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Pivot row selection for Gauss-Jordan inversion
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Pivoting {
    /// Keep the diagonal entry unless it is exactly zero, then take the
    /// first nonzero entry below it
    #[default]
    FirstNonzero,
    /// Take the largest-magnitude entry on or below the diagonal
    Partial,
}

/// Options for [`inv_with`](super::inv_with)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InverseOptions {
    /// Pivot selection policy
    pub pivoting: Pivoting,
}
