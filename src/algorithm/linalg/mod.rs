//! Dense linear algebra on square matrices
//!
//! Every kernel here is native Rust. There is no BLAS or LAPACK dependency.
//!
//! # Module Structure
//!
//! - `decompositions`: Result types and solver options
//! - `inverse`: Gauss-Jordan inversion
//! - `hessenberg`: Householder reduction to upper Hessenberg form
//! - `schur`: Shifted QR iteration to complex Schur form
//! - `eigenvectors`: Triangular eigenvector solvers
//! - `eig`: Eigendecomposition driver
//! - `helpers`: Validation utilities
//!
//! The Hessenberg, Schur and eigen kernels share one pipeline:
//!
//! ```text
//! A ──reduce──▶ H (+Q) ──shifted QR──▶ T (+Q) ──substitution──▶ EL, ER
//! ```
//!
//! Each stage runs in complex128 whatever the input dtype. Results are
//! narrowed to the complex counterpart of the input dtype on the way out.

mod decompositions;
mod eig;
mod eigenvectors;
mod helpers;
mod hessenberg;
mod inverse;
mod scalar;
mod schur;
mod work;

pub use decompositions::{
    EigOptions, EigenDecomposition, HessenbergDecomposition, InverseOptions, Pivoting,
    SchurDecomposition,
};
pub use eig::{eig, eigvals};
pub use helpers::{validate_matrix_2d, validate_square_matrix};
pub use hessenberg::{hessenberg, hessenberg_in_place};
pub use inverse::{inv, inv_with};
pub use scalar::LinalgElement;
pub use schur::schur;
