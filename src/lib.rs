//! # ndmat
//!
//! **Dense matrices and vectors with native complex eigensolvers.**
//!
//! ndmat provides 1-D and 2-D arrays over a small set of numeric dtypes
//! (f64, f32, i32, complex64, complex128), together with element-wise
//! arithmetic, matrix products, stacking, norms and a native linear algebra
//! stack: Gauss-Jordan inversion, Hessenberg reduction, complex Schur form
//! and the general eigendecomposition with left and right eigenvectors.
//!
//! ## Features
//!
//! - **Arrays**: Row-major storage, NumPy-style indexing with negative
//!   indices and strided slices, transpose, dtype conversion
//! - **Arithmetic**: Element-wise `+ - * /` against arrays and scalars, with
//!   the result in the left operand's dtype
//! - **Products**: Matrix-matrix and matrix-vector products with dtype
//!   promotion
//! - **Linear algebra**: `inv`, `hessenberg`, `schur`, `eig`, `eigvals`
//! - **No vendor libraries**: Pure Rust kernels, no BLAS or LAPACK
//!
//! ## Quick Start
//!
//! ```rust
//! use ndmat::prelude::*;
//!
//! let a = NdArray::from_rows(&[[2.0, 1.0], [1.0, 3.0]], DType::F64)?;
//! let b = NdArray::from_rows(&[[1.0, 0.0], [0.0, 1.0]], DType::F64)?;
//!
//! let c = (&a + &b)?;
//! let d = a.matmul(&inv(&a)?)?;
//! assert!(norm(&d.sub(&b)?) < 1e-12);
//! assert_eq!(c.item(&[0, 0])?, Scalar::Real(3.0));
//! # Ok::<(), ndmat::error::Error>(())
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade: a `warn` on near-singular
//! pivots during inversion, `debug` summaries of each eigensolve and `trace`
//! records of every QR deflation. Install any logger to see them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod algorithm;
pub mod array;
pub mod dtype;
pub mod error;
pub mod ops;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithm::linalg::{
        EigOptions, EigenDecomposition, HessenbergDecomposition, InverseOptions, Pivoting,
        SchurDecomposition, eig, eigvals, hessenberg, hessenberg_in_place, inv, inv_with, schur,
    };
    pub use crate::array::{Assignment, AxisIndex, NdArray, Selection, Shape, SliceKey};
    pub use crate::dtype::{Complex64, Complex128, DType, Element, Scalar};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{NormOrder, hsplit, hstack, norm, norm_with, vsplit, vstack};
}
