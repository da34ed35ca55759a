//! Numerical algorithms built on [`NdArray`](crate::array::NdArray)
//!
//! - [`linalg`] - inverse, Hessenberg reduction, Schur form, eigendecomposition

pub mod linalg;
