//! Array operations
//!
//! Element-wise arithmetic and its operator overloads, matrix multiplication,
//! stacking/splitting and norms. Everything here works on [`NdArray`] directly
//! and returns new arrays.
//!
//! [`NdArray`]: crate::array::NdArray

pub mod arithmetic;
pub mod matmul;
mod norm;
mod operators;
mod shape;

pub use arithmetic::{BinaryOp, UnaryOp};
pub use matmul::{MatmulParams, validate_matmul_shapes};
pub use norm::{NormOrder, norm, norm_with};
pub use shape::{hsplit, hstack, vsplit, vstack};
