//! Element-wise arithmetic
//!
//! Binary operations run array-vs-array (identical shapes) or array-vs-scalar
//! and always produce an array of the left operand's dtype. The kernel is
//! picked once per call: two real operands use the real kernel, anything
//! involving a complex value uses the complex kernel. Results written into a
//! real dtype keep the real part; int32 results are truncated toward zero.

use crate::array::{NdArray, Storage};
use crate::dtype::{Complex128, Scalar};
use crate::error::{Error, Result};

/// Binary operation kind
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition: a + b
    Add,
    /// Subtraction: a - b
    Sub,
    /// Multiplication: a * b
    Mul,
    /// Division: a / b
    Div,
}

impl BinaryOp {
    /// Apply to real operands
    #[inline]
    pub fn apply_real(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }

    /// Apply to complex operands
    ///
    /// Division by a complex zero yields NaN components.
    #[inline]
    pub fn apply_complex(self, a: Complex128, b: Complex128) -> Complex128 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }
}

/// Unary operation kind
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation: -a
    Neg,
    /// Complex conjugate: re - im·i (identity on real dtypes)
    Conj,
}

/// Array-vs-array kernel
pub(crate) fn binary_op_impl(a: &NdArray, b: &NdArray, op: BinaryOp) -> Result<NdArray> {
    if a.shape() != b.shape() {
        return Err(Error::shape_mismatch(a.shape(), b.shape()));
    }

    let dtype = a.dtype();
    let len = a.size();
    let mut out = Storage::zeros(len, dtype);

    if !a.is_complex() && !b.is_complex() {
        for (i, (&x, &y)) in a.real().iter().zip(b.real()).enumerate() {
            out.store_parts(i, op.apply_real(x, y), 0.0);
        }
    } else {
        let (lhs, rhs) = (a.storage(), b.storage());
        for i in 0..len {
            let z = op.apply_complex(lhs.load_complex(i), rhs.load_complex(i));
            out.store_parts(i, z.re, z.im);
        }
    }

    Ok(NdArray::from_storage(a.shape_ref().clone(), out))
}

/// Array-vs-scalar kernel
pub(crate) fn scalar_op_impl(a: &NdArray, scalar: Scalar, op: BinaryOp) -> NdArray {
    let dtype = a.dtype();
    let len = a.size();
    let mut out = Storage::zeros(len, dtype);

    match scalar {
        Scalar::Real(s) if !a.is_complex() => {
            for (i, &x) in a.real().iter().enumerate() {
                out.store_parts(i, op.apply_real(x, s), 0.0);
            }
        }
        _ => {
            let s = scalar.to_complex();
            let lhs = a.storage();
            for i in 0..len {
                let z = op.apply_complex(lhs.load_complex(i), s);
                out.store_parts(i, z.re, z.im);
            }
        }
    }

    NdArray::from_storage(a.shape_ref().clone(), out)
}

/// Unary kernel
pub(crate) fn unary_op_impl(a: &NdArray, op: UnaryOp) -> NdArray {
    let src = a.storage();
    let mut out = Storage::zeros(a.size(), a.dtype());
    for i in 0..a.size() {
        let z = src.load_complex(i);
        let z = match op {
            UnaryOp::Neg => -z,
            UnaryOp::Conj => z.conj(),
        };
        out.store_parts(i, z.re, z.im);
    }
    NdArray::from_storage(a.shape_ref().clone(), out)
}

impl NdArray {
    /// Element-wise `self + other`
    pub fn add(&self, other: &NdArray) -> Result<NdArray> {
        binary_op_impl(self, other, BinaryOp::Add)
    }

    /// Element-wise `self - other`
    pub fn sub(&self, other: &NdArray) -> Result<NdArray> {
        binary_op_impl(self, other, BinaryOp::Sub)
    }

    /// Element-wise `self * other`
    pub fn mul(&self, other: &NdArray) -> Result<NdArray> {
        binary_op_impl(self, other, BinaryOp::Mul)
    }

    /// Element-wise `self / other`
    ///
    /// Division by zero is not trapped: floats follow IEEE rules and complex
    /// division by zero yields NaN.
    pub fn div(&self, other: &NdArray) -> Result<NdArray> {
        binary_op_impl(self, other, BinaryOp::Div)
    }

    /// Add a scalar to every element
    pub fn add_scalar(&self, scalar: impl Into<Scalar>) -> NdArray {
        scalar_op_impl(self, scalar.into(), BinaryOp::Add)
    }

    /// Subtract a scalar from every element
    pub fn sub_scalar(&self, scalar: impl Into<Scalar>) -> NdArray {
        scalar_op_impl(self, scalar.into(), BinaryOp::Sub)
    }

    /// Multiply every element by a scalar
    pub fn mul_scalar(&self, scalar: impl Into<Scalar>) -> NdArray {
        scalar_op_impl(self, scalar.into(), BinaryOp::Mul)
    }

    /// Divide every element by a scalar
    pub fn div_scalar(&self, scalar: impl Into<Scalar>) -> NdArray {
        scalar_op_impl(self, scalar.into(), BinaryOp::Div)
    }

    /// Negate every component
    pub fn neg(&self) -> NdArray {
        unary_op_impl(self, UnaryOp::Neg)
    }

    /// Complex conjugate; a plain copy for real dtypes
    pub fn conj(&self) -> NdArray {
        unary_op_impl(self, UnaryOp::Conj)
    }
}
