//! Data type system for ndmat arrays
//!
//! This module provides the `DType` enum representing all supported element types,
//! the complex value types, the `Scalar` variant used at the element boundary,
//! and the promotion rule used by matrix multiplication.

pub mod complex;
mod element;
mod promotion;
mod scalar;

pub use complex::{Complex64, Complex128};
pub use element::Element;
pub use promotion::promote;
pub use scalar::Scalar;

use std::fmt;

/// Data types supported by ndmat arrays
///
/// Every array stores its values in `f64` planes (a real plane, plus an
/// imaginary plane for complex dtypes). The dtype decides how values are
/// quantized when written and which arithmetic kernel runs.
///
/// # Discriminant Values
///
/// Discriminants are grouped by kind:
/// - Floats: 0-9 (F64=0, F32=1)
/// - Signed ints: 10-19 (I32=11)
/// - Complex: 40-49 (Complex64=40, Complex128=41)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point
    F32 = 1,
    /// 32-bit signed integer
    I32 = 11,
    /// 64-bit complex (two f32: re, im)
    Complex64 = 40,
    /// 128-bit complex (two f64: re, im)
    Complex128 = 41,
}

impl DType {
    /// Size of one element in bytes (as the Rust element type, not the f64 planes)
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::Complex128 => 16,
            Self::F64 | Self::Complex64 => 8,
            Self::F32 | Self::I32 => 4,
        }
    }

    /// Returns true if this is a floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F64 | Self::F32)
    }

    /// Returns true if this is a complex number type
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// Returns true if this is an integer type
    #[inline]
    pub const fn is_int(self) -> bool {
        matches!(self, Self::I32)
    }

    /// Returns the underlying float type for complex types
    /// Returns None for non-complex types
    #[inline]
    pub const fn complex_component_dtype(self) -> Option<Self> {
        match self {
            Self::Complex64 => Some(Self::F32),
            Self::Complex128 => Some(Self::F64),
            _ => None,
        }
    }

    /// Complex dtype with matching precision
    ///
    /// Single-precision dtypes map to `Complex64`; everything else to `Complex128`.
    #[inline]
    pub const fn complex_counterpart(self) -> Self {
        match self {
            Self::F32 | Self::Complex64 => Self::Complex64,
            Self::F64 | Self::I32 | Self::Complex128 => Self::Complex128,
        }
    }

    /// Floating dtype used when an operation cannot stay integral (e.g. inverse)
    #[inline]
    pub const fn float_counterpart(self) -> Self {
        match self {
            Self::I32 => Self::F64,
            other => other,
        }
    }

    /// Machine epsilon of the component precision
    #[inline]
    pub const fn epsilon(self) -> f64 {
        match self {
            Self::F32 | Self::Complex64 => f32::EPSILON as f64,
            Self::F64 | Self::I32 | Self::Complex128 => f64::EPSILON,
        }
    }

    /// Round a component value to what this dtype can represent
    ///
    /// F32 rounds to nearest single, I32 truncates toward zero (saturating,
    /// NaN becomes 0), F64 is untouched.
    #[inline]
    pub fn quantize(self, value: f64) -> f64 {
        match self {
            Self::F64 | Self::Complex128 => value,
            Self::F32 | Self::Complex64 => value as f32 as f64,
            Self::I32 => value as i32 as f64,
        }
    }

    /// Short name for display (e.g., "f32", "c128")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::I32 => "i32",
            Self::Complex64 => "c64",
            Self::Complex128 => "c128",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
