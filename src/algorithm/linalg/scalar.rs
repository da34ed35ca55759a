//! Working scalar trait for the dense kernels

use crate::array::Storage;
use crate::dtype::Complex128;
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Trait for elements that support linear algebra operations.
///
/// Kernels are written once against this trait and instantiated for `f64`
/// (real dtypes) and `Complex128` (complex dtypes), so the dtype branch is
/// taken once per call rather than per element.
pub trait LinalgElement:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Additive identity
    const ZERO: Self;
    /// Multiplicative identity
    const ONE: Self;

    /// Absolute value (modulus for complex)
    fn abs_val(self) -> f64;

    /// True if exactly zero
    #[inline]
    fn is_zero_val(self) -> bool {
        self == Self::ZERO
    }

    /// Read element `i` of a storage
    fn load(storage: &Storage, i: usize) -> Self;

    /// Split into `(re, im)` for writing back
    fn into_parts(self) -> (f64, f64);
}

impl LinalgElement for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline]
    fn abs_val(self) -> f64 {
        self.abs()
    }

    #[inline]
    fn load(storage: &Storage, i: usize) -> Self {
        storage.real()[i]
    }

    #[inline]
    fn into_parts(self) -> (f64, f64) {
        (self, 0.0)
    }
}

impl LinalgElement for Complex128 {
    const ZERO: Self = Complex128::ZERO;
    const ONE: Self = Complex128::ONE;

    #[inline]
    fn abs_val(self) -> f64 {
        self.magnitude()
    }

    #[inline]
    fn load(storage: &Storage, i: usize) -> Self {
        storage.load_complex(i)
    }

    #[inline]
    fn into_parts(self) -> (f64, f64) {
        (self.re, self.im)
    }
}
