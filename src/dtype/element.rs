//! Element trait for mapping Rust types to DType

use super::{Complex64, Complex128, DType};
use bytemuck::Pod;

/// Trait for types that can be elements of an array
///
/// This trait connects Rust's type system to ndmat's runtime dtype system.
/// Arrays keep their values in `f64` planes, so an element only has to say
/// how it splits into a `(re, im)` pair and how it is rebuilt from one.
pub trait Element: Copy + Send + Sync + Pod + 'static {
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Split into `(re, im)`; real types return `im = 0`
    fn to_parts(self) -> (f64, f64);

    /// Rebuild from `(re, im)`; real types drop the imaginary part
    fn from_parts(re: f64, im: f64) -> Self;
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;

    #[inline]
    fn to_parts(self) -> (f64, f64) {
        (self, 0.0)
    }

    #[inline]
    fn from_parts(re: f64, _im: f64) -> Self {
        re
    }
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    #[inline]
    fn to_parts(self) -> (f64, f64) {
        (self as f64, 0.0)
    }

    #[inline]
    fn from_parts(re: f64, _im: f64) -> Self {
        re as f32
    }
}

impl Element for i32 {
    const DTYPE: DType = DType::I32;

    #[inline]
    fn to_parts(self) -> (f64, f64) {
        (self as f64, 0.0)
    }

    #[inline]
    fn from_parts(re: f64, _im: f64) -> Self {
        re as i32
    }
}

impl Element for Complex64 {
    const DTYPE: DType = DType::Complex64;

    #[inline]
    fn to_parts(self) -> (f64, f64) {
        (self.re as f64, self.im as f64)
    }

    #[inline]
    fn from_parts(re: f64, im: f64) -> Self {
        Complex64::new(re as f32, im as f32)
    }
}

impl Element for Complex128 {
    const DTYPE: DType = DType::Complex128;

    #[inline]
    fn to_parts(self) -> (f64, f64) {
        (self.re, self.im)
    }

    #[inline]
    fn from_parts(re: f64, im: f64) -> Self {
        Complex128::new(re, im)
    }
}
