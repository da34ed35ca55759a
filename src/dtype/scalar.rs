//! Tagged scalar value exchanged at the element boundary

use super::Complex128;
use std::fmt;

/// A single array element, real or complex
///
/// Returned by scalar indexing and accepted by array-vs-scalar arithmetic.
/// Which variant an array produces is decided by its dtype, never per element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Value of a real dtype (f32, f64, i32)
    Real(f64),
    /// Value of a complex dtype
    Complex(Complex128),
}

impl Scalar {
    /// Real component
    #[inline]
    pub fn re(self) -> f64 {
        match self {
            Self::Real(v) => v,
            Self::Complex(z) => z.re,
        }
    }

    /// Imaginary component (zero for real scalars)
    #[inline]
    pub fn im(self) -> f64 {
        match self {
            Self::Real(_) => 0.0,
            Self::Complex(z) => z.im,
        }
    }

    /// Widen to a complex value
    #[inline]
    pub fn to_complex(self) -> Complex128 {
        match self {
            Self::Real(v) => Complex128::new(v, 0.0),
            Self::Complex(z) => z,
        }
    }

    /// True for the `Complex` variant
    #[inline]
    pub fn is_complex(self) -> bool {
        matches!(self, Self::Complex(_))
    }

    /// Magnitude, `|x|` for real and `hypot(re, im)` for complex
    #[inline]
    pub fn magnitude(self) -> f64 {
        match self {
            Self::Real(v) => v.abs(),
            Self::Complex(z) => z.magnitude(),
        }
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Self::Real(v as f64)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Real(v as f64)
    }
}

impl From<Complex128> for Scalar {
    fn from(z: Complex128) -> Self {
        Self::Complex(z)
    }
}

impl From<super::Complex64> for Scalar {
    fn from(z: super::Complex64) -> Self {
        Self::Complex(z.into())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(v) => write!(f, "{v}"),
            Self::Complex(z) => write!(f, "{z}"),
        }
    }
}
