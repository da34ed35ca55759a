//! Shape type: dimensions of an array

use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Arrays are vectors or matrices, so both extents always fit on the stack
pub(crate) const STACK_DIMS: usize = 2;

/// Shape type: dimensions of an array
///
/// A shape is validated on construction: it has one or two dimensions and
/// every extent is at least 1.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Shape(SmallVec<[usize; STACK_DIMS]>);

impl Shape {
    /// Create a validated shape from a dimension list.
    pub fn new(dims: &[usize]) -> Result<Self> {
        if dims.is_empty() || dims.len() > STACK_DIMS {
            return Err(Error::invalid_argument(
                "shape",
                format!("expected 1 or 2 dimensions, got {}", dims.len()),
            ));
        }
        if dims.contains(&0) {
            return Err(Error::invalid_argument(
                "shape",
                format!("every extent must be positive, got {dims:?}"),
            ));
        }
        Ok(Self(dims.iter().copied().collect()))
    }

    /// Wrap dimensions already known to be valid
    pub(crate) fn from_validated(dims: &[usize]) -> Self {
        debug_assert!(Self::new(dims).is_ok());
        Self(dims.iter().copied().collect())
    }

    /// 1-D shape of length `n`.
    pub fn vector(n: usize) -> Result<Self> {
        Self::new(&[n])
    }

    /// 2-D shape with `rows` rows and `cols` columns.
    pub fn matrix(rows: usize, cols: usize) -> Result<Self> {
        Self::new(&[rows, cols])
    }

    /// View shape as a slice.
    pub fn as_slice(&self) -> &[usize] {
        self.0.as_slice()
    }

    /// Number of dimensions in this shape.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Total number of elements.
    #[inline]
    pub fn numel(&self) -> usize {
        self.0.iter().product()
    }

    /// True for a 2-D shape.
    #[inline]
    pub fn is_matrix(&self) -> bool {
        self.0.len() == 2
    }

    /// Row count; a vector counts as a single row.
    #[inline]
    pub fn rows(&self) -> usize {
        if self.is_matrix() { self.0[0] } else { 1 }
    }

    /// Column count; for a vector this is its length.
    #[inline]
    pub fn cols(&self) -> usize {
        self.0[self.0.len() - 1]
    }
}

impl Deref for Shape {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_slice() {
            [n] => write!(f, "({n},)"),
            [r, c] => write!(f, "({r}, {c})"),
            other => write!(f, "{other:?}"),
        }
    }
}

impl AsRef<[usize]> for Shape {
    fn as_ref(&self) -> &[usize] {
        self.0.as_slice()
    }
}

impl TryFrom<&[usize]> for Shape {
    type Error = Error;

    fn try_from(value: &[usize]) -> Result<Self> {
        Self::new(value)
    }
}
