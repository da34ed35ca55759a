//! Core NdArray type

use super::{Shape, Storage};
use crate::dtype::{Complex128, DType, Element, Scalar};
use crate::error::{Error, Result};
use std::fmt;

/// Dense 1-D or 2-D array with a runtime dtype
///
/// `NdArray` consists of:
/// - **Shape**: one or two positive extents
/// - **Storage**: a real `f64` plane plus, for complex dtypes, an imaginary plane
///
/// Elements are laid out row-major, so element `(row, col)` of a matrix sits at
/// offset `row * ncols + col`. The dtype is fixed at construction; converting
/// (`astype`) always produces a new array. Indexed assignment is the only
/// in-place mutation.
///
/// # Example
///
/// ```
/// use ndmat::prelude::*;
///
/// let a = NdArray::from_rows(&[[1.0, 2.0], [3.0, 4.0]], DType::F64)?;
/// let t = a.transpose();
/// assert_eq!(t.to_vec::<f64>(), vec![1.0, 3.0, 2.0, 4.0]);
/// # Ok::<(), ndmat::error::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NdArray {
    shape: Shape,
    storage: Storage,
}

impl NdArray {
    /// Assemble an array from validated parts
    pub(crate) fn from_storage(shape: Shape, storage: Storage) -> Self {
        debug_assert_eq!(shape.numel(), storage.len());
        Self { shape, storage }
    }

    /// Create an array of `shape` and `dtype`
    ///
    /// The buffers are zero-filled; no uninitialized memory is ever exposed.
    pub fn empty(shape: &[usize], dtype: DType) -> Result<Self> {
        let shape = Shape::new(shape)?;
        let storage = Storage::zeros(shape.numel(), dtype);
        Ok(Self { shape, storage })
    }

    /// Create an array filled with zeros
    pub fn zeros(shape: &[usize], dtype: DType) -> Result<Self> {
        Self::empty(shape, dtype)
    }

    /// Create an array filled with ones
    pub fn ones(shape: &[usize], dtype: DType) -> Result<Self> {
        Self::full(shape, dtype, 1.0)
    }

    /// Create an array filled with a scalar value
    ///
    /// The scalar is converted to the target dtype.
    pub fn full(shape: &[usize], dtype: DType, value: impl Into<Scalar>) -> Result<Self> {
        let shape = Shape::new(shape)?;
        let storage = Storage::filled(shape.numel(), dtype, value.into());
        Ok(Self { shape, storage })
    }

    /// Create the `n × n` identity matrix
    pub fn identity(n: usize, dtype: DType) -> Result<Self> {
        let mut out = Self::zeros(&[n, n], dtype)?;
        for i in 0..n {
            out.storage.store_parts(i * n + i, 1.0, 0.0);
        }
        Ok(out)
    }

    /// Create an array from a slice of typed data
    ///
    /// Returns an error if `data.len()` does not equal the product of the
    /// `shape` dimensions. The dtype is inferred from the element type.
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize]) -> Result<Self> {
        let shape = Shape::new(shape)?;
        if data.len() != shape.numel() {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }
        Ok(Self {
            shape,
            storage: Storage::from_elements(data),
        })
    }

    /// Create a matrix from a nested row sequence, converting to `dtype`
    ///
    /// Non-complex dtypes keep only the real part of complex input. All rows
    /// must have the same length.
    pub fn from_rows<T: Element, R: AsRef<[T]>>(rows: &[R], dtype: DType) -> Result<Self> {
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        let shape = Shape::matrix(rows.len(), ncols)?;

        let mut flat = Vec::with_capacity(shape.numel());
        for row in rows {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(Error::shape_mismatch(&[ncols], &[row.len()]));
            }
            flat.extend_from_slice(row);
        }

        Ok(Self {
            shape,
            storage: Storage::from_elements_as(&flat, dtype),
        })
    }

    /// Create an array from raw real and imaginary planes
    ///
    /// `imag` may be omitted for complex dtypes (taken as zero) and is
    /// ignored for real dtypes.
    pub fn from_planes(
        shape: &[usize],
        dtype: DType,
        real: Vec<f64>,
        imag: Option<Vec<f64>>,
    ) -> Result<Self> {
        let shape = Shape::new(shape)?;
        if real.len() != shape.numel() {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![real.len()],
            });
        }
        let storage = Storage::from_planes(dtype, real, imag)?;
        Ok(Self { shape, storage })
    }

    /// Create an array from complex working values
    pub(crate) fn from_complex(shape: &[usize], dtype: DType, values: &[Complex128]) -> Result<Self> {
        let shape = Shape::new(shape)?;
        if values.len() != shape.numel() {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![values.len()],
            });
        }
        Ok(Self {
            shape,
            storage: Storage::from_complex(values, dtype),
        })
    }

    /// Convert another array to `dtype`
    pub fn array(source: &NdArray, dtype: DType) -> Self {
        source.astype(dtype)
    }

    /// Deep copy with the same dtype
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Element-converted copy
    pub fn astype(&self, dtype: DType) -> Self {
        Self {
            shape: self.shape.clone(),
            storage: self.storage.cast(dtype),
        }
    }

    /// Shape metadata
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Validated shape object
    #[inline]
    pub fn shape_ref(&self) -> &Shape {
        &self.shape
    }

    /// Number of dimensions (1 or 2)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Total number of elements
    #[inline]
    pub fn size(&self) -> usize {
        self.storage.len()
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// True if the dtype is complex
    #[inline]
    pub fn is_complex(&self) -> bool {
        self.dtype().is_complex()
    }

    /// Row count (1 for a vector)
    #[inline]
    pub fn nrows(&self) -> usize {
        self.shape.rows()
    }

    /// Column count (the length for a vector)
    #[inline]
    pub fn ncols(&self) -> usize {
        self.shape.cols()
    }

    /// Real plane in row-major order
    #[inline]
    pub fn real(&self) -> &[f64] {
        self.storage.real()
    }

    /// Imaginary plane, `None` for real dtypes
    #[inline]
    pub fn imag(&self) -> Option<&[f64]> {
        self.storage.imag()
    }

    #[inline]
    pub(crate) fn storage(&self) -> &Storage {
        &self.storage
    }

    #[inline]
    pub(crate) fn storage_mut(&mut self) -> &mut Storage {
        &mut self.storage
    }

    /// Flat offset of `(row, col)`
    #[inline]
    pub(crate) fn offset(&self, row: usize, col: usize) -> usize {
        row * self.ncols() + col
    }

    /// All elements widened to complex, row-major
    pub fn to_complex_vec(&self) -> Vec<Complex128> {
        self.storage.to_complex_vec()
    }

    /// Copy the elements out as `T`, converting from the array dtype
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        self.storage.to_vec()
    }

    /// Transposed copy
    ///
    /// A matrix maps `source[row * ncols + col]` to `dest[col * nrows + row]`
    /// on both planes. A vector is returned as a copy.
    pub fn transpose(&self) -> Self {
        if !self.shape.is_matrix() {
            return self.clone();
        }

        let (nrows, ncols) = (self.nrows(), self.ncols());
        let transpose_plane = |src: &[f64]| {
            let mut dst = vec![0.0; src.len()];
            for row in 0..nrows {
                for col in 0..ncols {
                    dst[col * nrows + row] = src[row * ncols + col];
                }
            }
            dst
        };

        let real = transpose_plane(self.real());
        let imag = self.imag().map(transpose_plane);
        Self {
            shape: Shape::from_validated(&[ncols, nrows]),
            storage: Storage::from_planes_unchecked(self.dtype(), real, imag),
        }
    }
}

impl fmt::Display for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_row = |f: &mut fmt::Formatter<'_>, row: usize| -> fmt::Result {
            write!(f, "[")?;
            for col in 0..self.ncols() {
                if col > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.storage.load(self.offset(row, col)))?;
            }
            write!(f, "]")
        };

        if self.shape.is_matrix() {
            write!(f, "[")?;
            for row in 0..self.nrows() {
                if row > 0 {
                    writeln!(f, ",")?;
                    write!(f, " ")?;
                }
                write_row(f, row)?;
            }
            write!(f, "]")?;
        } else {
            write_row(f, 0)?;
        }
        write!(f, " dtype={}", self.dtype())
    }
}
