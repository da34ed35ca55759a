//! Matrix multiplication
//!
//! `C[M,N] = A[M,K] @ B[K,N]` by triple-nested accumulation. The result dtype
//! is [`promote`]d from both operands.

use crate::array::{NdArray, Shape, Storage};
use crate::dtype::{Complex128, promote};
use crate::error::{Error, Result};

/// Matrix multiplication parameters
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatmulParams {
    /// Number of rows in A (M)
    pub m: usize,
    /// Number of columns in A / rows in B (K)
    pub k: usize,
    /// Number of columns in B (N)
    pub n: usize,
}

impl MatmulParams {
    /// Output shape
    pub fn output_shape(&self) -> [usize; 2] {
        [self.m, self.n]
    }
}

/// Validate matmul shapes and return the dimensions
///
/// Both operands must be 2-D and the inner dimensions must match.
pub fn validate_matmul_shapes(a_shape: &[usize], b_shape: &[usize]) -> Result<MatmulParams> {
    match (a_shape, b_shape) {
        (&[m, k], &[k2, n]) if k == k2 => Ok(MatmulParams { m, k, n }),
        (&[_, k], &[_, n]) => Err(Error::shape_mismatch(&[k, n], b_shape)),
        _ => {
            let bad = if a_shape.len() != 2 { a_shape } else { b_shape };
            Err(Error::shape_mismatch(&[1, bad.iter().product()], bad))
        }
    }
}

impl NdArray {
    /// Matrix product `self @ other`
    ///
    /// # Example
    ///
    /// ```
    /// use ndmat::prelude::*;
    ///
    /// let a = NdArray::from_rows(&[[1.0, 2.0], [3.0, 4.0]], DType::F64)?;
    /// let eye = NdArray::identity(2, DType::I32)?;
    /// let c = a.matmul(&eye)?;
    /// assert_eq!(c.dtype(), DType::F64);
    /// assert_eq!(c, a);
    /// # Ok::<(), ndmat::error::Error>(())
    /// ```
    pub fn matmul(&self, other: &NdArray) -> Result<NdArray> {
        let params = validate_matmul_shapes(self.shape(), other.shape())?;
        let MatmulParams { m, k, n } = params;
        let dtype = promote(self.dtype(), other.dtype());
        let mut out = Storage::zeros(m * n, dtype);

        if !self.is_complex() && !other.is_complex() {
            let (a, b) = (self.real(), other.real());
            for i in 0..m {
                for j in 0..n {
                    let mut acc = 0.0;
                    for p in 0..k {
                        acc += a[i * k + p] * b[p * n + j];
                    }
                    out.store_parts(i * n + j, acc, 0.0);
                }
            }
        } else {
            let (a, b) = (self.storage(), other.storage());
            for i in 0..m {
                for j in 0..n {
                    let mut acc = Complex128::ZERO;
                    for p in 0..k {
                        acc += a.load_complex(i * k + p) * b.load_complex(p * n + j);
                    }
                    out.store_parts(i * n + j, acc.re, acc.im);
                }
            }
        }

        Ok(NdArray::from_storage(
            Shape::from_validated(&params.output_shape()),
            out,
        ))
    }
}
