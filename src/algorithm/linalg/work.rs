//! Square complex working matrix for the eigenvalue kernels

use crate::array::NdArray;
use crate::dtype::{Complex128, DType};
use crate::error::Result;
use std::ops::{Index, IndexMut};

/// Row-major `n × n` complex matrix indexed by `(row, col)`
///
/// The Hessenberg, QR and eigenvector kernels all run on this type, whatever
/// the dtype of the input array.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ComplexMatrix {
    n: usize,
    data: Vec<Complex128>,
}

impl ComplexMatrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![Complex128::ZERO; n * n],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            m[(i, i)] = Complex128::ONE;
        }
        m
    }

    /// Widen a validated square array
    pub fn from_array(a: &NdArray) -> Self {
        Self {
            n: a.nrows(),
            data: a.to_complex_vec(),
        }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Write back as an `n × n` array of `dtype`
    pub fn to_array(&self, dtype: DType) -> Result<NdArray> {
        NdArray::from_complex(&[self.n, self.n], dtype, &self.data)
    }

    /// Diagonal as a 1-D array of `dtype`
    pub fn diagonal(&self, dtype: DType) -> Result<NdArray> {
        let diag: Vec<Complex128> = (0..self.n).map(|i| self[(i, i)]).collect();
        NdArray::from_complex(&[self.n], dtype, &diag)
    }

    /// Product `self @ rhs`
    pub fn matmul(&self, rhs: &ComplexMatrix) -> ComplexMatrix {
        let n = self.n;
        let mut out = Self::zeros(n);
        for i in 0..n {
            for k in 0..n {
                let a = self[(i, k)];
                if a.is_zero() {
                    continue;
                }
                for j in 0..n {
                    out[(i, j)] += a * rhs[(k, j)];
                }
            }
        }
        out
    }

    /// Conjugate transpose
    pub fn adjoint(&self) -> ComplexMatrix {
        let n = self.n;
        let mut out = Self::zeros(n);
        for i in 0..n {
            for j in 0..n {
                out[(j, i)] = self[(i, j)].conj();
            }
        }
        out
    }
}

impl Index<(usize, usize)> for ComplexMatrix {
    type Output = Complex128;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Complex128 {
        &self.data[row * self.n + col]
    }
}

impl IndexMut<(usize, usize)> for ComplexMatrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Complex128 {
        &mut self.data[row * self.n + col]
    }
}
