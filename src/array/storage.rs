//! Storage: split real/imaginary planes with dtype-aware quantization

use crate::dtype::{Complex128, DType, Element, Scalar};
use crate::error::{Error, Result};

/// Element buffers of an array
///
/// Values live in `f64` planes regardless of dtype: a real plane, plus an
/// imaginary plane that exists exactly when the dtype is complex. Every write
/// goes through [`DType::quantize`], so the planes only ever hold values the
/// dtype can represent.
#[derive(Clone, Debug, PartialEq)]
pub struct Storage {
    dtype: DType,
    real: Vec<f64>,
    imag: Option<Vec<f64>>,
}

impl Storage {
    /// Zero-filled storage of `len` elements
    pub fn zeros(len: usize, dtype: DType) -> Self {
        Self {
            dtype,
            real: vec![0.0; len],
            imag: dtype.is_complex().then(|| vec![0.0; len]),
        }
    }

    /// Storage with every element set to `value`
    pub fn filled(len: usize, dtype: DType, value: Scalar) -> Self {
        Self {
            dtype,
            real: vec![dtype.quantize(value.re()); len],
            imag: dtype
                .is_complex()
                .then(|| vec![dtype.quantize(value.im()); len]),
        }
    }

    /// Build storage from raw planes
    ///
    /// A missing imaginary plane for a complex dtype is taken as zero; an
    /// imaginary plane given for a real dtype is dropped.
    pub fn from_planes(dtype: DType, real: Vec<f64>, imag: Option<Vec<f64>>) -> Result<Self> {
        if let Some(im) = &imag {
            if im.len() != real.len() {
                return Err(Error::shape_mismatch(&[real.len()], &[im.len()]));
            }
        }

        let len = real.len();
        let real = real.into_iter().map(|v| dtype.quantize(v)).collect();
        let imag = if dtype.is_complex() {
            Some(match imag {
                Some(im) => im.into_iter().map(|v| dtype.quantize(v)).collect(),
                None => vec![0.0; len],
            })
        } else {
            None
        };

        Ok(Self { dtype, real, imag })
    }

    /// Wrap planes that already hold quantized values of `dtype`
    pub(crate) fn from_planes_unchecked(
        dtype: DType,
        real: Vec<f64>,
        imag: Option<Vec<f64>>,
    ) -> Self {
        debug_assert_eq!(imag.is_some(), dtype.is_complex());
        Self { dtype, real, imag }
    }

    /// Copy typed elements, keeping their native dtype
    pub fn from_elements<T: Element>(data: &[T]) -> Self {
        Self::from_elements_as(data, T::DTYPE)
    }

    /// Copy typed elements, converting to `dtype`
    pub fn from_elements_as<T: Element>(data: &[T], dtype: DType) -> Self {
        let mut storage = Self::zeros(data.len(), dtype);
        for (i, &value) in data.iter().enumerate() {
            let (re, im) = value.to_parts();
            storage.store_parts(i, re, im);
        }
        storage
    }

    /// Copy complex working values into storage of `dtype`
    pub fn from_complex(values: &[Complex128], dtype: DType) -> Self {
        let flat: &[f64] = bytemuck::cast_slice(values);
        let real = flat.iter().step_by(2).map(|&v| dtype.quantize(v)).collect();
        let imag = dtype.is_complex().then(|| {
            flat.iter()
                .skip(1)
                .step_by(2)
                .map(|&v| dtype.quantize(v))
                .collect()
        });
        Self { dtype, real, imag }
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.real.len()
    }

    /// Always false for arrays built through the public factories
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    /// Real plane
    #[inline]
    pub fn real(&self) -> &[f64] {
        &self.real
    }

    /// Imaginary plane, `None` for real dtypes
    #[inline]
    pub fn imag(&self) -> Option<&[f64]> {
        self.imag.as_deref()
    }

    /// Read element `i` as a tagged scalar
    #[inline]
    pub fn load(&self, i: usize) -> Scalar {
        match &self.imag {
            Some(im) => Scalar::Complex(Complex128::new(self.real[i], im[i])),
            None => Scalar::Real(self.real[i]),
        }
    }

    /// Read element `i` widened to complex
    #[inline]
    pub fn load_complex(&self, i: usize) -> Complex128 {
        let im = self.imag.as_ref().map_or(0.0, |im| im[i]);
        Complex128::new(self.real[i], im)
    }

    /// Write element `i`; real dtypes keep the real part only
    #[inline]
    pub fn store(&mut self, i: usize, value: Scalar) {
        self.store_parts(i, value.re(), value.im());
    }

    /// Write element `i` from its components
    #[inline]
    pub fn store_parts(&mut self, i: usize, re: f64, im: f64) {
        self.real[i] = self.dtype.quantize(re);
        if let Some(plane) = &mut self.imag {
            plane[i] = self.dtype.quantize(im);
        }
    }

    /// Element-converted copy
    pub fn cast(&self, dtype: DType) -> Self {
        if dtype == self.dtype {
            return self.clone();
        }
        let imag = match (&self.imag, dtype.is_complex()) {
            (Some(im), true) => Some(im.iter().map(|&v| dtype.quantize(v)).collect()),
            (None, true) => Some(vec![0.0; self.len()]),
            (_, false) => None,
        };
        Self {
            dtype,
            real: self.real.iter().map(|&v| dtype.quantize(v)).collect(),
            imag,
        }
    }

    /// All elements widened to complex
    pub fn to_complex_vec(&self) -> Vec<Complex128> {
        (0..self.len()).map(|i| self.load_complex(i)).collect()
    }

    /// All elements converted to `T`
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        (0..self.len())
            .map(|i| {
                let z = self.load_complex(i);
                T::from_parts(z.re, z.im)
            })
            .collect()
    }
}
