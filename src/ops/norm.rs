//! Vector and matrix norms

use crate::array::NdArray;
use crate::error::{Error, Result};

/// Norm selection for [`norm_with`]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NormOrder {
    /// Frobenius norm (Euclidean norm for vectors)
    #[default]
    Frobenius,
    /// Maximum absolute column sum (matrices only)
    One,
    /// Maximum absolute row sum (matrices only)
    Inf,
}

/// Frobenius norm of a matrix, Euclidean norm of a vector
///
/// Complex elements contribute `|z|² = re² + im²`. Components are divided by
/// the largest magnitude before squaring, so the result is finite whenever it
/// is representable.
pub fn norm(a: &NdArray) -> f64 {
    let components = || a.real().iter().chain(a.imag().unwrap_or(&[]));
    let largest = components().fold(0.0f64, |acc, v| acc.max(v.abs()));
    if components().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    if largest == 0.0 || largest.is_infinite() {
        return largest;
    }
    let sum = components()
        .map(|v| {
            let r = v / largest;
            r * r
        })
        .sum::<f64>();
    largest * sum.sqrt()
}

/// Norm of the requested order
pub fn norm_with(a: &NdArray, order: NormOrder) -> Result<f64> {
    if order == NormOrder::Frobenius {
        return Ok(norm(a));
    }
    if a.ndim() != 2 {
        return Err(Error::invalid_argument(
            "order",
            format!("{order:?} norm requires a 2-D array, got shape {:?}", a.shape()),
        ));
    }

    let (rows, cols) = (a.nrows(), a.ncols());
    let values = a.to_complex_vec();
    let abs = |r: usize, c: usize| values[r * cols + c].magnitude();

    let value = match order {
        NormOrder::One => (0..cols)
            .map(|c| (0..rows).map(|r| abs(r, c)).sum::<f64>())
            .fold(0.0, f64::max),
        NormOrder::Inf => (0..rows)
            .map(|r| (0..cols).map(|c| abs(r, c)).sum::<f64>())
            .fold(0.0, f64::max),
        NormOrder::Frobenius => unreachable!(),
    };
    Ok(value)
}
