//! Helper functions for linear algebra operations
//!
//! Validation utilities shared by the decompositions.

use crate::error::{Error, Result};

/// Validate matrix is 2D
pub fn validate_matrix_2d(shape: &[usize]) -> Result<(usize, usize)> {
    match *shape {
        [m, n] => Ok((m, n)),
        _ => Err(Error::invalid_argument(
            "a",
            format!(
                "expected 2D matrix, got {}D array with shape {:?}",
                shape.len(),
                shape
            ),
        )),
    }
}

/// Validate matrix is square
pub fn validate_square_matrix(shape: &[usize]) -> Result<usize> {
    let (m, n) = validate_matrix_2d(shape)?;
    if m != n {
        return Err(Error::ShapeMismatch {
            expected: vec![m, m],
            got: vec![m, n],
        });
    }
    Ok(n)
}
