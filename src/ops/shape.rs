//! Stacking and splitting
//!
//! Validation is done once up front (dtype agreement, orthogonal extents,
//! divisibility), then the planes are copied row-run by row-run.

use crate::array::{NdArray, Shape, Storage};
use crate::dtype::DType;
use crate::error::{Error, Result};

/// Axis of a stacking or splitting operation
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    Rows,
    Cols,
}

/// Parameters for a concatenation after validation.
#[derive(Debug, Clone)]
struct CatParams {
    /// Data type of all parts
    dtype: DType,
    /// Output shape
    out_shape: Vec<usize>,
}

fn validate_cat(parts: &[&NdArray], axis: Axis) -> Result<CatParams> {
    let Some(first) = parts.first() else {
        return Err(Error::invalid_argument(
            "parts",
            "stacking requires at least one array",
        ));
    };
    let dtype = first.dtype();

    for part in &parts[1..] {
        if part.dtype() != dtype {
            return Err(Error::DTypeMismatch {
                lhs: dtype,
                rhs: part.dtype(),
            });
        }
    }

    let out_shape = match axis {
        // Vectors count as single rows
        Axis::Rows => {
            let cols = first.ncols();
            let mut rows = 0;
            for part in parts {
                if part.ncols() != cols {
                    return Err(Error::shape_mismatch(&[part.nrows(), cols], part.shape()));
                }
                rows += part.nrows();
            }
            vec![rows, cols]
        }
        Axis::Cols => {
            let ndim = first.ndim();
            let rows = first.nrows();
            let mut cols = 0;
            for part in parts {
                if part.ndim() != ndim || part.nrows() != rows {
                    let mut expected = part.shape().to_vec();
                    expected[0] = rows;
                    expected.truncate(ndim);
                    return Err(Error::shape_mismatch(&expected, part.shape()));
                }
                cols += part.ncols();
            }
            if ndim == 1 {
                vec![cols]
            } else {
                vec![rows, cols]
            }
        }
    };

    Ok(CatParams { dtype, out_shape })
}

fn cat_impl(parts: &[&NdArray], axis: Axis) -> Result<NdArray> {
    let params = validate_cat(parts, axis)?;
    let total: usize = params.out_shape.iter().product();
    let rows = if params.out_shape.len() == 2 {
        params.out_shape[0]
    } else {
        1
    };

    let gather = |plane: fn(&NdArray) -> &[f64]| -> Vec<f64> {
        let mut out = Vec::with_capacity(total);
        match axis {
            Axis::Rows => {
                for part in parts {
                    out.extend_from_slice(plane(part));
                }
            }
            Axis::Cols => {
                for row in 0..rows {
                    for part in parts {
                        let n = part.ncols();
                        out.extend_from_slice(&plane(part)[row * n..(row + 1) * n]);
                    }
                }
            }
        }
        out
    };

    let real = gather(|a| a.real());
    let imag = params
        .dtype
        .is_complex()
        .then(|| gather(|a| a.imag().unwrap_or(&[])));
    Ok(NdArray::from_storage(
        Shape::from_validated(&params.out_shape),
        Storage::from_planes_unchecked(params.dtype, real, imag),
    ))
}

fn split_impl(a: &NdArray, sections: usize, axis: Axis) -> Result<Vec<NdArray>> {
    if sections == 0 {
        return Err(Error::invalid_argument(
            "sections",
            "sections must be greater than zero",
        ));
    }
    if axis == Axis::Rows && a.ndim() != 2 {
        return Err(Error::invalid_argument(
            "array",
            format!("vsplit requires a 2-D array, got shape {:?}", a.shape()),
        ));
    }

    let (rows, cols) = (a.nrows(), a.ncols());
    let extent = match axis {
        Axis::Rows => rows,
        Axis::Cols => cols,
    };
    if extent % sections != 0 {
        return Err(Error::invalid_argument(
            "sections",
            format!("{sections} sections do not evenly divide an extent of {extent}"),
        ));
    }
    let width = extent / sections;

    let slice_plane = |plane: &[f64], s: usize| -> Vec<f64> {
        match axis {
            Axis::Rows => plane[s * width * cols..(s + 1) * width * cols].to_vec(),
            Axis::Cols => (0..rows)
                .flat_map(|r| {
                    let base = r * cols + s * width;
                    plane[base..base + width].iter().copied()
                })
                .collect(),
        }
    };

    let part_shape = match (axis, a.ndim()) {
        (Axis::Rows, _) => vec![width, cols],
        (Axis::Cols, 1) => vec![width],
        (Axis::Cols, _) => vec![rows, width],
    };

    Ok((0..sections)
        .map(|s| {
            let real = slice_plane(a.real(), s);
            let imag = a.imag().map(|im| slice_plane(im, s));
            NdArray::from_storage(
                Shape::from_validated(&part_shape),
                Storage::from_planes_unchecked(a.dtype(), real, imag),
            )
        })
        .collect())
}

/// Concatenate along columns
///
/// Matrices must share their row count; vectors are joined end to end. All
/// parts must have the same dtype.
pub fn hstack(parts: &[&NdArray]) -> Result<NdArray> {
    cat_impl(parts, Axis::Cols)
}

/// Concatenate along rows
///
/// Vectors are treated as single rows. All parts must share their column
/// count and dtype.
pub fn vstack(parts: &[&NdArray]) -> Result<NdArray> {
    cat_impl(parts, Axis::Rows)
}

/// Split into `sections` equal-width column blocks (equal runs for a vector)
pub fn hsplit(a: &NdArray, sections: usize) -> Result<Vec<NdArray>> {
    split_impl(a, sections, Axis::Cols)
}

/// Split a matrix into `sections` equal-height row blocks
pub fn vsplit(a: &NdArray, sections: usize) -> Result<Vec<NdArray>> {
    split_impl(a, sections, Axis::Rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Complex128;

    #[test]
    fn test_hstack_matrices() {
        let a = NdArray::from_rows(&[[1.0], [2.0]], DType::F64).unwrap();
        let b = NdArray::from_rows(&[[3.0, 4.0], [5.0, 6.0]], DType::F64).unwrap();
        let c = hstack(&[&a, &b]).unwrap();
        assert_eq!(c.shape(), &[2, 3]);
        assert_eq!(c.to_vec::<f64>(), vec![1.0, 3.0, 4.0, 2.0, 5.0, 6.0]);
    }

    #[test]
    fn test_stack_vectors() {
        let a = NdArray::from_slice(&[1i32, 2], &[2]).unwrap();
        let b = NdArray::from_slice(&[3i32, 4], &[2]).unwrap();

        let h = hstack(&[&a, &b]).unwrap();
        assert_eq!(h.shape(), &[4]);
        assert_eq!(h.to_vec::<i32>(), vec![1, 2, 3, 4]);

        let v = vstack(&[&a, &b]).unwrap();
        assert_eq!(v.shape(), &[2, 2]);
        assert_eq!(v.to_vec::<i32>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_stack_errors() {
        let a = NdArray::zeros(&[2, 2], DType::F64).unwrap();
        let b = NdArray::zeros(&[3, 2], DType::F64).unwrap();
        let c = NdArray::zeros(&[2, 2], DType::F32).unwrap();

        assert!(matches!(hstack(&[&a, &b]), Err(Error::ShapeMismatch { .. })));
        assert!(vstack(&[&a, &b]).is_ok());
        assert_eq!(
            vstack(&[&a, &c]),
            Err(Error::DTypeMismatch {
                lhs: DType::F64,
                rhs: DType::F32
            })
        );
        assert!(matches!(hstack(&[]), Err(Error::InvalidArgument { .. })));
    }

    #[test]
    fn test_split_round_trip() {
        let a = NdArray::from_rows(
            &[[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]],
            DType::Complex128,
        )
        .unwrap()
        .add_scalar(Complex128::new(0.0, 1.0));

        let cols = hsplit(&a, 2).unwrap();
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[1].shape(), &[2, 2]);
        assert_eq!(cols[1].real(), &[3.0, 4.0, 7.0, 8.0]);
        let refs: Vec<&NdArray> = cols.iter().collect();
        assert_eq!(hstack(&refs).unwrap(), a);

        let rows = vsplit(&a, 2).unwrap();
        assert_eq!(rows[0].shape(), &[1, 4]);
        let refs: Vec<&NdArray> = rows.iter().collect();
        assert_eq!(vstack(&refs).unwrap(), a);
    }

    #[test]
    fn test_split_errors() {
        let a = NdArray::zeros(&[3, 4], DType::F64).unwrap();
        assert!(matches!(
            vsplit(&a, 2),
            Err(Error::InvalidArgument { arg: "sections", .. })
        ));
        assert!(hsplit(&a, 0).is_err());

        let v = NdArray::zeros(&[4], DType::F64).unwrap();
        assert_eq!(hsplit(&v, 4).unwrap().len(), 4);
        assert!(vsplit(&v, 2).is_err());
    }
}
