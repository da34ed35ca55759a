//! `std::ops` operator overloads for `&NdArray`
//!
//! Operators are conveniences over the methods in
//! [`arithmetic`](super::arithmetic). Array-vs-array operators can fail on a
//! shape mismatch, so they yield `Result<NdArray>`; scalar operands cannot
//! fail and yield the array directly.

use super::arithmetic::{BinaryOp, binary_op_impl, scalar_op_impl};
use crate::array::NdArray;
use crate::dtype::{Complex128, Scalar};
use crate::error::Result;
use std::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<'b> $trait<&'b NdArray> for &NdArray {
            type Output = Result<NdArray>;

            fn $method(self, rhs: &'b NdArray) -> Result<NdArray> {
                binary_op_impl(self, rhs, $op)
            }
        }

        impl $trait<Scalar> for &NdArray {
            type Output = NdArray;

            fn $method(self, rhs: Scalar) -> NdArray {
                scalar_op_impl(self, rhs, $op)
            }
        }

        impl $trait<f64> for &NdArray {
            type Output = NdArray;

            fn $method(self, rhs: f64) -> NdArray {
                scalar_op_impl(self, Scalar::Real(rhs), $op)
            }
        }

        impl $trait<Complex128> for &NdArray {
            type Output = NdArray;

            fn $method(self, rhs: Complex128) -> NdArray {
                scalar_op_impl(self, Scalar::Complex(rhs), $op)
            }
        }
    };
}

impl_binary_operator!(Add, add, BinaryOp::Add);
impl_binary_operator!(Sub, sub, BinaryOp::Sub);
impl_binary_operator!(Mul, mul, BinaryOp::Mul);
impl_binary_operator!(Div, div, BinaryOp::Div);

impl Neg for &NdArray {
    type Output = NdArray;

    fn neg(self) -> NdArray {
        NdArray::neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::error::Error;

    #[test]
    fn test_operators() {
        let a = NdArray::from_rows(&[[1.0, 2.0], [3.0, 4.0]], DType::F64).unwrap();
        let b = NdArray::ones(&[2, 2], DType::F64).unwrap();

        assert_eq!((&a + &b).unwrap().to_vec::<f64>(), vec![2.0, 3.0, 4.0, 5.0]);
        assert_eq!((&a - &b).unwrap().to_vec::<f64>(), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!((&a * 2.0).to_vec::<f64>(), vec![2.0, 4.0, 6.0, 8.0]);
        assert_eq!((&a / Scalar::Real(2.0)).to_vec::<f64>(), vec![0.5, 1.0, 1.5, 2.0]);
        assert_eq!((-&a).to_vec::<f64>(), vec![-1.0, -2.0, -3.0, -4.0]);

        let c = a.astype(DType::Complex128);
        let z = &c * Complex128::I;
        assert_eq!(z.imag(), Some(&[1.0, 2.0, 3.0, 4.0][..]));
    }

    #[test]
    fn test_operator_shape_mismatch_is_an_error() {
        let a = NdArray::zeros(&[2, 2], DType::F64).unwrap();
        let b = NdArray::zeros(&[3], DType::F64).unwrap();
        for result in [&a + &b, &a - &b, &a * &b, &a / &b] {
            assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
        }
    }
}
