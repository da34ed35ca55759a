//! Type promotion rules for matrix multiplication

use super::DType;

/// Promote two dtypes to a common dtype
///
/// - Complex wins over real, and the result keeps the wider component precision
/// - Floats win over integers
/// - F64 wins over F32
pub fn promote(lhs: DType, rhs: DType) -> DType {
    use DType::*;

    if lhs == rhs {
        return lhs;
    }

    if lhs.is_complex() || rhs.is_complex() {
        let wide = |dt: DType| matches!(dt, F64 | I32 | Complex128);
        return if wide(lhs) || wide(rhs) {
            Complex128
        } else {
            Complex64
        };
    }

    // Promotion priority (higher = wins)
    let priority = |dt: DType| -> u8 {
        match dt {
            Complex128 => 120,
            Complex64 => 110,
            F64 => 100,
            F32 => 90,
            I32 => 55,
        }
    };

    if priority(lhs) >= priority(rhs) {
        lhs
    } else {
        rhs
    }
}
