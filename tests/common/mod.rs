//! Common test utilities
#![allow(dead_code)]

use ndmat::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert two complex slices are close: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_c128(a: &[Complex128], b: &[Complex128], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (*x - *y).magnitude();
        let tol = atol + rtol * y.magnitude();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Frobenius distance between two arrays of the same shape
pub fn distance(a: &NdArray, b: &NdArray) -> f64 {
    norm(&a.sub(b).expect("shapes must match"))
}

/// Check if a matrix is close to identity
pub fn assert_near_identity(a: &NdArray, tol: f64, msg: &str) {
    let n = a.nrows();
    let eye = NdArray::identity(n, a.dtype()).unwrap();
    let d = distance(a, &eye);
    assert!(d <= tol, "{}: distance to identity {} exceeds {}", msg, d, tol);
}

/// Seeded random generator so failures reproduce
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random real matrix with entries in [-1, 1)
pub fn random_matrix(rng: &mut StdRng, n: usize) -> NdArray {
    let data: Vec<f64> = (0..n * n).map(|_| rng.random_range(-1.0..1.0)).collect();
    NdArray::from_slice(&data, &[n, n]).unwrap()
}

/// Random complex matrix with both parts in [-1, 1)
pub fn random_complex_matrix(rng: &mut StdRng, n: usize) -> NdArray {
    let data: Vec<Complex128> = (0..n * n)
        .map(|_| Complex128::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
        .collect();
    NdArray::from_slice(&data, &[n, n]).unwrap()
}

/// Assert two unordered spectra agree
///
/// Each expected value is paired with the nearest computed value not yet
/// claimed, so conjugate pairs with nearly equal real parts compare correctly.
pub fn assert_spectrum_close(actual: &[Complex128], expected: &[Complex128], tol: f64, msg: &str) {
    assert_eq!(actual.len(), expected.len(), "{}: length mismatch", msg);
    let mut claimed = vec![false; actual.len()];
    for (i, want) in expected.iter().enumerate() {
        let nearest = actual
            .iter()
            .enumerate()
            .filter(|(j, _)| !claimed[*j])
            .map(|(j, got)| (j, (*got - *want).magnitude()))
            .min_by(|x, y| x.1.total_cmp(&y.1));
        match nearest {
            Some((j, diff)) if diff <= tol => claimed[j] = true,
            _ => panic!(
                "{}: expected[{}]={} has no match within {} in {:?}",
                msg, i, want, tol, actual
            ),
        }
    }
}
