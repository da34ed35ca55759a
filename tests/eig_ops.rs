//! Integration tests for Hessenberg reduction, Schur form and eigendecomposition
//!
//! Tests verify:
//! - Eigenvalue equation: A @ v ≈ λ·v (right), w @ A ≈ λ·w (left)
//! - Hessenberg and Schur structure with A ≈ Q·X·Qᴴ
//! - Known spectra: rotation, diagonal, companion matrix
//! - Iteration cap reported as NoConvergence

use ndmat::prelude::*;

mod common;

use common::{
    assert_near_identity, assert_spectrum_close, distance, random_complex_matrix, random_matrix,
    rng,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn column(m: &NdArray, i: usize) -> NdArray {
    let i = i as isize;
    m.get(&[AxisIndex::all(), AxisIndex::from(i..i + 1)])
        .unwrap()
        .into_array()
        .unwrap()
}

fn row(m: &NdArray, i: usize) -> NdArray {
    let i = i as isize;
    m.get(&[AxisIndex::from(i..i + 1), AxisIndex::all()])
        .unwrap()
        .into_array()
        .unwrap()
}

fn adjoint(m: &NdArray) -> NdArray {
    m.conj().transpose()
}

/// Check every eigenpair of `dec` against `a`
fn assert_eigenpairs(a: &NdArray, dec: &EigenDecomposition, tol: f64, msg: &str) {
    let n = a.nrows();
    let scale = norm(a).max(1.0);
    let lambdas = dec.eigenvalues.to_vec::<Complex128>();

    if let Some(right) = &dec.right {
        for (i, &lambda) in lambdas.iter().enumerate() {
            let v = column(right, i);
            let r = distance(&a.matmul(&v).unwrap(), &v.mul_scalar(lambda));
            assert!(r <= tol * scale, "{msg}: right residual {r} for λ[{i}]={lambda}");
            assert!((norm(&v) - 1.0).abs() < 1e-12, "{msg}: right vector {i} not unit");
        }
    }

    if let Some(left) = &dec.left {
        for (i, &lambda) in lambdas.iter().enumerate() {
            let w = row(left, i);
            let r = distance(&w.matmul(a).unwrap(), &w.mul_scalar(lambda));
            assert!(r <= tol * scale, "{msg}: left residual {r} for λ[{i}]={lambda}");
            assert!((norm(&w) - 1.0).abs() < 1e-12, "{msg}: left vector {i} not unit");
        }
    }

    assert_eq!(lambdas.len(), n);
}

// ============================================================================
// Known Spectra
// ============================================================================

#[test]
fn test_rotation_has_imaginary_pair() {
    let a = NdArray::from_rows(&[[0.0, 1.0], [-1.0, 0.0]], DType::F64).unwrap();
    let dec = eig(&a, EigOptions::default().with_left(true)).unwrap();
    assert_spectrum_close(
        &dec.eigenvalues.to_vec(),
        &[Complex128::new(0.0, -1.0), Complex128::new(0.0, 1.0)],
        1e-12,
        "rotation spectrum",
    );
    assert_eigenpairs(&a, &dec, 1e-12, "rotation");
}

#[test]
fn test_diagonal_eigenvectors_are_axes() {
    let a = NdArray::from_rows(&[[2.0, 0.0], [0.0, 3.0]], DType::F64).unwrap();
    let dec = eig(&a, EigOptions::default()).unwrap();
    let lambdas = dec.eigenvalues.to_vec::<Complex128>();
    let right = dec.right.unwrap();

    for (i, lambda) in lambdas.iter().enumerate() {
        let axis = if (lambda.re - 2.0).abs() < 1e-12 { 0 } else { 1 };
        assert!((lambda.re - [2.0, 3.0][axis]).abs() < 1e-12);
        let v = column(&right, i).to_vec::<Complex128>();
        assert!((v[axis].magnitude() - 1.0).abs() < 1e-12);
        assert!(v[1 - axis].magnitude() < 1e-12);
    }
}

#[test]
fn test_companion_matrix_roots() {
    // x⁴ - 7x³ + 21x² - 37x + 30 = (x - 2)(x - 3)(x² - 2x + 5)
    let a = NdArray::from_rows(
        &[
            [7.0, -21.0, 37.0, -30.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ],
        DType::F64,
    )
    .unwrap();
    let dec = eig(&a, EigOptions::default().with_left(true)).unwrap();
    assert_spectrum_close(
        &dec.eigenvalues.to_vec(),
        &[
            Complex128::new(1.0, -2.0),
            Complex128::new(1.0, 2.0),
            Complex128::new(2.0, 0.0),
            Complex128::new(3.0, 0.0),
        ],
        1e-8,
        "companion roots",
    );
    assert_eigenpairs(&a, &dec, 1e-9, "companion");
}

#[test]
fn test_spectrum_scales_with_matrix() {
    let rotation = NdArray::from_rows(&[[0.0, 1.0], [-1.0, 0.0]], DType::F64).unwrap();
    let tridiagonal = NdArray::from_rows(
        &[[1.0, 2.0, 0.0], [3.0, 1.0, 4.0], [0.0, 5.0, 1.0]],
        DType::F64,
    )
    .unwrap();

    for base in [rotation, tridiagonal] {
        let reference = eigvals(&base).unwrap().to_vec::<Complex128>();
        let radius = reference.iter().fold(0.0f64, |acc, z| acc.max(z.magnitude()));

        for s in [1e160, 1e-160] {
            let scaled = &base * s;
            let dec = eig(&scaled, EigOptions::default().with_left(true)).unwrap();
            let unscaled: Vec<Complex128> = dec
                .eigenvalues
                .to_vec::<Complex128>()
                .into_iter()
                .map(|z| z / s)
                .collect();
            let msg = format!("n={} scaled by {s:e}", base.nrows());
            assert_spectrum_close(&unscaled, &reference, 1e-12 * radius, &msg);
            assert_eigenpairs(&scaled, &dec, 1e-12, &msg);
        }
    }
}

#[test]
fn test_single_element_f32() {
    let a = NdArray::from_rows(&[[-4.5f32]], DType::F32).unwrap();
    let dec = eig(&a, EigOptions::default()).unwrap();
    assert_eq!(dec.eigenvalues.dtype(), DType::Complex64);
    assert_eq!(dec.eigenvalues.real(), &[-4.5]);
    assert_eq!(dec.right.unwrap().real(), &[1.0]);
}

// ============================================================================
// Random Matrices
// ============================================================================

#[test]
fn test_random_real_eigenpairs() {
    let mut rng = rng(42);
    for n in 2..=6 {
        let a = random_matrix(&mut rng, n);
        let dec = eig(&a, EigOptions::default().with_left(true)).unwrap();
        assert_eq!(dec.eigenvalues.dtype(), DType::Complex128);
        assert_eigenpairs(&a, &dec, 1e-9, &format!("real n={n}"));
    }
}

#[test]
fn test_random_complex_eigenpairs() {
    let mut rng = rng(5);
    for n in [3, 5, 8] {
        let a = random_complex_matrix(&mut rng, n);
        let dec = eig(&a, EigOptions::default().with_left(true)).unwrap();
        assert_eigenpairs(&a, &dec, 1e-9, &format!("complex n={n}"));
    }
}

#[test]
fn test_eigvals_match_full_decomposition() {
    let a = random_matrix(&mut rng(3), 5);
    let values = eigvals(&a).unwrap();
    let dec = eig(&a, EigOptions::default().with_left(true)).unwrap();
    assert_eq!(values, dec.eigenvalues);
}

#[test]
fn test_iteration_cap() {
    let a = NdArray::from_rows(
        &[
            [7.0, -21.0, 37.0, -30.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ],
        DType::F64,
    )
    .unwrap();
    assert_eq!(
        eig(&a, EigOptions::default().with_max_iterations(0)),
        Err(Error::NoConvergence { iterations: 1 })
    );
}

#[test]
fn test_non_square_rejected() {
    let a = NdArray::zeros(&[2, 3], DType::F64).unwrap();
    assert!(matches!(eig(&a, EigOptions::default()), Err(Error::ShapeMismatch { .. })));
    assert!(matches!(schur(&a), Err(Error::ShapeMismatch { .. })));
    assert!(matches!(hessenberg(&a), Err(Error::ShapeMismatch { .. })));
}

// ============================================================================
// Hessenberg and Schur
// ============================================================================

#[test]
fn test_hessenberg_structure() {
    let a = random_matrix(&mut rng(9), 6);
    let HessenbergDecomposition { q, h } = hessenberg(&a).unwrap();

    for r in 0..6isize {
        for c in 0..r - 1 {
            assert_eq!(h.item(&[r, c]).unwrap().magnitude(), 0.0, "H[{r},{c}]");
        }
    }
    assert_near_identity(&adjoint(&q).matmul(&q).unwrap(), 1e-12, "QᴴQ");
    let back = q.matmul(&h).unwrap().matmul(&adjoint(&q)).unwrap();
    assert!(distance(&back, &a.astype(DType::Complex128)) < 1e-12);
}

#[test]
fn test_hessenberg_in_place_complex() {
    let original = random_complex_matrix(&mut rng(13), 5);
    let mut a = original.clone();
    let q = hessenberg_in_place(&mut a).unwrap();
    assert_eq!(a.item(&[4, 1]).unwrap().magnitude(), 0.0);
    let back = q.matmul(&a).unwrap().matmul(&adjoint(&q)).unwrap();
    assert!(distance(&back, &original) < 1e-12);
}

#[test]
fn test_schur_form() {
    let a = random_complex_matrix(&mut rng(21), 6);
    let SchurDecomposition { q, t } = schur(&a).unwrap();

    for r in 1..6isize {
        for c in 0..r {
            assert_eq!(t.item(&[r, c]).unwrap().magnitude(), 0.0, "T[{r},{c}]");
        }
    }
    assert_near_identity(&adjoint(&q).matmul(&q).unwrap(), 1e-12, "QᴴQ");
    let back = q.matmul(&t).unwrap().matmul(&adjoint(&q)).unwrap();
    assert!(distance(&back, &a) < 1e-11);

    // Diagonal of T is the spectrum eig reports
    let values = eigvals(&a).unwrap().to_vec::<Complex128>();
    let diag: Vec<Complex128> = (0..6isize)
        .map(|i| t.item(&[i, i]).unwrap().to_complex())
        .collect();
    assert_spectrum_close(&diag, &values, 1e-10, "schur diagonal");
}
