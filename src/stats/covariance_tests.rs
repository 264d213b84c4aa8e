use super::*;

#[test]
fn test_cov_positive_relationship() {
    let x = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let y = Vector::from_slice(&[2.0, 4.0, 6.0, 8.0, 10.0]);

    let covariance = cov(&x, &y).expect("Should compute covariance");
    // Var(x) = 2, y = 2x
    assert!((covariance - 4.0).abs() < 1e-12);
}

#[test]
fn test_cov_negative_relationship() {
    let x = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let y = Vector::from_slice(&[10.0, 8.0, 6.0, 4.0, 2.0]);

    let covariance = cov(&x, &y).expect("Should compute covariance");
    assert!(
        covariance < 0.0,
        "Negative relationship should have negative covariance"
    );
}

#[test]
fn test_cov_dimension_mismatch() {
    let x = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let y = Vector::from_slice(&[1.0, 2.0]);

    let err = cov(&x, &y).expect_err("Should be dimension mismatch");
    assert!(matches!(err, TypologyError::DimensionMismatch { .. }));
}

#[test]
fn test_cov_empty() {
    let x: Vector<f64> = Vector::from_slice(&[]);
    let y: Vector<f64> = Vector::from_slice(&[]);

    assert!(cov(&x, &y).is_err());
}

#[test]
fn test_corr_perfect_negative() {
    let x = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
    let y = Vector::from_slice(&[8.0, 6.0, 4.0, 2.0]);

    let r = corr(&x, &y).expect("Should compute correlation");
    assert!((r + 1.0).abs() < 1e-12);
}

#[test]
fn test_corr_bounded() {
    let x = Vector::from_slice(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);
    let y = Vector::from_slice(&[2.0, 7.0, 1.0, 8.0, 2.0, 8.0, 1.0, 8.0]);

    let r = corr(&x, &y).expect("Should compute correlation");
    assert!((-1.0..=1.0).contains(&r));
}

#[test]
fn test_corr_symmetric() {
    let x = Vector::from_slice(&[1.0, 3.0, 2.0, 5.0]);
    let y = Vector::from_slice(&[2.0, 2.5, 4.0, 7.0]);

    let a = corr(&x, &y).expect("Should compute correlation");
    let b = corr(&y, &x).expect("Should compute correlation");
    assert!((a - b).abs() < 1e-12);
}

#[test]
fn test_corr_constant_input() {
    let x = Vector::from_slice(&[5.0, 5.0, 5.0]);
    let y = Vector::from_slice(&[1.0, 2.0, 3.0]);

    let err = corr(&x, &y).expect_err("x has no variance");
    assert_eq!(
        err,
        TypologyError::DegenerateFeature {
            feature: "x".to_string()
        }
    );
}
