//! Tests for preprocessing module.

use super::*;

#[test]
fn test_new() {
    let scaler = StandardScaler::new();
    assert!(!scaler.is_fitted());
    assert!(scaler.mean().is_err());
}

#[test]
fn test_fit_basic() {
    let data = Matrix::from_vec(3, 2, vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0])
        .expect("valid matrix dimensions");

    let mut scaler = StandardScaler::new();
    scaler
        .fit(&data)
        .expect("fit should succeed with valid data");

    assert!(scaler.is_fitted());

    let mean = scaler.mean().expect("fitted");
    assert!((mean[0] - 2.0).abs() < 1e-12);
    assert!((mean[1] - 20.0).abs() < 1e-12);

    // Population std: sqrt(2/3)
    let std = scaler.std().expect("fitted");
    let expected_std = (2.0_f64 / 3.0).sqrt();
    assert!((std[0] - expected_std).abs() < 1e-12);
    assert!((std[1] - expected_std * 10.0).abs() < 1e-10);
}

#[test]
fn test_transform_zero_mean_unit_variance() {
    let data = Matrix::from_vec(4, 2, vec![35.0, 12.0, 80.0, 9.5, 22.0, 17.0, 41.0, 14.0])
        .expect("valid matrix dimensions");

    let mut scaler = StandardScaler::new();
    let transformed = scaler
        .fit_transform(&data)
        .expect("fit_transform should succeed with valid data");

    for j in 0..2 {
        let col: Vec<f64> = transformed.rows().map(|row| row[j]).collect();
        let mean = col.iter().sum::<f64>() / col.len() as f64;
        let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / col.len() as f64;
        assert!(mean.abs() < 1e-12, "Column {j} mean should be ~0");
        assert!((var.sqrt() - 1.0).abs() < 1e-12, "Column {j} std should be ~1");
    }
}

#[test]
fn test_transform_new_data_uses_training_stats() {
    let train = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).expect("valid matrix dimensions");
    let test = Matrix::from_vec(2, 1, vec![4.0, 5.0]).expect("valid matrix dimensions");

    let mut scaler = StandardScaler::new();
    scaler.fit(&train).expect("fit should succeed");

    let transformed = scaler.transform(&test).expect("transform should succeed");

    let std = (2.0_f64 / 3.0).sqrt();
    assert!((transformed.get(0, 0) - (4.0 - 2.0) / std).abs() < 1e-12);
    assert!((transformed.get(1, 0) - (5.0 - 2.0) / std).abs() < 1e-12);
}

#[test]
fn test_transform_row_matches_batch_exactly() {
    let data = Matrix::from_vec(3, 2, vec![0.3, 17.1, 1.7, 10.9, 2.2, 44.4])
        .expect("valid matrix dimensions");
    let mut scaler = StandardScaler::new();
    let batch = scaler.fit_transform(&data).expect("fit_transform");

    for i in 0..3 {
        let single = scaler.transform_row(data.row_slice(i)).expect("row transform");
        // Bitwise equality, not approximate
        assert_eq!(single.as_slice(), batch.row_slice(i));
    }
}

#[test]
fn test_transform_row_wrong_width() {
    let data = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 5.0]).expect("valid");
    let mut scaler = StandardScaler::new();
    scaler.fit(&data).expect("fit");
    assert!(matches!(
        scaler.transform_row(&[1.0]),
        Err(TypologyError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_inverse_transform() {
    let data = Matrix::from_vec(3, 2, vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0])
        .expect("valid matrix dimensions");

    let mut scaler = StandardScaler::new();
    let transformed = scaler.fit_transform(&data).expect("fit_transform");
    let recovered = scaler
        .inverse_transform(&transformed)
        .expect("inverse_transform should succeed");

    for i in 0..3 {
        for j in 0..2 {
            assert!(
                (data.get(i, j) - recovered.get(i, j)).abs() < 1e-10,
                "Mismatch at ({i}, {j})"
            );
        }
    }
}

#[test]
fn test_constant_feature_is_rejected() {
    let data = Matrix::from_vec(3, 2, vec![1.0, 5.0, 2.0, 5.0, 3.0, 5.0])
        .expect("valid matrix dimensions");

    let mut scaler = StandardScaler::new();
    let err = scaler.fit(&data).expect_err("constant column must fail");
    assert_eq!(
        err,
        TypologyError::DegenerateFeature {
            feature: "column 1".to_string()
        }
    );
    assert!(!scaler.is_fitted(), "failed fit must not leave partial state");
}

#[test]
fn test_constant_feature_reported_by_name() {
    let data = Matrix::from_vec(2, 2, vec![1.0, 70.0, 2.0, 70.0]).expect("valid");
    let mut scaler = StandardScaler::new().with_feature_names(["gdp_per_capita", "hdi_total"]);
    let err = scaler.fit(&data).expect_err("constant column must fail");
    assert!(err.to_string().contains("hdi_total"));
}

#[test]
fn test_empty_data_error() {
    let data = Matrix::from_vec(0, 2, vec![]).expect("empty matrix");
    let mut scaler = StandardScaler::new();
    assert!(scaler.fit(&data).is_err());
}

#[test]
fn test_transform_not_fitted_error() {
    let data = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).expect("valid matrix dimensions");
    let scaler = StandardScaler::new();
    assert!(matches!(
        scaler.transform(&data),
        Err(TypologyError::NotFitted { .. })
    ));
}

#[test]
fn test_transform_dimension_mismatch() {
    let train = Matrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 7.0]).expect("valid");
    let test = Matrix::from_vec(1, 3, vec![1.0, 2.0, 3.0]).expect("valid");
    let mut scaler = StandardScaler::new();
    scaler.fit(&train).expect("fit");
    assert!(scaler.transform(&test).is_err());
}

#[test]
fn test_minmax_basic() {
    let data = Matrix::from_vec(3, 2, vec![0.0, 0.0, 5.0, 10.0, 10.0, 20.0])
        .expect("valid matrix dimensions");

    let mut scaler = MinMaxScaler::new();
    let scaled = scaler.fit_transform(&data).expect("fit_transform");

    assert!(scaler.is_fitted());
    assert!((scaled.get(0, 1) - 0.0).abs() < 1e-12);
    assert!((scaled.get(1, 1) - 0.5).abs() < 1e-12);
    assert!((scaled.get(2, 1) - 1.0).abs() < 1e-12);
}

#[test]
fn test_minmax_constant_column_maps_to_lower_bound() {
    let data = Matrix::from_vec(3, 1, vec![4.0, 4.0, 4.0]).expect("valid");
    let mut scaler = MinMaxScaler::new();
    let scaled = scaler.fit_transform(&data).expect("fit_transform");
    assert!(scaled.as_slice().iter().all(|&v| v == 0.0));
}

#[test]
fn test_minmax_not_fitted() {
    let data = Matrix::from_vec(1, 1, vec![4.0]).expect("valid");
    assert!(MinMaxScaler::new().transform(&data).is_err());
}
