use super::*;

fn three_groups() -> Matrix<f64> {
    Matrix::from_vec(
        9,
        2,
        vec![
            0.0, 0.0, 0.2, 0.1, 0.1, 0.3, // group A
            10.0, 10.0, 10.2, 9.9, 9.8, 10.1, // group B
            -10.0, 10.0, -9.9, 10.2, -10.1, 9.8, // group C
        ],
    )
    .expect("valid matrix")
}

#[test]
fn test_new() {
    let kmeans = KMeans::new(3);
    assert_eq!(kmeans.n_clusters(), 3);
    assert!(!kmeans.is_fitted());
    assert!(kmeans.centroids().is_err());
    assert!(kmeans.labels().is_none());
}

#[test]
fn test_builders() {
    let kmeans = KMeans::new(3)
        .with_max_iter(10)
        .with_tol(1e-6)
        .with_n_init(0)
        .with_random_state(7);
    assert_eq!(kmeans.max_iter, 10);
    assert!((kmeans.tol - 1e-6).abs() < 1e-15);
    assert_eq!(kmeans.n_init, 1);
    assert_eq!(kmeans.random_state, Some(7));
}

#[test]
fn test_fit_recovers_three_groups() {
    let data = three_groups();
    let mut kmeans = KMeans::new(3).with_random_state(42);
    kmeans.fit(&data).expect("fit succeeds");

    let labels = kmeans.labels().expect("fitted").to_vec();
    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[1], labels[2]);
    assert_eq!(labels[3], labels[4]);
    assert_eq!(labels[4], labels[5]);
    assert_eq!(labels[6], labels[7]);
    assert_eq!(labels[7], labels[8]);
    assert_ne!(labels[0], labels[3]);
    assert_ne!(labels[0], labels[6]);
    assert_ne!(labels[3], labels[6]);
    assert_eq!(kmeans.centroids().expect("fitted").shape(), (3, 2));
}

#[test]
fn test_labels_equal_predict_on_training_data() {
    let data = three_groups();
    let mut kmeans = KMeans::new(3).with_random_state(1);
    kmeans.fit(&data).expect("fit succeeds");
    let predicted = kmeans.predict(&data).expect("fitted");
    assert_eq!(kmeans.labels().expect("fitted"), predicted.as_slice());
}

#[test]
fn test_predict_one_matches_batch() {
    let data = three_groups();
    let mut kmeans = KMeans::new(3).with_random_state(42);
    kmeans.fit(&data).expect("fit succeeds");
    let batch = kmeans.predict(&data).expect("fitted");
    for (i, &label) in batch.iter().enumerate() {
        assert_eq!(kmeans.predict_one(data.row_slice(i)).expect("fitted"), label);
    }
}

#[test]
fn test_predict_one_nearest_centroid() {
    let data = three_groups();
    let mut kmeans = KMeans::new(3).with_random_state(42);
    kmeans.fit(&data).expect("fit succeeds");
    let near_b = kmeans.predict_one(&[9.0, 9.0]).expect("fitted");
    assert_eq!(near_b, kmeans.labels().expect("fitted")[3]);
}

#[test]
fn test_predict_one_wrong_width() {
    let data = three_groups();
    let mut kmeans = KMeans::new(3).with_random_state(42);
    kmeans.fit(&data).expect("fit succeeds");
    assert!(matches!(
        kmeans.predict_one(&[1.0]),
        Err(TypologyError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_predict_one_rejects_unresolvable_distance() {
    let data = three_groups();
    let mut kmeans = KMeans::new(3).with_random_state(42);
    kmeans.fit(&data).expect("fit succeeds");

    for far in [[1e100, 0.0], [0.0, -1e30], [1e200, 1e200]] {
        assert!(matches!(
            kmeans.predict_one(&far),
            Err(TypologyError::ValidationError { .. })
        ));
    }
    // Far but still resolvable
    assert!(kmeans.predict_one(&[1e5, 1e5]).is_ok());
}

#[test]
fn test_same_seed_same_partition() {
    let data = three_groups();
    let mut a = KMeans::new(3).with_random_state(42);
    let mut b = KMeans::new(3).with_random_state(42);
    a.fit(&data).expect("fit succeeds");
    b.fit(&data).expect("fit succeeds");
    assert_eq!(a.labels(), b.labels());
    assert_eq!(a.centroids().expect("fitted"), b.centroids().expect("fitted"));
}

#[test]
fn test_inertia_non_negative_and_matches_metric() {
    let data = three_groups();
    let mut kmeans = KMeans::new(3).with_random_state(42);
    kmeans.fit(&data).expect("fit succeeds");
    let labels = kmeans.labels().expect("fitted");
    let expected = inertia(&data, kmeans.centroids().expect("fitted"), labels);
    assert!(kmeans.inertia() >= 0.0);
    assert!((kmeans.inertia() - expected).abs() < 1e-12);
    assert!(kmeans.n_iter() >= 1);
}

#[test]
fn test_more_restarts_never_worse() {
    let data = three_groups();
    let mut single = KMeans::new(3).with_random_state(5).with_n_init(1);
    let mut many = KMeans::new(3).with_random_state(5).with_n_init(10);
    single.fit(&data).expect("fit succeeds");
    many.fit(&data).expect("fit succeeds");
    // The first restart of `many` is exactly `single`'s only run
    assert!(many.inertia() <= single.inertia() + 1e-12);
}

#[test]
fn test_empty_data_error() {
    let data = Matrix::from_vec(0, 2, vec![]).expect("empty matrix");
    let mut kmeans = KMeans::new(3);
    assert!(matches!(
        kmeans.fit(&data),
        Err(TypologyError::InsufficientCleanData { rows: 0, required: 3 })
    ));
}

#[test]
fn test_too_few_rows_error() {
    let data = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).expect("valid");
    let mut kmeans = KMeans::new(3);
    assert!(matches!(
        kmeans.fit(&data),
        Err(TypologyError::InsufficientCleanData { rows: 2, required: 3 })
    ));
}

#[test]
fn test_too_few_distinct_points_error() {
    // Four rows but only two distinct points
    let data =
        Matrix::from_vec(4, 2, vec![1.0, 1.0, 1.0, 1.0, 5.0, 5.0, 5.0, 5.0]).expect("valid");
    let mut kmeans = KMeans::new(3).with_random_state(42);
    assert!(matches!(
        kmeans.fit(&data),
        Err(TypologyError::InsufficientCleanData { .. })
    ));
    assert!(!kmeans.is_fitted());
}

#[test]
fn test_zero_clusters_rejected() {
    let data = three_groups();
    assert!(KMeans::new(0).fit(&data).is_err());
}

#[test]
fn test_nearest_centroid_tie_goes_to_lowest_id() {
    let centroids = Matrix::from_vec(2, 1, vec![-1.0, 1.0]).expect("valid");
    assert_eq!(nearest_centroid(&[0.0], &centroids), 0);
}

#[test]
fn test_empty_cluster_keeps_previous_centroid() {
    let kmeans = KMeans::new(2);
    let x = Matrix::from_vec(2, 1, vec![1.0, 3.0]).expect("valid");
    let old = Matrix::from_vec(2, 1, vec![0.0, 100.0]).expect("valid");
    let updated = kmeans
        .update_centroids(&x, &[0, 0], &old)
        .expect("shapes agree");
    assert!((updated.get(0, 0) - 2.0).abs() < 1e-12);
    assert!((updated.get(1, 0) - 100.0).abs() < 1e-12);
}
