//! Clustering quality metrics.

use crate::primitives::Matrix;

/// Squared Euclidean distance between two equal-length points.
#[must_use]
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Computes the inertia (within-cluster sum of squares).
///
/// Inertia = Σ ||x - centroid||²
///
/// # Examples
///
/// ```
/// use regional_typology::metrics::inertia;
/// use regional_typology::primitives::Matrix;
///
/// let data = Matrix::from_vec(4, 2, vec![
///     0.0, 0.0,
///     1.0, 0.0,
///     0.0, 1.0,
///     1.0, 1.0,
/// ]).expect("Matrix dimensions and data length are valid");
/// let centroids = Matrix::from_vec(1, 2, vec![0.5, 0.5]).expect("valid");
/// let labels = vec![0, 0, 0, 0];
/// let score = inertia(&data, &centroids, &labels);
/// assert!((score - 2.0).abs() < 1e-12);
/// ```
///
/// # Panics
///
/// Panics if a label is not a valid centroid row.
#[must_use]
pub fn inertia(data: &Matrix<f64>, centroids: &Matrix<f64>, labels: &[usize]) -> f64 {
    data.rows()
        .zip(labels)
        .map(|(point, &label)| squared_distance(point, centroids.row_slice(label)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_distance() {
        assert!((squared_distance(&[0.0, 0.0], &[3.0, 4.0]) - 25.0).abs() < 1e-12);
        assert_eq!(squared_distance(&[1.5], &[1.5]), 0.0);
    }

    #[test]
    fn test_inertia_zero_when_points_are_centroids() {
        let data = Matrix::from_vec(2, 2, vec![1.0, 1.0, 5.0, 5.0]).expect("valid");
        let labels = vec![0, 1];
        assert_eq!(inertia(&data, &data, &labels), 0.0);
    }

    #[test]
    fn test_inertia_two_clusters() {
        let data = Matrix::from_vec(4, 1, vec![0.0, 2.0, 10.0, 14.0]).expect("valid");
        let centroids = Matrix::from_vec(2, 1, vec![1.0, 12.0]).expect("valid");
        let labels = vec![0, 0, 1, 1];
        // 1 + 1 + 4 + 4
        assert!((inertia(&data, &centroids, &labels) - 10.0).abs() < 1e-12);
    }
}
