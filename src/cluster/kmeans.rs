//! K-Means clustering algorithm.
//!
//! Uses Lloyd's algorithm with seeded k-means++ initialization and keeps
//! the best of several restarts.

use crate::config::{DEFAULT_MAX_ITER, DEFAULT_N_INIT, DEFAULT_SEED, DEFAULT_TOL};
use crate::error::{Result, TypologyError};
use crate::metrics::{inertia, squared_distance};
use crate::primitives::Matrix;
use crate::traits::UnsupervisedEstimator;
use log::debug;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// K-Means clustering algorithm.
///
/// # Algorithm
///
/// 1. Initialize centroids using k-means++ (D²-weighted sampling from a
///    seeded generator)
/// 2. Assign each sample to nearest centroid
/// 3. Update centroids as mean of assigned samples
/// 4. Repeat until convergence or max iterations
/// 5. Repeat 1-4 `n_init` times and keep the lowest-inertia run
///
/// The generator is seeded once per `fit` and shared by all restarts, so a
/// fixed seed reproduces the same partition on the same data. Cluster ids
/// carry no meaning beyond one fit.
///
/// After convergence the training labels are recomputed against the final
/// centroids, so `labels()` always equals `predict` on the training matrix.
/// Distance ties go to the lowest cluster id.
///
/// # Examples
///
/// ```
/// use regional_typology::prelude::*;
///
/// let data = Matrix::from_vec(6, 2, vec![
///     1.0, 2.0,
///     1.5, 1.8,
///     5.0, 8.0,
///     8.0, 8.0,
///     1.0, 0.6,
///     9.0, 11.0,
/// ]).expect("Valid matrix dimensions and data length");
///
/// let mut kmeans = KMeans::new(2).with_random_state(42);
/// kmeans.fit(&data).expect("Fit succeeds with valid data");
///
/// let labels = kmeans.predict(&data).expect("fitted");
/// assert_eq!(labels.len(), 6);
/// assert_eq!(labels[0], labels[1]);
/// ```
///
/// # Performance
///
/// - Time complexity: O(r·n·k·d·i) where r=restarts, n=samples, k=clusters,
///   d=features, i=iterations
/// - Space complexity: O(nk)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeans {
    /// Number of clusters.
    n_clusters: usize,
    /// Maximum iterations per restart.
    max_iter: usize,
    /// Convergence tolerance on centroid shift.
    tol: f64,
    /// Number of k-means++ restarts.
    n_init: usize,
    /// Random seed for initialization.
    random_state: Option<u64>,
    /// Cluster centroids after fitting.
    centroids: Option<Matrix<f64>>,
    /// Labels for training data.
    labels: Option<Vec<usize>>,
    /// Sum of squared distances (inertia) of the kept run.
    inertia: f64,
    /// Number of iterations of the kept run.
    n_iter: usize,
}

impl KMeans {
    /// Creates a new K-Means with the specified number of clusters.
    #[must_use]
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
            n_init: DEFAULT_N_INIT,
            random_state: None,
            centroids: None,
            labels: None,
            inertia: 0.0,
            n_iter: 0,
        }
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Sets the number of restarts (at least one).
    #[must_use]
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init.max(1);
        self
    }

    /// Sets the random seed for reproducibility.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Number of clusters.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Returns the cluster centroids.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted.
    pub fn centroids(&self) -> Result<&Matrix<f64>> {
        self.centroids.as_ref().ok_or(TypologyError::NotFitted {
            component: "KMeans",
        })
    }

    /// Training labels from the last `fit`.
    #[must_use]
    pub fn labels(&self) -> Option<&[usize]> {
        self.labels.as_deref()
    }

    /// Returns the inertia (within-cluster sum of squares).
    #[must_use]
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Returns the number of iterations of the kept run.
    #[must_use]
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.centroids.is_some()
    }

    /// Assigns one point to its nearest centroid.
    ///
    /// A point so far away that its squared distance overflows, or swamps
    /// the gap between the two closest centroids in f64 rounding, has no
    /// meaningful nearest centroid and is rejected instead of falling to
    /// cluster 0 through the tie rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted, the point has the wrong
    /// number of features, or [`TypologyError::ValidationError`] if the
    /// point is too far out to assign.
    pub fn predict_one(&self, point: &[f64]) -> Result<usize> {
        let centroids = self.centroids()?;
        if point.len() != centroids.n_cols() {
            return Err(TypologyError::dimension_mismatch(
                "features",
                centroids.n_cols(),
                point.len(),
            ));
        }
        let nearest = nearest_centroid(point, centroids);
        let dist = squared_distance(point, centroids.row_slice(nearest));
        let separation = min_separation(centroids);
        if !dist.is_finite() || (separation > 0.0 && dist * f64::EPSILON >= separation) {
            return Err(TypologyError::validation(
                "features",
                format!("point too far from every centroid to assign (squared distance {dist:e})"),
            ));
        }
        Ok(nearest)
    }

    /// Initializes centroids using k-means++.
    fn kmeans_plusplus_init(&self, x: &Matrix<f64>, rng: &mut StdRng) -> Result<Matrix<f64>> {
        let (n_samples, n_features) = x.shape();
        let mut chosen: Vec<f64> = Vec::with_capacity(self.n_clusters * n_features);

        // First centroid: uniform draw
        let first_idx = rng.gen_range(0..n_samples);
        chosen.extend_from_slice(x.row_slice(first_idx));

        let mut min_distances: Vec<f64> = x
            .rows()
            .map(|row| squared_distance(row, x.row_slice(first_idx)))
            .collect();

        for n_current in 1..self.n_clusters {
            // Select point with probability proportional to D²; all-zero
            // weights mean every point coincides with a chosen centroid
            let sampler = WeightedIndex::new(&min_distances).map_err(|_| {
                TypologyError::InsufficientCleanData {
                    rows: n_current,
                    required: self.n_clusters,
                }
            })?;
            let next_idx = sampler.sample(rng);
            let next = x.row_slice(next_idx);
            chosen.extend_from_slice(next);

            for (dist, row) in min_distances.iter_mut().zip(x.rows()) {
                *dist = dist.min(squared_distance(row, next));
            }
        }

        Matrix::from_vec(self.n_clusters, n_features, chosen)
    }

    /// Assigns each sample to the nearest centroid.
    fn assign_labels(x: &Matrix<f64>, centroids: &Matrix<f64>) -> Vec<usize> {
        x.rows().map(|row| nearest_centroid(row, centroids)).collect()
    }

    /// Updates centroids as the mean of assigned samples. A cluster that lost
    /// all its members keeps its previous position.
    fn update_centroids(&self, x: &Matrix<f64>, labels: &[usize], old: &Matrix<f64>) -> Result<Matrix<f64>> {
        let n_features = x.n_cols();
        let mut sums = vec![0.0; self.n_clusters * n_features];
        let mut counts = vec![0usize; self.n_clusters];

        for (row, &label) in x.rows().zip(labels) {
            counts[label] += 1;
            for (j, &v) in row.iter().enumerate() {
                sums[label * n_features + j] += v;
            }
        }

        for (k, &count) in counts.iter().enumerate() {
            let slot = &mut sums[k * n_features..(k + 1) * n_features];
            if count > 0 {
                for v in slot.iter_mut() {
                    *v /= count as f64;
                }
            } else {
                slot.copy_from_slice(old.row_slice(k));
            }
        }

        Matrix::from_vec(self.n_clusters, n_features, sums)
    }

    /// Checks if centroids have converged.
    fn centroids_converged(&self, old: &Matrix<f64>, new: &Matrix<f64>) -> bool {
        old.rows()
            .zip(new.rows())
            .all(|(a, b)| squared_distance(a, b) <= self.tol * self.tol)
    }

    /// One Lloyd run from the given starting centroids.
    fn lloyd(&self, x: &Matrix<f64>, mut centroids: Matrix<f64>) -> Result<(Matrix<f64>, usize)> {
        let mut n_iter = 0;
        for iter in 0..self.max_iter {
            let labels = Self::assign_labels(x, &centroids);
            let new_centroids = self.update_centroids(x, &labels, &centroids)?;
            let converged = self.centroids_converged(&centroids, &new_centroids);
            centroids = new_centroids;
            n_iter = iter + 1;
            if converged {
                break;
            }
        }
        Ok((centroids, n_iter))
    }
}

/// Index of the closest centroid; ties resolve to the lowest index.
fn nearest_centroid(point: &[f64], centroids: &Matrix<f64>) -> usize {
    let mut min_dist = f64::INFINITY;
    let mut min_cluster = 0;
    for (k, centroid) in centroids.rows().enumerate() {
        let dist = squared_distance(point, centroid);
        if dist < min_dist {
            min_dist = dist;
            min_cluster = k;
        }
    }
    min_cluster
}

/// Smallest squared distance between two centroids; infinite for k < 2.
fn min_separation(centroids: &Matrix<f64>) -> f64 {
    let rows: Vec<&[f64]> = centroids.rows().collect();
    let mut min = f64::INFINITY;
    for (i, a) in rows.iter().enumerate() {
        for b in &rows[i + 1..] {
            min = min.min(squared_distance(a, b));
        }
    }
    min
}

impl UnsupervisedEstimator for KMeans {
    type Labels = Vec<usize>;

    /// Fits the K-Means model to data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Data is empty or has fewer samples than clusters
    /// - Fewer than `n_clusters` distinct points exist
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let n_samples = x.n_rows();

        if self.n_clusters == 0 {
            return Err(TypologyError::dimension_mismatch("n_clusters", 1, 0));
        }

        if n_samples < self.n_clusters {
            return Err(TypologyError::InsufficientCleanData {
                rows: n_samples,
                required: self.n_clusters,
            });
        }

        let mut rng = StdRng::seed_from_u64(self.random_state.unwrap_or(DEFAULT_SEED));
        let mut best: Option<(Matrix<f64>, Vec<usize>, f64, usize)> = None;

        for run in 0..self.n_init {
            let init = self.kmeans_plusplus_init(x, &mut rng)?;
            let (centroids, n_iter) = self.lloyd(x, init)?;
            let labels = Self::assign_labels(x, &centroids);
            let run_inertia = inertia(x, &centroids, &labels);
            debug!("k-means restart {run}: inertia={run_inertia:.6} after {n_iter} iterations");

            // Strict comparison keeps the earliest run on ties
            if best.as_ref().map_or(true, |(_, _, b, _)| run_inertia < *b) {
                best = Some((centroids, labels, run_inertia, n_iter));
            }
        }

        if let Some((centroids, labels, best_inertia, n_iter)) = best {
            self.centroids = Some(centroids);
            self.labels = Some(labels);
            self.inertia = best_inertia;
            self.n_iter = n_iter;
        }

        Ok(())
    }

    /// Predicts cluster labels for new data.
    fn predict(&self, x: &Matrix<f64>) -> Result<Vec<usize>> {
        let centroids = self.centroids()?;
        if x.n_cols() != centroids.n_cols() {
            return Err(TypologyError::dimension_mismatch(
                "features",
                centroids.n_cols(),
                x.n_cols(),
            ));
        }
        Ok(Self::assign_labels(x, centroids))
    }
}

#[cfg(test)]
#[path = "tests_kmeans.rs"]
mod tests;
