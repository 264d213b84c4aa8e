//! Clustering configuration.
//!
//! The production values are fixed constants; the builder setters exist so
//! tests can run alternative seeds or cheaper restart counts against
//! independent model instances.

use serde::{Deserialize, Serialize};

/// Number of typologies (and therefore k-means clusters). Not configurable:
/// the labeling heuristic is only defined for exactly three clusters.
pub const N_CLUSTERS: usize = 3;

/// Seed for k-means++ initialization.
pub const DEFAULT_SEED: u64 = 42;

/// Number of k-means++ restarts; the lowest-inertia run is kept.
pub const DEFAULT_N_INIT: usize = 10;

/// Lloyd iteration cap per restart.
pub const DEFAULT_MAX_ITER: usize = 300;

/// Centroid-shift convergence tolerance.
pub const DEFAULT_TOL: f64 = 1e-4;

/// Parameters for one training run.
///
/// # Examples
///
/// ```
/// use regional_typology::config::{PipelineConfig, DEFAULT_SEED};
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.seed(), DEFAULT_SEED);
///
/// let quick = PipelineConfig::default().with_n_init(2);
/// assert_eq!(quick.n_init(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    seed: u64,
    n_init: usize,
    max_iter: usize,
    tol: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            n_init: DEFAULT_N_INIT,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
        }
    }
}

impl PipelineConfig {
    /// Sets the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of initialization restarts (at least one is run).
    #[must_use]
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init.max(1);
        self
    }

    /// Sets the iteration cap per restart.
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

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn n_init(&self) -> usize {
        self.n_init
    }

    #[must_use]
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }
}
