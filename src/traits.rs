//! Core traits for estimators and transformers.
//!
//! These traits define the fit/transform/predict contracts shared by the
//! scaler and the cluster model.

use crate::error::Result;
use crate::primitives::Matrix;

/// Trait for unsupervised learning models.
///
/// # Examples
///
/// ```
/// use regional_typology::prelude::*;
///
/// // Three clearly separated groups
/// let data = Matrix::from_vec(6, 2, vec![
///     0.0, 0.0, 0.1, 0.1,
///     10.0, 10.0, 10.1, 10.1,
///     -10.0, 10.0, -10.1, 10.1,
/// ]).expect("valid matrix");
///
/// let mut kmeans = KMeans::new(3).with_random_state(42);
/// kmeans.fit(&data).expect("fit succeeds");
/// let labels = kmeans.predict(&data).expect("model is fitted");
/// assert_eq!(labels.len(), 6);
/// ```
pub trait UnsupervisedEstimator {
    /// The type of labels/clusters produced.
    type Labels;

    /// Fits the model to data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (empty data, invalid parameters, etc.).
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()>;

    /// Predicts cluster assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or dimensions mismatch.
    fn predict(&self, x: &Matrix<f64>) -> Result<Self::Labels>;
}

/// Trait for data transformers (scalers).
///
/// ```
/// use regional_typology::prelude::*;
///
/// let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).expect("valid matrix");
/// let mut scaler = StandardScaler::new();
/// let scaled = scaler.fit_transform(&x).expect("non-constant column");
/// assert!(scaled.get(1, 0).abs() < 1e-12);
/// ```
pub trait Transformer {
    /// Fits the transformer to data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()>;

    /// Transforms data using fitted parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if transformer is not fitted.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>>;

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit_transform(&mut self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}
