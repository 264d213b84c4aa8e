//! Preprocessing transformers for feature standardization and display scaling.
//!
//! # Example
//!
//! ```
//! use regional_typology::prelude::*;
//!
//! // GDP in millions next to percentages: very different scales
//! let data = Matrix::from_vec(4, 2, vec![
//!     35.0, 12.0,
//!     80.0, 9.5,
//!     22.0, 17.0,
//!     41.0, 14.0,
//! ]).expect("valid matrix dimensions");
//!
//! let mut scaler = StandardScaler::new();
//! let scaled = scaler.fit_transform(&data).expect("no constant columns");
//!
//! // Each column now has mean ≈ 0 and std ≈ 1
//! assert!(scaled.get(0, 0).abs() < 2.0);
//! ```

use crate::error::{Result, TypologyError};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// Standard deviations at or below this are treated as zero variance.
pub const MIN_STD: f64 = 1e-12;

/// Standardizes features by removing mean and scaling to unit variance.
///
/// The standard score of a sample x is: z = (x - mean) / std
///
/// Fitting fails with [`TypologyError::DegenerateFeature`] when any column
/// is constant: dividing by a zero deviation would push non-finite values
/// into the cluster fit.
///
/// Batch [`Transformer::transform`] and single-row [`StandardScaler::transform_row`]
/// run the same per-element arithmetic, so a row scaled alone is
/// bit-identical to the same row scaled as part of a batch.
///
/// # Example
///
/// ```
/// use regional_typology::prelude::*;
///
/// let data = Matrix::from_vec(3, 2, vec![
///     0.0, 0.0,
///     1.0, 10.0,
///     2.0, 20.0,
/// ]).expect("valid matrix dimensions");
///
/// let mut scaler = StandardScaler::new();
/// let scaled = scaler.fit_transform(&data).expect("fit_transform should succeed");
/// let single = scaler.transform_row(&[1.0, 10.0]).expect("fitted, right width");
/// assert_eq!(single, scaled.row_slice(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Mean of each feature (computed during fit).
    mean: Option<Vec<f64>>,
    /// Population standard deviation of each feature (computed during fit).
    std: Option<Vec<f64>>,
    /// Column names used in error messages.
    feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    /// Creates an unfitted scaler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches column names so a degenerate column is reported by name.
    #[must_use]
    pub fn with_feature_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.feature_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the fitted per-feature means.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted.
    pub fn mean(&self) -> Result<&[f64]> {
        self.mean.as_deref().ok_or_else(Self::not_fitted)
    }

    /// Returns the fitted per-feature standard deviations.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted.
    pub fn std(&self) -> Result<&[f64]> {
        self.std.as_deref().ok_or_else(Self::not_fitted)
    }

    /// Returns true if the scaler has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.mean.is_some()
    }

    /// Standardizes one observation with the fitted statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted or the row has the
    /// wrong number of features.
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        let (mean, std) = self.fitted()?;
        if row.len() != mean.len() {
            return Err(TypologyError::dimension_mismatch(
                "features",
                mean.len(),
                row.len(),
            ));
        }
        Ok(row
            .iter()
            .zip(mean.iter().zip(std))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }

    /// Maps standardized values back to the original scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted or dimensions mismatch.
    pub fn inverse_transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (mean, std) = self.fitted()?;
        let (n_samples, n_features) = x.shape();
        if n_features != mean.len() {
            return Err(TypologyError::dimension_mismatch(
                "features",
                mean.len(),
                n_features,
            ));
        }

        let mut result = Vec::with_capacity(n_samples * n_features);
        for row in x.rows() {
            result.extend(row.iter().zip(mean.iter().zip(std)).map(|(z, (m, s))| z * s + m));
        }
        Matrix::from_vec(n_samples, n_features, result)
    }

    fn fitted(&self) -> Result<(&[f64], &[f64])> {
        match (&self.mean, &self.std) {
            (Some(mean), Some(std)) => Ok((mean, std)),
            _ => Err(Self::not_fitted()),
        }
    }

    fn not_fitted() -> TypologyError {
        TypologyError::NotFitted {
            component: "StandardScaler",
        }
    }

    fn feature_label(&self, idx: usize) -> String {
        self.feature_names
            .as_ref()
            .and_then(|names| names.get(idx).cloned())
            .unwrap_or_else(|| format!("column {idx}"))
    }
}

impl Transformer for StandardScaler {
    /// Computes the mean and population standard deviation of each feature.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples == 0 {
            return Err(TypologyError::InsufficientCleanData {
                rows: 0,
                required: 1,
            });
        }

        let mean = x.column_means();

        let mut std = vec![0.0; n_features];
        for row in x.rows() {
            for (j, &v) in row.iter().enumerate() {
                let diff = v - mean[j];
                std[j] += diff * diff;
            }
        }
        for s in &mut std {
            // Population std (divide by n, not n-1)
            *s = (*s / n_samples as f64).sqrt();
        }

        if let Some(idx) = std.iter().position(|&s| s.is_nan() || s <= MIN_STD) {
            return Err(TypologyError::DegenerateFeature {
                feature: self.feature_label(idx),
            });
        }

        self.mean = Some(mean);
        self.std = Some(std);

        Ok(())
    }

    /// Standardizes the data row by row using fitted mean and std.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (mean, _) = self.fitted()?;
        let (n_samples, n_features) = x.shape();
        if n_features != mean.len() {
            return Err(TypologyError::dimension_mismatch(
                "features",
                mean.len(),
                n_features,
            ));
        }

        let mut result = Vec::with_capacity(n_samples * n_features);
        for row in x.rows() {
            result.extend(self.transform_row(row)?);
        }
        Matrix::from_vec(n_samples, n_features, result)
    }
}

/// Scales features to [0, 1].
///
/// The transformation is: X_scaled = (X - X_min) / (X_max - X_min)
///
/// Used for the relative-performance heatmap, where every indicator has to
/// share one colour scale. A constant column maps to 0.
///
/// # Example
///
/// ```
/// use regional_typology::prelude::*;
///
/// let data = Matrix::from_vec(3, 2, vec![
///     0.0, 0.0,
///     5.0, 10.0,
///     10.0, 20.0,
/// ]).expect("valid matrix dimensions");
///
/// let mut scaler = MinMaxScaler::new();
/// let scaled = scaler.fit_transform(&data).expect("fit_transform should succeed");
///
/// assert!((scaled.get(0, 0) - 0.0).abs() < 1e-12);
/// assert!((scaled.get(2, 0) - 1.0).abs() < 1e-12);
/// assert!((scaled.get(1, 0) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Minimum value of each feature (computed during fit).
    data_min: Option<Vec<f64>>,
    /// Maximum value of each feature (computed during fit).
    data_max: Option<Vec<f64>>,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMaxScaler {
    /// Creates an unfitted `MinMaxScaler`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_min: None,
            data_max: None,
        }
    }

    /// Returns true if the scaler has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.data_min.is_some()
    }
}

impl Transformer for MinMaxScaler {
    /// Computes the min and max of each feature.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples == 0 {
            return Err(TypologyError::InsufficientCleanData {
                rows: 0,
                required: 1,
            });
        }

        let mut data_min = vec![f64::INFINITY; n_features];
        let mut data_max = vec![f64::NEG_INFINITY; n_features];

        for row in x.rows() {
            for (j, &val) in row.iter().enumerate() {
                data_min[j] = data_min[j].min(val);
                data_max[j] = data_max[j].max(val);
            }
        }

        self.data_min = Some(data_min);
        self.data_max = Some(data_max);

        Ok(())
    }

    /// Scales the data to [0, 1] using the fitted bounds.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (Some(data_min), Some(data_max)) = (&self.data_min, &self.data_max) else {
            return Err(TypologyError::NotFitted {
                component: "MinMaxScaler",
            });
        };

        let (n_samples, n_features) = x.shape();
        if n_features != data_min.len() {
            return Err(TypologyError::dimension_mismatch(
                "features",
                data_min.len(),
                n_features,
            ));
        }

        let mut result = Vec::with_capacity(n_samples * n_features);

        for row in x.rows() {
            for (j, &val) in row.iter().enumerate() {
                let data_range = data_max[j] - data_min[j];
                let scaled = if data_range.abs() > MIN_STD {
                    (val - data_min[j]) / data_range
                } else {
                    0.0
                };
                result.push(scaled);
            }
        }

        Matrix::from_vec(n_samples, n_features, result)
    }
}

#[cfg(test)]
mod tests;
