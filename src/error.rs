//! Error types for typology operations.
//!
//! Errors split into two groups. Pipeline-initialization failures
//! (`DataUnavailable`, `InsufficientCleanData`, and the degenerate-fit cases)
//! leave the caller with no fitted model at all. Per-request failures
//! (`ValidationError`) reject one prediction and leave the fitted state
//! untouched.

use thiserror::Error;

/// Main error type for the typology pipeline.
///
/// # Examples
///
/// ```
/// use regional_typology::error::TypologyError;
///
/// let err = TypologyError::validation("poverty_pct", "field is missing");
/// assert!(err.to_string().contains("poverty_pct"));
/// assert!(!err.is_fatal());
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypologyError {
    /// The dataset could not be read or parsed.
    #[error("Dataset unavailable ({source_name}): {reason}")]
    DataUnavailable {
        /// File path or reader description
        source_name: String,
        /// What went wrong
        reason: String,
    },

    /// Too few clean rows to fit the cluster model.
    #[error("Insufficient clean data: {rows} usable rows, at least {required} required")]
    InsufficientCleanData {
        /// Rows (or distinct points) available
        rows: usize,
        /// Minimum needed
        required: usize,
    },

    /// A single prediction request was malformed.
    #[error("Validation failed for '{field}': {reason}")]
    ValidationError {
        /// Offending input field
        field: String,
        /// Why it was rejected
        reason: String,
    },

    /// A modeling feature has zero variance, so standardization is undefined.
    #[error("Degenerate feature '{feature}': zero variance across the training set")]
    DegenerateFeature {
        /// Feature name (or column index when unnamed)
        feature: String,
    },

    /// A fitted cluster ended up with no training rows.
    #[error("Cluster {cluster} has no member rows; typology labeling is undefined")]
    EmptyCluster {
        /// Cluster id
        cluster: usize,
    },

    /// Matrix/vector dimensions don't match for the operation.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// A transformer or estimator was used before `fit`.
    #[error("{component} not fitted. Call fit() first.")]
    NotFitted {
        /// Component name
        component: &'static str,
    },
}

impl TypologyError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create a validation error for a named input field
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a data-unavailable error
    #[must_use]
    pub fn data_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// True when the error prevents any fitted model from existing.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DataUnavailable { .. }
                | Self::InsufficientCleanData { .. }
                | Self::DegenerateFeature { .. }
                | Self::EmptyCluster { .. }
        )
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, TypologyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_unavailable_display() {
        let err = TypologyError::data_unavailable("regions.csv", "file not found");
        let msg = err.to_string();
        assert!(msg.contains("regions.csv"));
        assert!(msg.contains("file not found"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_insufficient_clean_data_display() {
        let err = TypologyError::InsufficientCleanData {
            rows: 2,
            required: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("2 usable rows"));
        assert!(msg.contains("at least 3"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_validation_error_is_local() {
        let err = TypologyError::validation("hdi_total", "not a number");
        assert!(err.to_string().contains("hdi_total"));
        assert!(err.to_string().contains("not a number"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_degenerate_feature_display() {
        let err = TypologyError::DegenerateFeature {
            feature: "internet_pct".to_string(),
        };
        assert!(err.to_string().contains("internet_pct"));
        assert!(err.to_string().contains("zero variance"));
    }

    #[test]
    fn test_empty_cluster_display() {
        let err = TypologyError::EmptyCluster { cluster: 2 };
        assert!(err.to_string().contains("Cluster 2"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_dimension_mismatch_helper() {
        let err = TypologyError::dimension_mismatch("features", 4, 3);
        let msg = err.to_string();
        assert!(msg.contains("features=4"));
        assert!(msg.contains('3'));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_not_fitted_display() {
        let err = TypologyError::NotFitted {
            component: "StandardScaler",
        };
        assert_eq!(err.to_string(), "StandardScaler not fitted. Call fit() first.");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypologyError>();
    }
}
