//! Descriptive statistics for pairs of indicators.
//!
//! - Population covariance and Pearson correlation
//! - Ordinary least-squares trend line, as drawn on the infrastructure
//!   scatter plots
//!
//! # Examples
//!
//! ```
//! use regional_typology::stats::linear_trend;
//! use regional_typology::primitives::Vector;
//!
//! let x = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
//! let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);
//!
//! let line = linear_trend(&x, &y).expect("enough spread in x");
//! assert!((line.slope - 2.0).abs() < 1e-12);
//! assert!((line.intercept - 1.0).abs() < 1e-12);
//! assert!((line.predict(10.0) - 21.0).abs() < 1e-12);
//! ```

pub mod covariance;

pub use covariance::{corr, cov};

use crate::primitives::Vector;
use covariance::centered_sums;
use serde::Serialize;

/// Least-squares line `y = slope·x + intercept` with its goodness of fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation; 0 when y is constant.
    pub r: f64,
    /// Number of points used.
    pub n: usize,
}

impl TrendLine {
    /// Value of the line at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Coefficient of determination (r²).
    #[must_use]
    pub fn r_squared(&self) -> f64 {
        self.r * self.r
    }
}

/// Fits a least-squares line through paired observations.
///
/// Returns `None` for mismatched lengths, fewer than two points, or
/// (near) zero spread in `x`, where no unique line exists.
#[must_use]
pub fn linear_trend(x: &Vector<f64>, y: &Vector<f64>) -> Option<TrendLine> {
    if x.len() < 2 {
        return None;
    }
    let s = centered_sums(x, y).ok()?;
    if s.xx <= 1e-12 {
        return None;
    }

    let slope = s.xy / s.xx;
    let intercept = s.y_mean - slope * s.x_mean;
    // Only a constant y can fail here; x spread was checked above
    let r = corr(x, y).unwrap_or(0.0);
    Some(TrendLine {
        slope,
        intercept,
        r,
        n: s.n,
    })
}
