//! Covariance and correlation between two indicators.
//!
//! # Mathematical Background
//!
//! ```text
//! Cov(X, Y) = (1/n) Σ (x_i - x̄)(y_i - ȳ)
//! ρ(X, Y)   = Cov(X, Y) / (σ_X σ_Y)
//! ```
//!
//! Both use population moments, matching the scaler.
//!
//! # Examples
//!
//! ```
//! use regional_typology::stats::{cov, corr};
//! use regional_typology::primitives::Vector;
//!
//! // Internet access against poverty: more access, less poverty
//! let internet = Vector::from_slice(&[30.0, 45.0, 60.0, 75.0, 90.0]);
//! let poverty = Vector::from_slice(&[18.0, 15.0, 12.0, 9.0, 6.0]);
//!
//! assert!(cov(&internet, &poverty).expect("same length") < 0.0);
//! assert!((corr(&internet, &poverty).expect("non-constant") + 1.0).abs() < 1e-12);
//! ```

use crate::error::{Result, TypologyError};
use crate::primitives::Vector;

/// Sums of centered cross-products and squares: (Σdxdy, Σdx², Σdy²).
pub(crate) struct CenteredSums {
    pub n: usize,
    pub x_mean: f64,
    pub y_mean: f64,
    pub xy: f64,
    pub xx: f64,
    pub yy: f64,
}

pub(crate) fn centered_sums(x: &Vector<f64>, y: &Vector<f64>) -> Result<CenteredSums> {
    let n = x.len();
    if n != y.len() {
        return Err(TypologyError::dimension_mismatch("values in x", n, y.len()));
    }
    if n == 0 {
        return Err(TypologyError::InsufficientCleanData {
            rows: 0,
            required: 1,
        });
    }

    let x_mean = x.mean();
    let y_mean = y.mean();
    let (mut xy, mut xx, mut yy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.as_slice().iter().zip(y.as_slice()) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        xy += dx * dy;
        xx += dx * dx;
        yy += dy * dy;
    }
    Ok(CenteredSums {
        n,
        x_mean,
        y_mean,
        xy,
        xx,
        yy,
    })
}

/// Population covariance of two equally long vectors.
///
/// # Errors
///
/// Returns error if vectors have different lengths or are empty.
pub fn cov(x: &Vector<f64>, y: &Vector<f64>) -> Result<f64> {
    let s = centered_sums(x, y)?;
    Ok(s.xy / s.n as f64)
}

/// Pearson correlation coefficient in [-1, 1].
///
/// # Errors
///
/// Returns error if vectors have different lengths, are empty, or either
/// one is constant.
pub fn corr(x: &Vector<f64>, y: &Vector<f64>) -> Result<f64> {
    let xy = cov(x, y)?;
    let x_std = cov(x, x)?.sqrt();
    let y_std = cov(y, y)?.sqrt();

    for (name, std) in [("x", x_std), ("y", y_std)] {
        if std < 1e-10 {
            return Err(TypologyError::DegenerateFeature {
                feature: name.to_string(),
            });
        }
    }

    // Rounding can push |r| a hair past 1
    Ok((xy / (x_std * y_std)).clamp(-1.0, 1.0))
}

#[cfg(test)]
#[path = "covariance_tests.rs"]
mod tests;
