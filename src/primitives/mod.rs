//! Core numeric containers (Vector, Matrix).
//!
//! The scaler and the cluster model consume a row-major `Matrix<f64>`;
//! single observations go through them as plain `&[f64]` rows
//! (`StandardScaler::transform_row`, `KMeans::predict_one`). `Vector<f64>`
//! carries one indicator across a view for the descriptive statistics.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
