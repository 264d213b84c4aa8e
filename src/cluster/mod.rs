//! Clustering algorithms.
//!
//! K-Means with seeded k-means++ initialization and multiple restarts.

mod kmeans;

pub use kmeans::KMeans;
