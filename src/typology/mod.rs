//! Development typologies and the cluster-id → typology mapping.
//!
//! K-means hands back cluster ids that mean nothing on their own and can
//! permute between fits. This module names them from the per-cluster means
//! of GDP per capita and total HDI.

use crate::config::N_CLUSTERS;
use crate::data::RegionFeatures;
use crate::error::{Result, TypologyError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three fixed development categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Typology {
    /// Urban and services centres: highest human development.
    #[serde(rename = "Advanced")]
    Advanced,
    /// Extractive-industry regions: high output per capita.
    #[serde(rename = "Resource-rich")]
    ResourceRich,
    /// Under-developed and archipelago regions.
    #[serde(rename = "Lagging")]
    Lagging,
}

impl Typology {
    /// All typologies in display order.
    pub const ALL: [Typology; 3] = [Typology::Advanced, Typology::ResourceRich, Typology::Lagging];

    /// The display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Typology::Advanced => "Advanced",
            Typology::ResourceRich => "Resource-rich",
            Typology::Lagging => "Lagging",
        }
    }

    /// Parses a display name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
    }

    /// Short advisory tag shown with a prediction.
    #[must_use]
    pub fn guidance(self) -> &'static str {
        match self {
            Typology::Advanced => "Growth centre",
            Typology::ResourceRich => "Extractive industry",
            Typology::Lagging => "Development priority",
        }
    }

    /// Legend text describing the typical profile.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Typology::Advanced => "High HDI, low poverty (urban/services)",
            Typology::ResourceRich => "High GDP per capita, moderate poverty (mining)",
            Typology::Lagging => "Low GDP per capita, high poverty (archipelago)",
        }
    }
}

impl fmt::Display for Typology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mean GDP per capita and mean total HDI of one cluster's training rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterMeans {
    pub gdp_per_capita: f64,
    pub hdi_total: f64,
}

/// Groups training rows by cluster id and averages GDP and HDI.
///
/// # Errors
///
/// Returns [`TypologyError::EmptyCluster`] if some id in `0..N_CLUSTERS`
/// has no rows, and a dimension error if the slices differ in length or a
/// label is out of range.
pub fn cluster_means(features: &[RegionFeatures], labels: &[usize]) -> Result<[ClusterMeans; N_CLUSTERS]> {
    if features.len() != labels.len() {
        return Err(TypologyError::dimension_mismatch(
            "labels",
            features.len(),
            labels.len(),
        ));
    }

    let mut sums = [(0.0_f64, 0.0_f64, 0usize); N_CLUSTERS];
    for (f, &label) in features.iter().zip(labels) {
        let slot = sums
            .get_mut(label)
            .ok_or_else(|| TypologyError::dimension_mismatch("cluster id <", N_CLUSTERS, label))?;
        slot.0 += f.gdp_per_capita;
        slot.1 += f.hdi_total;
        slot.2 += 1;
    }

    let mut means = [ClusterMeans {
        gdp_per_capita: 0.0,
        hdi_total: 0.0,
    }; N_CLUSTERS];
    for (cluster, ((gdp, hdi, count), mean)) in sums.iter().zip(means.iter_mut()).enumerate() {
        if *count == 0 {
            return Err(TypologyError::EmptyCluster { cluster });
        }
        *mean = ClusterMeans {
            gdp_per_capita: gdp / *count as f64,
            hdi_total: hdi / *count as f64,
        };
    }
    Ok(means)
}

/// Bijection from cluster id (0..3) to typology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypologyMapping {
    by_cluster: [Typology; N_CLUSTERS],
}

impl TypologyMapping {
    /// Typology for a cluster id, `None` for an out-of-range id.
    #[must_use]
    pub fn typology(&self, cluster: usize) -> Option<Typology> {
        self.by_cluster.get(cluster).copied()
    }

    /// Cluster id carrying a typology.
    #[must_use]
    pub fn cluster(&self, typology: Typology) -> usize {
        // by_cluster is a permutation of Typology::ALL, so the search always hits
        self.by_cluster
            .iter()
            .position(|&t| t == typology)
            .unwrap_or_default()
    }

    /// (cluster id, typology) pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Typology)> + '_ {
        self.by_cluster.iter().copied().enumerate()
    }
}

/// Names the three clusters from their GDP and HDI means.
///
/// 1. Highest mean HDI → [`Typology::Advanced`].
/// 2. Highest mean GDP among the rest → [`Typology::ResourceRich`]. (If the
///    overall GDP leader is already Advanced, this is the runner-up.)
/// 3. The remaining cluster → [`Typology::Lagging`].
///
/// Exact ties on a mean go to the lowest cluster id.
///
/// This rule is specific to k = 3. The array type pins the cluster count;
/// any other k needs a different labeling design, not a generalization of
/// this one.
///
/// ```
/// use regional_typology::typology::{label_three_clusters, ClusterMeans, Typology};
///
/// let means = [
///     ClusterMeans { gdp_per_capita: 25.0, hdi_total: 66.0 },
///     ClusterMeans { gdp_per_capita: 95.0, hdi_total: 71.0 },
///     ClusterMeans { gdp_per_capita: 60.0, hdi_total: 82.0 },
/// ];
/// let mapping = label_three_clusters(&means);
/// assert_eq!(mapping.typology(2), Some(Typology::Advanced));
/// assert_eq!(mapping.typology(1), Some(Typology::ResourceRich));
/// assert_eq!(mapping.typology(0), Some(Typology::Lagging));
/// ```
#[must_use]
pub fn label_three_clusters(means: &[ClusterMeans; N_CLUSTERS]) -> TypologyMapping {
    let all: Vec<usize> = (0..N_CLUSTERS).collect();
    let advanced = argmax(&all, |c| means[c].hdi_total);

    let rest: Vec<usize> = all.iter().copied().filter(|&c| c != advanced).collect();
    let resource_rich = argmax(&rest, |c| means[c].gdp_per_capita);

    let mut by_cluster = [Typology::Lagging; N_CLUSTERS];
    by_cluster[advanced] = Typology::Advanced;
    by_cluster[resource_rich] = Typology::ResourceRich;
    TypologyMapping { by_cluster }
}

/// Candidate with the largest key; the earliest (lowest id) wins ties.
fn argmax(candidates: &[usize], key: impl Fn(usize) -> f64) -> usize {
    let mut best = candidates[0];
    for &c in &candidates[1..] {
        if key(c) > key(best) {
            best = c;
        }
    }
    best
}
