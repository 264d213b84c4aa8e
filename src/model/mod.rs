//! Training pipeline and region predictor.
//!
//! [`train`] runs one linear pass over a [`Dataset`]:
//! clean → fit scaler → fit k-means → name clusters → attach labels.
//! The result is an explicit [`FittedModel`] value that callers keep and
//! pass around. There is no process-wide cache.
//!
//! # Example
//!
//! ```
//! use regional_typology::prelude::*;
//!
//! let records = vec![
//!     ("Kendari", 62.0, 4.5, 84.0, 88.0),
//!     ("Baubau", 48.0, 7.0, 80.0, 79.0),
//!     ("Kolaka", 95.0, 12.0, 72.0, 55.0),
//!     ("Morowali", 110.0, 11.0, 71.0, 52.0),
//!     ("Wakatobi", 22.0, 15.0, 66.0, 35.0),
//!     ("Buton", 20.0, 16.0, 65.0, 30.0),
//! ]
//! .into_iter()
//! .map(|(name, gdp, poverty, hdi, internet)| {
//!     RegionRecord::empty(name)
//!         .with(Indicator::GdpPerCapita, gdp)
//!         .with(Indicator::PovertyPct, poverty)
//!         .with(Indicator::HdiTotal, hdi)
//!         .with(Indicator::InternetPct, internet)
//! })
//! .collect();
//!
//! let dataset = Dataset::from_records(records).expect("unique districts");
//! let outcome = train(&dataset, &PipelineConfig::default()).expect("trainable");
//!
//! let kendari = outcome.labeled.get("Kendari").expect("kept");
//! assert_eq!(kendari.typology, Typology::Advanced);
//!
//! let what_if = RegionFeatures::new(100.0, 11.5, 71.5, 53.0).expect("finite");
//! assert_eq!(
//!     outcome.model.predict_typology(&what_if).expect("valid"),
//!     Typology::ResourceRich
//! );
//! ```

use crate::cluster::KMeans;
use crate::config::{PipelineConfig, N_CLUSTERS};
use crate::data::{Dataset, RegionFeatures, RegionRecord, MODEL_FEATURES};
use crate::error::{Result, TypologyError};
use crate::primitives::Matrix;
use crate::preprocessing::StandardScaler;
use crate::traits::{Transformer, UnsupervisedEstimator};
use crate::typology::{cluster_means, label_three_clusters, Typology, TypologyMapping};
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

/// Fitted scaler, fitted k-means, and the cluster → typology mapping.
///
/// Immutable once built. Prediction takes `&self`, so one model can serve
/// any number of concurrent callers without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    scaler: StandardScaler,
    kmeans: KMeans,
    mapping: TypologyMapping,
}

impl FittedModel {
    /// The fitted feature normalizer.
    #[must_use]
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// The fitted cluster model.
    #[must_use]
    pub fn kmeans(&self) -> &KMeans {
        &self.kmeans
    }

    /// The cluster → typology bijection.
    #[must_use]
    pub fn mapping(&self) -> TypologyMapping {
        self.mapping
    }

    /// Raw cluster id for one region.
    ///
    /// # Errors
    ///
    /// [`TypologyError::ValidationError`] when the scaled point lies so far
    /// from every centroid that the nearest one cannot be resolved (for
    /// example a poverty rate of `1e100`).
    pub fn predict_cluster(&self, features: &RegionFeatures) -> Result<usize> {
        let scaled = self.scaler.transform_row(&features.to_array())?;
        self.kmeans.predict_one(&scaled)
    }

    /// Typology for one region.
    ///
    /// A row taken from the training set gets back the typology it was
    /// labeled with during [`train`]: scaling goes through the same per-row
    /// routine and assignment uses the same centroids and tie rule.
    ///
    /// # Errors
    ///
    /// See [`FittedModel::predict_cluster`].
    pub fn predict_typology(&self, features: &RegionFeatures) -> Result<Typology> {
        let cluster = self.predict_cluster(features)?;
        self.typology_of(cluster)
    }

    /// Validates a loosely-typed request and predicts its typology.
    ///
    /// # Errors
    ///
    /// Returns [`TypologyError::ValidationError`] for a missing, null,
    /// non-numeric, or non-finite field. The model is untouched either way.
    pub fn predict_json(&self, request: &Value) -> Result<Typology> {
        let features = RegionFeatures::from_json(request)?;
        self.predict_typology(&features)
    }

    /// Centroids mapped back to raw indicator units, one row per cluster id.
    ///
    /// # Errors
    ///
    /// Only on an internal shape inconsistency.
    pub fn raw_centroids(&self) -> Result<Matrix<f64>> {
        self.scaler.inverse_transform(self.kmeans.centroids()?)
    }

    fn typology_of(&self, cluster: usize) -> Result<Typology> {
        self.mapping
            .typology(cluster)
            .ok_or_else(|| TypologyError::dimension_mismatch("cluster id <", N_CLUSTERS, cluster))
    }
}

/// A cleaned record with its cluster id and typology attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledRegion {
    pub record: RegionRecord,
    pub features: RegionFeatures,
    pub cluster: usize,
    pub typology: Typology,
}

/// The training rows after labeling, in input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LabeledDataset {
    rows: Vec<LabeledRegion>,
}

impl LabeledDataset {
    /// All labeled rows.
    #[must_use]
    pub fn rows(&self) -> &[LabeledRegion] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a district by exact name.
    #[must_use]
    pub fn get(&self, district: &str) -> Option<&LabeledRegion> {
        self.rows.iter().find(|r| r.record.district == district)
    }

    /// Every row, as a view.
    #[must_use]
    pub fn view_all(&self) -> Vec<&LabeledRegion> {
        self.rows.iter().collect()
    }

    /// Rows whose district is in `districts`, in dataset order.
    ///
    /// Views borrow from the dataset and never modify it. Unknown names
    /// simply match nothing, and an empty list selects nothing.
    #[must_use]
    pub fn filter_districts<S: AsRef<str>>(&self, districts: &[S]) -> Vec<&LabeledRegion> {
        self.rows
            .iter()
            .filter(|r| districts.iter().any(|d| d.as_ref() == r.record.district))
            .collect()
    }
}

/// Everything one training run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOutcome {
    pub model: FittedModel,
    pub labeled: LabeledDataset,
    /// Districts dropped for missing modeling features, in input order.
    pub dropped: Vec<String>,
}

/// Trains the pipeline on a dataset.
///
/// # Errors
///
/// - [`TypologyError::InsufficientCleanData`] with fewer than three clean
///   rows, or fewer than three distinct points
/// - [`TypologyError::DegenerateFeature`] when a modeling feature is
///   constant over the clean rows
/// - [`TypologyError::EmptyCluster`] if a fitted cluster owns no rows
pub fn train(dataset: &Dataset, config: &PipelineConfig) -> Result<TrainingOutcome> {
    let clean = dataset.clean();
    if clean.rows.len() < N_CLUSTERS {
        return Err(TypologyError::InsufficientCleanData {
            rows: clean.rows.len(),
            required: N_CLUSTERS,
        });
    }

    let features: Vec<RegionFeatures> = clean.rows.iter().map(|r| r.features).collect();
    let arrays: Vec<[f64; 4]> = features.iter().map(RegionFeatures::to_array).collect();
    let x = Matrix::from_rows(&arrays)?;

    let mut scaler = StandardScaler::new().with_feature_names(MODEL_FEATURES.iter().map(|f| f.name()));
    let scaled = scaler.fit_transform(&x)?;

    let mut kmeans = KMeans::new(N_CLUSTERS)
        .with_random_state(config.seed())
        .with_n_init(config.n_init())
        .with_max_iter(config.max_iter())
        .with_tol(config.tol());
    kmeans.fit(&scaled)?;
    let labels = kmeans
        .labels()
        .ok_or(TypologyError::NotFitted { component: "KMeans" })?
        .to_vec();

    let means = cluster_means(&features, &labels)?;
    for (cluster, m) in means.iter().enumerate() {
        debug!(
            "cluster {cluster}: mean gdp_per_capita={:.3} hdi_total={:.3}",
            m.gdp_per_capita, m.hdi_total
        );
    }
    let mapping = label_three_clusters(&means);

    let model = FittedModel {
        scaler,
        kmeans,
        mapping,
    };

    let rows = clean
        .rows
        .into_iter()
        .zip(labels)
        .map(|(row, cluster)| {
            Ok(LabeledRegion {
                record: row.record,
                features: row.features,
                cluster,
                typology: model.typology_of(cluster)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        "trained on {} districts ({} dropped), inertia={:.4} after {} iterations, mapping: {}",
        rows.len(),
        clean.dropped.len(),
        model.kmeans.inertia(),
        model.kmeans.n_iter(),
        mapping
            .iter()
            .map(|(c, t)| format!("{c}={t}"))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(TrainingOutcome {
        model,
        labeled: LabeledDataset { rows },
        dropped: clean.dropped,
    })
}
