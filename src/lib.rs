//! Regional development typologies from district inequality indicators.
//!
//! Loads a one-row-per-district table (GDP per capita, poverty, HDI by
//! gender, internet and sanitation access, expenditure), clusters districts
//! into three groups with k-means over standardized features, and names the
//! groups "Advanced", "Resource-rich" and "Lagging". The fitted model then
//! classifies new or hypothetical regions the same way.
//!
//! # Quick Start
//!
//! ```
//! use regional_typology::prelude::*;
//!
//! let csv = "\
//! district,gdp_per_capita,poverty_pct,hdi_male,hdi_female,internet_pct,sanitation_pct,expenditure
//! Kota Kendari,62,4.5,85,82,88,95,15200
//! Kota Baubau,48,7,81,78,80,90,12800
//! Kolaka,95,12,74,70,55,75,11000
//! Morowali Utara,110,11,73,69,52,70,10800
//! Wakatobi,22,15,68,64,35,60,9000
//! Buton,20,16,67,63,30,58,8800
//! ";
//! let dataset = Dataset::from_reader(csv.as_bytes(), "inline").expect("valid table");
//! let outcome = train(&dataset, &PipelineConfig::default()).expect("trainable");
//!
//! let hypothetical = RegionFeatures::new(21.0, 15.5, 65.0, 32.0).expect("finite");
//! let typology = outcome.model.predict_typology(&hypothetical).expect("valid");
//! assert_eq!(typology, Typology::Lagging);
//! assert_eq!(typology.guidance(), "Development priority");
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`data`]: Indicator columns, CSV loading, cleaning
//! - [`preprocessing`]: Feature scalers (standard, min-max)
//! - [`cluster`]: Clustering algorithms (K-Means)
//! - [`metrics`]: Distances and inertia
//! - [`typology`]: Typology names and the cluster → typology labeler
//! - [`model`]: Training pipeline and region predictor
//! - [`profile`]: Per-typology mean profiles
//! - [`stats`]: Covariance, correlation, trend lines
//! - [`indicators`]: Dashboard summaries over filtered views

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod metrics;
pub mod model;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod profile;
pub mod stats;
pub mod traits;
pub mod typology;

pub use error::{Result, TypologyError};
pub use model::{train, FittedModel, LabeledDataset, LabeledRegion, TrainingOutcome};
pub use primitives::{Matrix, Vector};
pub use traits::{Transformer, UnsupervisedEstimator};
pub use typology::Typology;
