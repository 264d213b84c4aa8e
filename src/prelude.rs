//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use regional_typology::prelude::*;
//! ```

pub use crate::cluster::KMeans;
pub use crate::config::PipelineConfig;
pub use crate::data::{Dataset, Indicator, RegionFeatures, RegionRecord};
pub use crate::error::TypologyError;
pub use crate::model::{train, FittedModel, LabeledDataset, LabeledRegion, TrainingOutcome};
pub use crate::preprocessing::{MinMaxScaler, StandardScaler};
pub use crate::primitives::{Matrix, Vector};
pub use crate::profile::{profile, ClusterProfile};
pub use crate::traits::{Transformer, UnsupervisedEstimator};
pub use crate::typology::{Typology, TypologyMapping};
