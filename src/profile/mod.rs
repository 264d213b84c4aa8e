//! Per-typology mean profiles.
//!
//! A profile is recomputed on demand from whatever view of the labeled
//! rows the caller holds, so it follows the active district filter.

use crate::data::{Indicator, MODEL_FEATURES};
use crate::model::LabeledRegion;
use crate::typology::Typology;
use serde::Serialize;
use std::collections::BTreeMap;

/// Typology → indicator → mean over the rows carrying that typology.
///
/// Typologies with no rows in the view are absent, never zero or NaN.
/// Within a present typology, an indicator is absent only if every row in
/// the group is missing it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ClusterProfile {
    groups: BTreeMap<Typology, BTreeMap<Indicator, f64>>,
    counts: BTreeMap<Typology, usize>,
}

impl ClusterProfile {
    /// Mean of one indicator for one typology.
    #[must_use]
    pub fn get(&self, typology: Typology, indicator: Indicator) -> Option<f64> {
        self.groups.get(&typology)?.get(&indicator).copied()
    }

    /// All means for one typology.
    #[must_use]
    pub fn group(&self, typology: Typology) -> Option<&BTreeMap<Indicator, f64>> {
        self.groups.get(&typology)
    }

    /// Number of rows behind a typology's means (0 when absent).
    #[must_use]
    pub fn count(&self, typology: Typology) -> usize {
        self.counts.get(&typology).copied().unwrap_or(0)
    }

    /// Typologies present in the view, in display order.
    pub fn typologies(&self) -> impl Iterator<Item = Typology> + '_ {
        self.groups.keys().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Averages `indicators` per typology over a view of labeled rows.
///
/// ```
/// use regional_typology::prelude::*;
/// use regional_typology::profile::profile;
///
/// let row = |name: &str, gdp: f64| LabeledRegion {
///     record: RegionRecord::empty(name).with(Indicator::GdpPerCapita, gdp),
///     features: RegionFeatures::new(gdp, 5.0, 80.0, 70.0).expect("finite"),
///     cluster: 0,
///     typology: Typology::Advanced,
/// };
/// let rows = [row("A", 10.0), row("B", 20.0)];
/// let view: Vec<&LabeledRegion> = rows.iter().collect();
///
/// let p = profile(&view, &[Indicator::GdpPerCapita]);
/// assert_eq!(p.get(Typology::Advanced, Indicator::GdpPerCapita), Some(15.0));
/// assert_eq!(p.get(Typology::Lagging, Indicator::GdpPerCapita), None);
/// ```
#[must_use]
pub fn profile(view: &[&LabeledRegion], indicators: &[Indicator]) -> ClusterProfile {
    let mut sums: BTreeMap<Typology, BTreeMap<Indicator, (f64, usize)>> = BTreeMap::new();
    let mut counts: BTreeMap<Typology, usize> = BTreeMap::new();

    for row in view {
        *counts.entry(row.typology).or_insert(0) += 1;
        let group = sums.entry(row.typology).or_default();
        for &indicator in indicators {
            if let Some(v) = row.record.value(indicator) {
                let slot = group.entry(indicator).or_insert((0.0, 0));
                slot.0 += v;
                slot.1 += 1;
            }
        }
    }

    let groups = sums
        .into_iter()
        .map(|(typology, group)| {
            let means = group
                .into_iter()
                .filter(|(_, (_, n))| *n > 0)
                .map(|(indicator, (sum, n))| (indicator, sum / n as f64))
                .collect();
            (typology, means)
        })
        .collect();

    ClusterProfile { groups, counts }
}

/// Profile over the four modeling features.
#[must_use]
pub fn model_profile(view: &[&LabeledRegion]) -> ClusterProfile {
    profile(view, &MODEL_FEATURES)
}
