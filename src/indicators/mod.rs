//! Dashboard summaries over a filtered view of labeled districts.
//!
//! Each function takes the view the user is looking at (`&[&LabeledRegion]`)
//! and returns plain data a presentation layer can render: KPI tiles, the
//! gender dumbbell rows, the normalized heatmap grid, scatter trend lines,
//! and the GDP/poverty quadrant chart.

use crate::data::Indicator;
use crate::error::{Result, TypologyError};
use crate::model::LabeledRegion;
use crate::preprocessing::MinMaxScaler;
use crate::primitives::{Matrix, Vector};
use crate::stats::{linear_trend, TrendLine};
use crate::traits::Transformer;
use crate::typology::Typology;
use serde::Serialize;

/// Heatmap columns, left to right.
pub const HEATMAP_COLUMNS: [Indicator; 5] = [
    Indicator::GdpPerCapita,
    Indicator::HdiMale,
    Indicator::HdiFemale,
    Indicator::InternetPct,
    Indicator::PovertyPct,
];

/// Headline numbers for the current view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiSummary {
    pub regions: usize,
    pub mean_poverty_pct: f64,
    pub mean_hdi_total: f64,
    pub mean_gdp_per_capita: f64,
}

/// Region count and mean poverty, HDI and GDP; `None` for an empty view.
#[must_use]
pub fn kpi_summary(view: &[&LabeledRegion]) -> Option<KpiSummary> {
    if view.is_empty() {
        return None;
    }
    let mean_of = |f: fn(&LabeledRegion) -> f64| {
        Vector::from_vec(view.iter().map(|r| f(r)).collect()).mean()
    };
    Some(KpiSummary {
        regions: view.len(),
        mean_poverty_pct: mean_of(|r| r.features.poverty_pct),
        mean_hdi_total: mean_of(|r| r.features.hdi_total),
        mean_gdp_per_capita: mean_of(|r| r.features.gdp_per_capita),
    })
}

/// Male vs female HDI for one district.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderGap {
    pub district: String,
    pub hdi_male: f64,
    pub hdi_female: f64,
    /// Male minus female.
    pub gap: f64,
}

/// Gender HDI rows sorted by male HDI, highest first.
///
/// Districts missing either value are left out. Equal male HDI keeps view
/// order.
#[must_use]
pub fn gender_gap(view: &[&LabeledRegion]) -> Vec<GenderGap> {
    let mut rows: Vec<GenderGap> = view
        .iter()
        .filter_map(|r| {
            let hdi_male = r.record.hdi_male?;
            let hdi_female = r.record.hdi_female?;
            Some(GenderGap {
                district: r.record.district.clone(),
                hdi_male,
                hdi_female,
                gap: hdi_male - hdi_female,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.hdi_male.total_cmp(&a.hdi_male));
    rows
}

/// One heatmap row: colour values plus the raw numbers for annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapRow {
    pub district: String,
    /// In [0, 1]; higher is better in every column.
    pub scaled: Vec<f64>,
    pub raw: Vec<f64>,
}

/// Relative-performance grid over [`HEATMAP_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapGrid {
    pub columns: Vec<Indicator>,
    pub rows: Vec<HeatmapRow>,
}

/// Min-max scales each heatmap column over the view.
///
/// Poverty is inverted (`1 - scaled`) so that a bright cell always means
/// "doing well". A constant column scales to 0 before that inversion.
/// Districts missing any heatmap column are skipped.
///
/// # Errors
///
/// Returns [`TypologyError::InsufficientCleanData`] when no district in the
/// view has all five values.
pub fn indicator_heatmap(view: &[&LabeledRegion]) -> Result<HeatmapGrid> {
    let mut districts = Vec::with_capacity(view.len());
    let mut raw_rows: Vec<[f64; 5]> = Vec::with_capacity(view.len());
    for row in view {
        let mut values = [0.0; 5];
        let complete = HEATMAP_COLUMNS
            .iter()
            .zip(values.iter_mut())
            .all(|(&indicator, slot)| match row.record.value(indicator) {
                Some(v) => {
                    *slot = v;
                    true
                }
                None => false,
            });
        if complete {
            districts.push(row.record.district.clone());
            raw_rows.push(values);
        }
    }

    if raw_rows.is_empty() {
        return Err(TypologyError::InsufficientCleanData {
            rows: 0,
            required: 1,
        });
    }

    let raw = Matrix::from_rows(&raw_rows)?;
    let scaled = MinMaxScaler::new().fit_transform(&raw)?;
    let poverty_col = HEATMAP_COLUMNS.len() - 1;

    let rows = districts
        .into_iter()
        .zip(scaled.rows().zip(raw.rows()))
        .map(|(district, (scaled_row, raw_row))| {
            let mut scaled = scaled_row.to_vec();
            scaled[poverty_col] = 1.0 - scaled[poverty_col];
            HeatmapRow {
                district,
                scaled,
                raw: raw_row.to_vec(),
            }
        })
        .collect();

    Ok(HeatmapGrid {
        columns: HEATMAP_COLUMNS.to_vec(),
        rows,
    })
}

/// Least-squares trend of `y` on `x` over the districts having both values.
///
/// `None` with fewer than two such districts or no spread in `x`.
#[must_use]
pub fn trend(view: &[&LabeledRegion], x: Indicator, y: Indicator) -> Option<TrendLine> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = view
        .iter()
        .filter_map(|r| Some((r.record.value(x)?, r.record.value(y)?)))
        .unzip();
    linear_trend(&Vector::from_vec(xs), &Vector::from_vec(ys))
}

/// One bubble on the GDP vs poverty chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomyPoint {
    pub district: String,
    pub gdp_per_capita: f64,
    pub poverty_pct: f64,
    /// Bubble size; absent when the expenditure cell was blank.
    pub expenditure: Option<f64>,
    pub typology: Typology,
    /// GDP at or above the view mean.
    pub above_mean_gdp: bool,
    /// Poverty at or above the view mean.
    pub above_mean_poverty: bool,
}

/// GDP vs poverty scatter with the view means as reference lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomyOverview {
    pub mean_gdp_per_capita: f64,
    pub mean_poverty_pct: f64,
    pub points: Vec<EconomyPoint>,
}

/// Places every district against the mean GDP and mean poverty lines.
/// `None` for an empty view.
#[must_use]
pub fn economy_overview(view: &[&LabeledRegion]) -> Option<EconomyOverview> {
    let kpi = kpi_summary(view)?;
    let points = view
        .iter()
        .map(|r| EconomyPoint {
            district: r.record.district.clone(),
            gdp_per_capita: r.features.gdp_per_capita,
            poverty_pct: r.features.poverty_pct,
            expenditure: r.record.expenditure,
            typology: r.typology,
            above_mean_gdp: r.features.gdp_per_capita >= kpi.mean_gdp_per_capita,
            above_mean_poverty: r.features.poverty_pct >= kpi.mean_poverty_pct,
        })
        .collect();
    Some(EconomyOverview {
        mean_gdp_per_capita: kpi.mean_gdp_per_capita,
        mean_poverty_pct: kpi.mean_poverty_pct,
        points,
    })
}

#[cfg(test)]
#[path = "indicators_tests.rs"]
mod tests;
