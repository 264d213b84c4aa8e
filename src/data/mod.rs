//! Regional indicator dataset: CSV loading, cleaning, and the four modeling
//! features.
//!
//! One row per district. The loader accepts English headers or the regional
//! statistics office's original headers (see [`Indicator::alias`]).
//!
//! ```
//! use regional_typology::data::{Dataset, Indicator};
//!
//! let csv = "\
//! district,gdp_per_capita,poverty_pct,hdi_male,hdi_female,internet_pct,sanitation_pct,expenditure
//! Kota Kendari,62.1,4.9,85.0,82.0,88.0,95.1,15200
//! Buton Selatan,21.4,13.2,68.0,64.5,,71.3,8600
//! ";
//! let dataset = Dataset::from_reader(csv.as_bytes(), "inline").expect("well-formed CSV");
//! assert!(dataset.hdi_derived());
//! assert_eq!(dataset.records()[0].value(Indicator::HdiTotal), Some(83.5));
//!
//! let clean = dataset.clean();
//! assert_eq!(clean.rows.len(), 1);
//! assert_eq!(clean.dropped, vec!["Buton Selatan".to_string()]);
//! ```

use crate::error::{Result, TypologyError};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header of the district identifier column.
pub const DISTRICT_COLUMN: &str = "district";
/// Original-dataset header of the district identifier column.
pub const DISTRICT_ALIAS: &str = "Kabupaten/Kota";

/// A numeric indicator column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// Regional GDP per capita, million Rp.
    GdpPerCapita,
    /// Share of population below the poverty line, %.
    PovertyPct,
    /// Human development index, male.
    HdiMale,
    /// Human development index, female.
    HdiFemale,
    /// Combined human development index.
    HdiTotal,
    /// Households with internet access, %.
    InternetPct,
    /// Households with adequate sanitation, %.
    SanitationPct,
    /// Average per-capita expenditure, Rp.
    Expenditure,
}

/// The four features the cluster model is trained on, in matrix column order.
pub const MODEL_FEATURES: [Indicator; 4] = [
    Indicator::GdpPerCapita,
    Indicator::PovertyPct,
    Indicator::HdiTotal,
    Indicator::InternetPct,
];

impl Indicator {
    /// Every indicator, in CSV documentation order.
    pub const ALL: [Indicator; 8] = [
        Indicator::GdpPerCapita,
        Indicator::PovertyPct,
        Indicator::HdiMale,
        Indicator::HdiFemale,
        Indicator::HdiTotal,
        Indicator::InternetPct,
        Indicator::SanitationPct,
        Indicator::Expenditure,
    ];

    /// Canonical snake_case column name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Indicator::GdpPerCapita => "gdp_per_capita",
            Indicator::PovertyPct => "poverty_pct",
            Indicator::HdiMale => "hdi_male",
            Indicator::HdiFemale => "hdi_female",
            Indicator::HdiTotal => "hdi_total",
            Indicator::InternetPct => "internet_pct",
            Indicator::SanitationPct => "sanitation_pct",
            Indicator::Expenditure => "expenditure",
        }
    }

    /// Column header used by the source statistics tables.
    #[must_use]
    pub fn alias(self) -> &'static str {
        match self {
            Indicator::GdpPerCapita => "pdrb_perkapita_jt",
            Indicator::PovertyPct => "persen_miskin_pct",
            Indicator::HdiMale => "ipm_l",
            Indicator::HdiFemale => "ipm_p",
            Indicator::HdiTotal => "ipm_total",
            Indicator::InternetPct => "akses_internet_pct",
            Indicator::SanitationPct => "akses_sanitasi_pct",
            Indicator::Expenditure => "pengeluaran_rp",
        }
    }

    /// Human-readable label with unit.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Indicator::GdpPerCapita => "GDP per capita (million Rp)",
            Indicator::PovertyPct => "Poverty (%)",
            Indicator::HdiMale => "HDI, male",
            Indicator::HdiFemale => "HDI, female",
            Indicator::HdiTotal => "HDI, total",
            Indicator::InternetPct => "Internet access (%)",
            Indicator::SanitationPct => "Adequate sanitation (%)",
            Indicator::Expenditure => "Expenditure (Rp)",
        }
    }

    /// Parses a canonical name or source alias.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|i| i.name().eq_ignore_ascii_case(s) || i.alias() == s)
    }

    /// Whether the CSV must carry this column. Total HDI may be derived.
    #[must_use]
    pub fn is_required_column(self) -> bool {
        self != Indicator::HdiTotal
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One district row. Numeric cells are `None` when blank or unparsable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub district: String,
    pub gdp_per_capita: Option<f64>,
    pub poverty_pct: Option<f64>,
    pub hdi_male: Option<f64>,
    pub hdi_female: Option<f64>,
    pub hdi_total: Option<f64>,
    pub internet_pct: Option<f64>,
    pub sanitation_pct: Option<f64>,
    pub expenditure: Option<f64>,
}

impl RegionRecord {
    /// A record with every indicator missing.
    #[must_use]
    pub fn empty(district: impl Into<String>) -> Self {
        Self {
            district: district.into(),
            gdp_per_capita: None,
            poverty_pct: None,
            hdi_male: None,
            hdi_female: None,
            hdi_total: None,
            internet_pct: None,
            sanitation_pct: None,
            expenditure: None,
        }
    }

    /// Value of one indicator.
    #[must_use]
    pub fn value(&self, indicator: Indicator) -> Option<f64> {
        match indicator {
            Indicator::GdpPerCapita => self.gdp_per_capita,
            Indicator::PovertyPct => self.poverty_pct,
            Indicator::HdiMale => self.hdi_male,
            Indicator::HdiFemale => self.hdi_female,
            Indicator::HdiTotal => self.hdi_total,
            Indicator::InternetPct => self.internet_pct,
            Indicator::SanitationPct => self.sanitation_pct,
            Indicator::Expenditure => self.expenditure,
        }
    }

    fn slot(&mut self, indicator: Indicator) -> &mut Option<f64> {
        match indicator {
            Indicator::GdpPerCapita => &mut self.gdp_per_capita,
            Indicator::PovertyPct => &mut self.poverty_pct,
            Indicator::HdiMale => &mut self.hdi_male,
            Indicator::HdiFemale => &mut self.hdi_female,
            Indicator::HdiTotal => &mut self.hdi_total,
            Indicator::InternetPct => &mut self.internet_pct,
            Indicator::SanitationPct => &mut self.sanitation_pct,
            Indicator::Expenditure => &mut self.expenditure,
        }
    }

    /// Builder-style setter, mostly for fixtures.
    #[must_use]
    pub fn with(mut self, indicator: Indicator, value: f64) -> Self {
        *self.slot(indicator) = Some(value);
        self
    }

    /// Mean of male and female HDI, when both are present.
    #[must_use]
    pub fn derived_hdi_total(&self) -> Option<f64> {
        Some((self.hdi_male? + self.hdi_female?) / 2.0)
    }
}

/// The four modeling features of one region.
///
/// Every constructor guarantees all four values are finite numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionFeatures {
    pub gdp_per_capita: f64,
    pub poverty_pct: f64,
    pub hdi_total: f64,
    pub internet_pct: f64,
}

impl RegionFeatures {
    /// Validates and builds a feature vector.
    ///
    /// # Errors
    ///
    /// Returns [`TypologyError::ValidationError`] naming the first
    /// non-finite field.
    pub fn new(gdp_per_capita: f64, poverty_pct: f64, hdi_total: f64, internet_pct: f64) -> Result<Self> {
        let features = Self {
            gdp_per_capita,
            poverty_pct,
            hdi_total,
            internet_pct,
        };
        for (indicator, value) in MODEL_FEATURES.iter().zip(features.to_array()) {
            if !value.is_finite() {
                return Err(TypologyError::validation(
                    indicator.name(),
                    format!("expected a finite number, got {value}"),
                ));
            }
        }
        Ok(features)
    }

    /// Validates a loosely-typed request such as a JSON form body.
    ///
    /// Each of the four fields must be present and a JSON number. Strings,
    /// nulls, and absent keys are rejected; nothing is defaulted.
    ///
    /// # Errors
    ///
    /// Returns [`TypologyError::ValidationError`] for the first bad field.
    ///
    /// ```
    /// use regional_typology::data::RegionFeatures;
    /// use serde_json::json;
    ///
    /// let ok = RegionFeatures::from_json(&json!({
    ///     "gdp_per_capita": 35.0, "poverty_pct": 12.0,
    ///     "hdi_total": 70.0, "internet_pct": 60.0,
    /// }));
    /// assert!(ok.is_ok());
    ///
    /// let missing = RegionFeatures::from_json(&json!({"gdp_per_capita": 35.0}));
    /// assert!(missing.is_err());
    /// ```
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| TypologyError::validation("request", "expected a JSON object"))?;

        let mut values = [0.0; 4];
        for (slot, indicator) in values.iter_mut().zip(MODEL_FEATURES) {
            let field = indicator.name();
            *slot = match object.get(field) {
                None | Some(Value::Null) => {
                    return Err(TypologyError::validation(field, "field is missing"));
                }
                Some(Value::Number(n)) => n
                    .as_f64()
                    .ok_or_else(|| TypologyError::validation(field, "number out of range"))?,
                Some(other) => {
                    return Err(TypologyError::validation(
                        field,
                        format!("expected a number, got {other}"),
                    ));
                }
            };
        }
        Self::from_array(values)
    }

    /// Builds from values in [`MODEL_FEATURES`] order.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is not finite.
    pub fn from_array(values: [f64; 4]) -> Result<Self> {
        Self::new(values[0], values[1], values[2], values[3])
    }

    /// The modeling features of a record, if all four are present.
    #[must_use]
    pub fn from_record(record: &RegionRecord) -> Option<Self> {
        let mut values = [0.0; 4];
        for (slot, indicator) in values.iter_mut().zip(MODEL_FEATURES) {
            *slot = record.value(indicator)?;
        }
        Self::from_array(values).ok()
    }

    /// Values in [`MODEL_FEATURES`] order.
    #[must_use]
    pub fn to_array(&self) -> [f64; 4] {
        [
            self.gdp_per_capita,
            self.poverty_pct,
            self.hdi_total,
            self.internet_pct,
        ]
    }
}

/// A record that survived cleaning, with its features extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRegion {
    pub record: RegionRecord,
    pub features: RegionFeatures,
}

/// Result of dropping rows with missing modeling features.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanData {
    /// Rows with all four modeling features, in input order.
    pub rows: Vec<CleanRegion>,
    /// Districts that were dropped, in input order.
    pub dropped: Vec<String>,
}

/// A loaded, read-only table of district records.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<RegionRecord>,
    source_name: String,
    hdi_derived: bool,
}

impl Dataset {
    /// Builds a dataset from in-memory records.
    ///
    /// # Errors
    ///
    /// Returns [`TypologyError::DataUnavailable`] on a blank or duplicate
    /// district name.
    pub fn from_records(records: Vec<RegionRecord>) -> Result<Self> {
        check_districts(&records, "memory")?;
        Ok(Self {
            records,
            source_name: "memory".to_string(),
            hdi_derived: false,
        })
    }

    /// Loads a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`TypologyError::DataUnavailable`] if the file cannot be
    /// opened or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let file =
            File::open(path).map_err(|e| TypologyError::data_unavailable(&name, e.to_string()))?;
        Self::from_reader(file, &name)
    }

    /// Parses CSV from any reader. `source_name` appears in errors and logs.
    ///
    /// # Errors
    ///
    /// Returns [`TypologyError::DataUnavailable`] on unreadable input, a
    /// missing required header, a row without a district, a duplicate
    /// district, or a numeric cell that is neither a number nor a missing
    /// marker (`NA`, `NaN`, `nan`, `n/a`, `null` or empty).
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let unavailable = |reason: String| TypologyError::data_unavailable(source_name, reason);

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| unavailable(format!("cannot read header: {e}")))?
            .clone();
        let column = |canonical: &str, alias: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(canonical) || h == alias)
        };

        let district_idx = column(DISTRICT_COLUMN, DISTRICT_ALIAS)
            .ok_or_else(|| unavailable(format!("missing column '{DISTRICT_COLUMN}'")))?;

        let mut indicator_columns = Vec::with_capacity(Indicator::ALL.len());
        for indicator in Indicator::ALL {
            match column(indicator.name(), indicator.alias()) {
                Some(idx) => indicator_columns.push((indicator, idx)),
                None if indicator.is_required_column() => {
                    return Err(unavailable(format!("missing column '{}'", indicator.name())));
                }
                None => {}
            }
        }
        let hdi_derived = !indicator_columns
            .iter()
            .any(|(i, _)| *i == Indicator::HdiTotal);

        let mut records = Vec::new();
        for (i, row) in csv_reader.records().enumerate() {
            let row = row.map_err(|e| unavailable(format!("row {}: {e}", i + 1)))?;
            let district = row.get(district_idx).unwrap_or_default();
            if district.is_empty() {
                return Err(unavailable(format!("row {} has no district", i + 1)));
            }

            let mut record = RegionRecord::empty(district);
            for &(indicator, idx) in &indicator_columns {
                let cell = row.get(idx).unwrap_or_default();
                *record.slot(indicator) = parse_cell(cell).ok_or_else(|| {
                    unavailable(format!(
                        "row {} ({district}): malformed {} value '{cell}'",
                        i + 1,
                        indicator.name()
                    ))
                })?;
            }
            if hdi_derived {
                record.hdi_total = record.derived_hdi_total();
            }
            records.push(record);
        }

        check_districts(&records, source_name)?;
        info!(
            "loaded {} districts from {source_name}{}",
            records.len(),
            if hdi_derived { " (hdi_total derived)" } else { "" }
        );

        Ok(Self {
            records,
            source_name: source_name.to_string(),
            hdi_derived,
        })
    }

    /// All records in file order.
    #[must_use]
    pub fn records(&self) -> &[RegionRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Where the data came from.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// True when total HDI was computed from the male/female columns.
    #[must_use]
    pub fn hdi_derived(&self) -> bool {
        self.hdi_derived
    }

    /// Looks up a district by exact name.
    #[must_use]
    pub fn get(&self, district: &str) -> Option<&RegionRecord> {
        self.records.iter().find(|r| r.district == district)
    }

    /// Splits the records into rows usable for fitting and dropped rows.
    #[must_use]
    pub fn clean(&self) -> CleanData {
        let mut rows = Vec::with_capacity(self.records.len());
        let mut dropped = Vec::new();
        for record in &self.records {
            match RegionFeatures::from_record(record) {
                Some(features) => rows.push(CleanRegion {
                    record: record.clone(),
                    features,
                }),
                None => dropped.push(record.district.clone()),
            }
        }
        if !dropped.is_empty() {
            warn!(
                "dropped {} of {} districts with missing modeling features: {}",
                dropped.len(),
                self.records.len(),
                dropped.join(", ")
            );
        }
        CleanData { rows, dropped }
    }
}

/// Cell spellings read as a missing value.
const MISSING_TOKENS: [&str; 5] = ["NA", "NaN", "nan", "n/a", "null"];

/// `Some(None)` for a missing cell, `None` for a malformed one.
fn parse_cell(cell: &str) -> Option<Option<f64>> {
    if cell.is_empty() || MISSING_TOKENS.contains(&cell) {
        return Some(None);
    }
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
}

fn check_districts(records: &[RegionRecord], source_name: &str) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if record.district.trim().is_empty() {
            return Err(TypologyError::data_unavailable(source_name, "blank district name"));
        }
        if !seen.insert(record.district.as_str()) {
            return Err(TypologyError::data_unavailable(
                source_name,
                format!("duplicate district '{}'", record.district),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
