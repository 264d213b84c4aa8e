//! End-to-end tests over a 17-district table.
//!
//! Two districts have a blank modeling feature and are dropped during
//! cleaning; the remaining 15 are clustered.

use regional_typology::data::MODEL_FEATURES;
use regional_typology::indicators::{gender_gap, indicator_heatmap, kpi_summary, trend};
use regional_typology::prelude::*;
use regional_typology::profile::model_profile;
use serde_json::json;
use std::collections::BTreeSet;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sultra_districts.csv")
}

fn load() -> Dataset {
    Dataset::from_path(fixture_path()).expect("fixture should load")
}

fn train_default(dataset: &Dataset) -> TrainingOutcome {
    train(dataset, &PipelineConfig::default()).expect("fixture should train")
}

#[test]
fn test_fixture_loads_with_derived_hdi() {
    let dataset = load();
    assert_eq!(dataset.len(), 17);
    assert!(dataset.hdi_derived());
    let kendari = dataset.get("Kota Kendari").expect("present");
    let hdi = kendari.hdi_total.expect("both genders present");
    assert!((hdi - 83.7).abs() < 1e-9);
}

#[test]
fn test_same_seed_same_typologies() {
    let dataset = load();
    let first = train_default(&dataset);
    let second = train_default(&dataset);

    let assignments = |o: &TrainingOutcome| -> Vec<(String, Typology)> {
        o.labeled
            .rows()
            .iter()
            .map(|r| (r.record.district.clone(), r.typology))
            .collect()
    };
    assert_eq!(assignments(&first), assignments(&second));
}

#[test]
fn test_mapping_is_bijection_over_fitted_ids() {
    let outcome = train_default(&load());
    let mapping = outcome.model.mapping();

    let ids: BTreeSet<usize> = outcome.labeled.rows().iter().map(|r| r.cluster).collect();
    assert_eq!(ids, (0..3).collect::<BTreeSet<_>>());

    let names: BTreeSet<Typology> = ids
        .iter()
        .map(|&c| mapping.typology(c).expect("mapped"))
        .collect();
    assert_eq!(names, Typology::ALL.into_iter().collect::<BTreeSet<_>>());
}

#[test]
fn test_labels_follow_profile_ordering() {
    let outcome = train_default(&load());
    let view = outcome.labeled.view_all();
    let profile = model_profile(&view);

    let hdi = |t| profile.get(t, Indicator::HdiTotal).expect("every typology populated");
    let gdp = |t| profile.get(t, Indicator::GdpPerCapita).expect("every typology populated");

    let advanced_hdi = hdi(Typology::Advanced);
    assert!(advanced_hdi >= hdi(Typology::ResourceRich));
    assert!(advanced_hdi >= hdi(Typology::Lagging));

    let max_gdp = Typology::ALL.iter().map(|&t| gdp(t)).fold(f64::MIN, f64::max);
    if gdp(Typology::Advanced) == max_gdp {
        assert!(gdp(Typology::ResourceRich) >= gdp(Typology::Lagging));
    } else {
        assert_eq!(gdp(Typology::ResourceRich), max_gdp);
    }
}

#[test]
fn test_known_districts_land_in_expected_typology() {
    let outcome = train_default(&load());
    let typology = |d: &str| outcome.labeled.get(d).expect("labeled").typology;
    assert_eq!(typology("Kota Kendari"), Typology::Advanced);
    assert_eq!(typology("Konawe Utara"), Typology::ResourceRich);
    assert_eq!(typology("Buton Tengah"), Typology::Lagging);
}

#[test]
fn test_training_rows_resubmitted_reproduce_their_typology() {
    let outcome = train_default(&load());
    for row in outcome.labeled.rows() {
        let request = json!({
            "gdp_per_capita": row.features.gdp_per_capita,
            "poverty_pct": row.features.poverty_pct,
            "hdi_total": row.features.hdi_total,
            "internet_pct": row.features.internet_pct,
        });
        assert_eq!(
            outcome.model.predict_json(&request).expect("valid request"),
            row.typology,
            "{} changed typology on resubmission",
            row.record.district
        );
    }
}

#[test]
fn test_profile_omits_typologies_outside_the_view() {
    let outcome = train_default(&load());
    let view = outcome.labeled.filter_districts(&["Kota Kendari", "Kota Baubau"]);
    let profile = model_profile(&view);

    let present: Vec<Typology> = profile.typologies().collect();
    assert_eq!(present, vec![Typology::Advanced]);
    assert!(profile.group(Typology::Lagging).is_none());

    let expected_gdp = (62.5 + 48.3) / 2.0;
    let got = profile
        .get(Typology::Advanced, Indicator::GdpPerCapita)
        .expect("present");
    assert!((got - expected_gdp).abs() < 1e-12);
    for f in MODEL_FEATURES {
        assert!(profile.get(Typology::Advanced, f).is_some());
    }
}

#[test]
fn test_invalid_request_leaves_model_untouched() {
    let outcome = train_default(&load());
    let model = outcome.model;
    let valid = json!({
        "gdp_per_capita": 23.0, "poverty_pct": 14.8,
        "hdi_total": 66.0, "internet_pct": 33.0
    });
    let before = model.predict_json(&valid).expect("valid request");

    for bad in [
        json!({"poverty_pct": 14.8, "hdi_total": 66.0, "internet_pct": 33.0}),
        json!({"gdp_per_capita": "23", "poverty_pct": 14.8, "hdi_total": 66.0, "internet_pct": 33.0}),
        json!({"gdp_per_capita": 23.0, "poverty_pct": null, "hdi_total": 66.0, "internet_pct": 33.0}),
        json!("23,14.8,66,33"),
    ] {
        let err = model.predict_json(&bad).expect_err("malformed request");
        assert!(matches!(err, TypologyError::ValidationError { .. }));
        assert!(!err.is_fatal());
    }

    assert_eq!(model.predict_json(&valid).expect("valid request"), before);
    assert_eq!(before, Typology::Lagging);
}

#[test]
fn test_rows_with_missing_features_are_dropped() {
    let dataset = load();
    let outcome = train_default(&dataset);

    assert_eq!(outcome.labeled.len(), 17 - 2);
    assert_eq!(
        outcome.dropped,
        vec!["Konawe Kepulauan".to_string(), "Buton Selatan".to_string()]
    );
    for name in &outcome.dropped {
        assert!(outcome.labeled.get(name).is_none());
    }
}

#[test]
fn test_dashboard_summaries_over_view() {
    let outcome = train_default(&load());
    let view = outcome.labeled.view_all();

    let kpi = kpi_summary(&view).expect("non-empty");
    assert_eq!(kpi.regions, 15);

    let gaps = gender_gap(&view);
    assert_eq!(gaps.len(), 15);
    assert_eq!(gaps[0].district, "Kota Kendari");
    assert!(gaps.windows(2).all(|w| w[0].hdi_male >= w[1].hdi_male));

    let grid = indicator_heatmap(&view).expect("complete rows");
    assert_eq!(grid.rows.len(), 15);
    let kendari = grid
        .rows
        .iter()
        .find(|r| r.district == "Kota Kendari")
        .expect("present");
    // Lowest poverty in the province: brightest poverty cell
    assert_eq!(kendari.scaled[4], 1.0);

    let internet = trend(&view, Indicator::InternetPct, Indicator::PovertyPct).expect("fit");
    assert!(internet.slope < 0.0);
    let sanitation = trend(&view, Indicator::SanitationPct, Indicator::PovertyPct).expect("fit");
    assert!(sanitation.r < 0.0);
}

#[test]
fn test_missing_file_is_fatal() {
    let err = Dataset::from_path("no/such/districts.csv").expect_err("missing file");
    assert!(matches!(err, TypologyError::DataUnavailable { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_too_few_clean_rows_is_fatal() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    std::io::Write::write_all(
        &mut file,
        b"district,gdp_per_capita,poverty_pct,hdi_male,hdi_female,internet_pct,sanitation_pct,expenditure\n\
          A,10,5,70,66,50,80,9000\n\
          B,20,6,72,68,,81,9100\n\
          C,30,7,74,70,60,82,9200\n",
    )
    .expect("write fixture");

    let dataset = Dataset::from_path(file.path()).expect("readable");
    let err = train(&dataset, &PipelineConfig::default()).expect_err("two clean rows");
    assert_eq!(
        err,
        TypologyError::InsufficientCleanData {
            rows: 2,
            required: 3
        }
    );
}
