//! Property-based tests using proptest.
//!
//! Datasets are three noisy groups around an urban, a mining and a rural
//! profile, with random group sizes and jitter.

use proptest::prelude::*;
use regional_typology::prelude::*;
use regional_typology::typology::{cluster_means, label_three_clusters};
use std::collections::BTreeSet;

/// (gdp, poverty, hdi, internet) centres.
const CENTRES: [[f64; 4]; 3] = [
    [60.0, 5.0, 83.0, 85.0],
    [100.0, 12.0, 71.0, 52.0],
    [22.0, 15.0, 66.0, 33.0],
];

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    (3usize..8, 3usize..8, 3usize..8)
        .prop_flat_map(|(a, b, c)| {
            let n = a + b + c;
            (
                Just([a, b, c]),
                proptest::collection::vec(proptest::array::uniform4(-1.0f64..1.0), n),
            )
        })
        .prop_map(|(sizes, jitter)| {
            let mut records = Vec::new();
            let mut noise = jitter.into_iter();
            for (g, &size) in sizes.iter().enumerate() {
                for i in 0..size {
                    let j = noise.next().unwrap_or([0.0; 4]);
                    let c = CENTRES[g];
                    records.push(
                        RegionRecord::empty(format!("g{g}-{i}"))
                            .with(Indicator::GdpPerCapita, c[0] + 5.0 * j[0])
                            .with(Indicator::PovertyPct, c[1] + j[1])
                            .with(Indicator::HdiTotal, c[2] + j[2])
                            .with(Indicator::InternetPct, c[3] + 3.0 * j[3]),
                    );
                }
            }
            Dataset::from_records(records).expect("generated names are unique")
        })
}

fn quick_config(seed: u64) -> PipelineConfig {
    PipelineConfig::default().with_seed(seed).with_n_init(3)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn training_is_deterministic_for_a_seed(dataset in dataset_strategy(), seed in any::<u64>()) {
        let a = train(&dataset, &quick_config(seed)).expect("trainable");
        let b = train(&dataset, &quick_config(seed)).expect("trainable");
        let typologies = |o: &TrainingOutcome| -> Vec<Typology> {
            o.labeled.rows().iter().map(|r| r.typology).collect()
        };
        prop_assert_eq!(typologies(&a), typologies(&b));
    }

    #[test]
    fn mapping_is_bijective(dataset in dataset_strategy(), seed in any::<u64>()) {
        let outcome = train(&dataset, &quick_config(seed)).expect("trainable");
        let mapping = outcome.model.mapping();
        let names: BTreeSet<Typology> = (0..3)
            .map(|c| mapping.typology(c).expect("ids 0..3 are mapped"))
            .collect();
        prop_assert_eq!(names.len(), 3);
        for t in Typology::ALL {
            prop_assert_eq!(mapping.typology(mapping.cluster(t)), Some(t));
        }
    }

    #[test]
    fn training_rows_predict_their_training_label(dataset in dataset_strategy(), seed in any::<u64>()) {
        let outcome = train(&dataset, &quick_config(seed)).expect("trainable");
        for row in outcome.labeled.rows() {
            prop_assert_eq!(outcome.model.predict_typology(&row.features).expect("valid"), row.typology);
        }
    }

    #[test]
    fn groups_are_recovered(dataset in dataset_strategy()) {
        let outcome = train(&dataset, &PipelineConfig::default()).expect("trainable");
        for row in outcome.labeled.rows() {
            let expected = if row.record.district.starts_with("g0") {
                Typology::Advanced
            } else if row.record.district.starts_with("g1") {
                Typology::ResourceRich
            } else {
                Typology::Lagging
            };
            prop_assert_eq!(row.typology, expected, "{}", row.record.district);
        }
    }

    #[test]
    fn advanced_has_highest_mean_hdi(dataset in dataset_strategy(), seed in any::<u64>()) {
        let outcome = train(&dataset, &quick_config(seed)).expect("trainable");
        let features: Vec<RegionFeatures> = outcome.labeled.rows().iter().map(|r| r.features).collect();
        let labels: Vec<usize> = outcome.labeled.rows().iter().map(|r| r.cluster).collect();
        let means = cluster_means(&features, &labels).expect("every cluster populated");
        let advanced = outcome.model.mapping().cluster(Typology::Advanced);
        for m in &means {
            prop_assert!(means[advanced].hdi_total >= m.hdi_total);
        }
        prop_assert_eq!(label_three_clusters(&means), outcome.model.mapping());
    }

    #[test]
    fn labeler_is_total_on_arbitrary_means(
        values in proptest::array::uniform3((0.0f64..200.0, 50.0f64..90.0))
    ) {
        let means = values.map(|(gdp_per_capita, hdi_total)| {
            regional_typology::typology::ClusterMeans { gdp_per_capita, hdi_total }
        });
        let mapping = label_three_clusters(&means);
        let names: BTreeSet<Typology> = mapping.iter().map(|(_, t)| t).collect();
        prop_assert_eq!(names.len(), 3);
    }
}
