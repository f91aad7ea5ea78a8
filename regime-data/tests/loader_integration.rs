//! Loads the on-disk fixtures and runs them through the core comparison.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use regime_core::{RegimeId, TaxRules, compare_regimes};
use regime_data::{RulesLoader, SlabScheduleLoader, scenarios};
use rust_decimal_macros::dec;

const SLABS_2025_26: &str = include_str!("../test-data/slabs_ay_2025_26.csv");
const FLAT_OLD_REGIME: &str = include_str!("../test-data/flat_old_regime.csv");

fn test_data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(name)
}

#[test]
fn test_rules_file_matches_built_in_rules() {
    let rules = RulesLoader::from_path(test_data("ay_2025_26.toml")).expect("Failed to load rules");

    assert_eq!(rules, TaxRules::ay_2025_26());
}

#[test]
fn test_slab_file_reproduces_built_in_schedules() {
    let records = SlabScheduleLoader::parse(SLABS_2025_26.as_bytes()).expect("Failed to parse CSV");
    let mut rules = TaxRules::ay_2025_26();

    let replaced = SlabScheduleLoader::apply(&records, &mut rules).expect("Failed to apply");

    assert_eq!(replaced, vec![RegimeId::New, RegimeId::Old]);
    assert_eq!(rules, TaxRules::ay_2025_26());
}

#[test]
fn test_slab_override_changes_old_regime_liability() {
    let records = SlabScheduleLoader::parse(FLAT_OLD_REGIME.as_bytes()).unwrap();
    let mut rules = TaxRules::ay_2025_26();
    SlabScheduleLoader::apply(&records, &mut rules).unwrap();

    let scenarios = scenarios::load_from_file(&test_data("scenarios.csv")).unwrap();
    let ten_lakh = &scenarios[1];
    let comparison = compare_regimes(&ten_lakh.inputs, &rules);

    // Net 9,50,000: 15,000 + 3,50,000 x 20% = 85,000 + 4% cess.
    assert_eq!(comparison.old_regime.total_liability, dec!(88400));
    assert_eq!(comparison.new_regime.total_liability, dec!(46800));
}

#[test]
fn test_scenario_batch_against_built_in_rules() {
    let rules = TaxRules::ay_2025_26();
    let scenarios = scenarios::load_from_file(&test_data("scenarios.csv")).expect("Failed to load");

    let results: Vec<(String, RegimeId, rust_decimal::Decimal)> = scenarios
        .iter()
        .map(|s| {
            let comparison = compare_regimes(&s.inputs, &rules);
            (
                s.display_label(),
                comparison.outcome.cheaper_regime,
                comparison.outcome.savings,
            )
        })
        .collect();

    assert_eq!(
        results,
        vec![
            ("six lakh".to_string(), RegimeId::New, dec!(23400)),
            ("ten lakh".to_string(), RegimeId::New, dec!(59800)),
            ("ten lakh with 80C".to_string(), RegimeId::New, dec!(28600)),
            ("hra heavy".to_string(), RegimeId::Old, dec!(0)),
        ]
    );
}
