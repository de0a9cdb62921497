//! Tests for scenario comparison and the text summary

use pregnancy_pathways::algorithm::scenario::compare_to_baseline;
use pregnancy_pathways::models::Parameters;
use pregnancy_pathways::{Catalog, ModelConfig, ResultsSummary, run_model};

use crate::utils::{baseline_parameters, demo_parameters};

#[test]
fn test_comparison_against_baseline() {
    let results =
        run_model(&demo_parameters(), &Catalog::standard().unwrap(), ModelConfig::default()).unwrap();
    let comparisons = compare_to_baseline(&results);
    assert_eq!(comparisons.len(), 2);

    let family_planning = &comparisons[0];
    assert_eq!(family_planning.id, "family-planning");
    assert!(family_planning.delta_unintended < 0.0);
    // Intended pregnancies do not change, so every avoided pregnancy is unintended.
    assert_eq!(family_planning.delta_pregnancies, family_planning.delta_unintended);
    assert!(family_planning.delta_seeking_abortion < 0.0);

    let readiness = &comparisons[1];
    assert_eq!(readiness.delta_pregnancies, 0.0);
    assert!(readiness.delta_safe > 0.0);
}

#[test]
fn test_summary_lists_every_scenario() {
    let results =
        run_model(&demo_parameters(), &Catalog::standard().unwrap(), ModelConfig::default()).unwrap();
    let summary = ResultsSummary::generate_summary(&results);

    assert!(summary.starts_with("Pregnancy Pathways Summary:"));
    assert!(summary.contains("Baseline (baseline)"));
    assert!(summary.contains("(family-planning)"));
    assert!(summary.contains("(facility-readiness)"));
    assert!(summary.contains("Change Relative to Baseline:"));
    assert!(summary.contains("Pregnancies: 2174 (1174 intended, 1000 unintended)"));
}

#[test]
fn test_summary_without_scenarios_has_no_comparison() {
    let params = Parameters {
        baseline: baseline_parameters(),
        scenarios: Vec::new(),
    };
    let results = run_model(&params, &Catalog::standard().unwrap(), ModelConfig::default()).unwrap();
    let summary = ResultsSummary::generate_summary(&results);

    assert!(summary.contains("Baseline (baseline)"));
    assert!(!summary.contains("Change Relative to Baseline"));
}
