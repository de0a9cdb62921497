//! Tests for the per-scenario pipeline

use pregnancy_pathways::algorithm::pathway::{resolve_parameters, run_pathway};
use pregnancy_pathways::models::{Adjustments, Catalog, PregnancyOutcomesParameters};
use pregnancy_pathways::ModelConfig;

use crate::utils::{assert_close, baseline_parameters, scenario_from_baseline};

fn run_baseline() -> pregnancy_pathways::algorithm::pathway::PathwayOutputs {
    let baseline = baseline_parameters();
    let resolved = resolve_parameters(&baseline, &baseline);
    run_pathway(&resolved, &Catalog::standard().unwrap(), &ModelConfig::default()).unwrap()
}

#[test]
fn test_baseline_reproduces_observed_unintended_pregnancies() {
    let outputs = run_baseline();
    assert_eq!(outputs.family_planning.n_unintended, 1000.0);
    assert_eq!(outputs.family_planning.n_intended, 1174.0);
    assert_eq!(outputs.family_planning.n_pregnancies, 2174.0);
    assert_eq!(outputs.demand.n_seeks_induced_abortion, 619.0);
}

#[test]
fn test_access_split_is_exact() {
    let access = run_baseline().access;

    // 619 seekers, half preferring a facility
    assert_eq!(access.n_facility_seekers, 310.0);
    assert_eq!(access.n_out_of_facility_first_choice, 309.0);

    // 0.8 * 0.5 * (0.5 * min(0.7, 0.6) + 0.5 * 0.7 * 0.6)
    assert_close(access.p_facility_arrive, 0.204, 1e-12);
    assert_eq!(access.n_facility_arrive, 63.0);
    assert_eq!(access.n_facility_rerouted, 247.0);
    assert_eq!(access.n_facility_no_access, 0.0);

    assert_eq!(access.n_out_of_facility_pool, 556.0);
    assert_close(access.p_out_of_facility_arrive, 0.76, 1e-12);
    assert_eq!(access.n_out_of_facility_arrive, 423.0);
    assert_eq!(access.n_no_access, 133.0);

    assert_eq!(
        access.n_facility_arrive + access.n_out_of_facility_arrive + access.n_no_access,
        access.n_seeks_induced_abortion
    );
}

#[test]
fn test_pregnancies_are_conserved() {
    let outputs = run_baseline();
    let abortions = &outputs.abortions;
    let total = abortions.n_miscarriage + abortions.n_live_birth + abortions.n_total_abortions;
    assert_close(total, outputs.family_planning.n_pregnancies, 1e-6);

    assert_close(
        abortions.n_additional_miscarriage + abortions.n_additional_live_birth,
        abortions.n_not_obtaining_abortion,
        1e-9,
    );
    assert_close(
        abortions.n_safe + abortions.n_less_safe + abortions.n_least_safe,
        abortions.n_total_abortions,
        1e-9,
    );
}

#[test]
fn test_receipts_cover_arrivals() {
    let outputs = run_baseline();
    for table in [&outputs.facility_receipt, &outputs.out_of_facility_receipt] {
        assert_close(table.total_probability(), 1.0, 1e-9);
        assert_close(table.total_received() + table.no_abortion.n, table.n_arriving, 1e-9);
    }
    assert_eq!(outputs.facility_receipt.n_arriving, outputs.access.n_facility_arrive);
    assert_eq!(
        outputs.out_of_facility_receipt.n_arriving,
        outputs.access.n_out_of_facility_arrive
    );
}

#[test]
fn test_complications_and_care_reconcile() {
    let outputs = run_baseline();
    let complications = &outputs.complications;
    assert_close(
        complications.n_total_complications + complications.n_no_complications,
        outputs.abortions.n_total_abortions,
        0.01,
    );
    let by_complication: f64 = complications.by_complication.iter().map(|c| c.n).sum();
    assert_close(by_complication, complications.n_total_complications, 1e-9);

    let care = &outputs.post_abortion_care;
    assert_close(care.p_access, 0.9 * 0.51, 1e-12);
    assert_close(care.moderate.effectiveness, 0.6_f64.powi(3), 1e-12);
    assert_close(care.severe.effectiveness, 0.6_f64.powi(5), 1e-12);
    assert_close(
        care.n_receiving_effective_care + care.n_not_receiving_effective_care,
        care.n_total_complications,
        0.01,
    );
    assert_eq!(
        care.n_receiving_effective_care,
        care.moderate.n_receiving_effective_care + care.severe.n_receiving_effective_care
    );
}

#[test]
fn test_pregnancy_outcomes_always_come_from_baseline() {
    let baseline = baseline_parameters();
    let mut scenario = scenario_from_baseline("other-rates", Adjustments::all());
    scenario.pregnancy_outcomes = PregnancyOutcomesParameters {
        n_unintended_pregnancies: 50.0,
        p_resulting_in_miscarriage: 0.5,
        p_resulting_in_contraindication: 0.4,
    };

    let resolved = resolve_parameters(&baseline, &scenario);
    assert_eq!(resolved.pregnancy_outcomes, baseline.pregnancy_outcomes);

    let outputs = run_pathway(&resolved, &Catalog::standard().unwrap(), &ModelConfig::default()).unwrap();
    assert_eq!(outputs.family_planning.n_unintended, 1000.0);
}

#[test]
fn test_unadjusted_categories_fall_back_to_baseline() {
    let baseline = baseline_parameters();
    let mut scenario = scenario_from_baseline(
        "demand-only",
        Adjustments {
            demand: true,
            ..Default::default()
        },
    );
    scenario.demand.p_demand_for_abortion = 0.3;
    scenario.facility_access.p_facility_offers_abortion = 1.0;

    let resolved = resolve_parameters(&baseline, &scenario);
    assert_eq!(resolved.demand.p_demand_for_abortion, 0.3);
    assert_eq!(resolved.facility_access, baseline.facility_access);

    let outputs = run_pathway(&resolved, &Catalog::standard().unwrap(), &ModelConfig::default()).unwrap();
    // round(850 * 0.3) seekers plus the 109 contraindicated
    assert_eq!(outputs.demand.n_seeks_induced_abortion, 255.0 + 109.0);
}

#[test]
fn test_no_seekers_gives_zero_shares_not_nan() {
    let mut baseline = baseline_parameters();
    baseline.pregnancy_outcomes.p_resulting_in_contraindication = 0.0;
    baseline.demand.p_demand_for_abortion = 0.0;

    let resolved = resolve_parameters(&baseline, &baseline);
    let outputs = run_pathway(&resolved, &Catalog::standard().unwrap(), &ModelConfig::default()).unwrap();
    assert_eq!(outputs.access.n_seeks_induced_abortion, 0.0);
    assert_eq!(outputs.access.p_no_access_of_seekers, 0.0);
    assert_eq!(outputs.abortions.n_total_abortions, 0.0);
    assert_eq!(outputs.complications.n_total_complications, 0.0);
}
