//! Tests for running baseline and scenarios together

use pregnancy_pathways::models::{Adjustments, Parameters};
use pregnancy_pathways::{Catalog, ModelConfig, ModelError, ScenarioRunner, run_model};

use crate::utils::{baseline_parameters, demo_parameters, scenario_from_baseline};

#[test]
fn test_demo_parameters_run() {
    let catalog = Catalog::standard().unwrap();
    let results = ScenarioRunner::new(&catalog).run(&demo_parameters()).unwrap();

    assert_eq!(results.baseline.id, "baseline");
    let ids: Vec<&str> = results.scenarios.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["family-planning", "facility-readiness"]);

    let family_planning = results.scenario("family-planning").unwrap();
    assert_eq!(
        family_planning.family_planning.n_intended,
        results.baseline.family_planning.n_intended
    );
    assert!(
        family_planning.family_planning.n_unintended
            < results.baseline.family_planning.n_unintended
    );

    let readiness = results.scenario("facility-readiness").unwrap();
    assert!(readiness.access.n_facility_arrive > results.baseline.access.n_facility_arrive);
    assert!(readiness.abortions.n_safe > results.baseline.abortions.n_safe);
}

#[test]
fn test_unadjusted_scenario_matches_baseline() {
    let params = Parameters {
        baseline: baseline_parameters(),
        scenarios: vec![scenario_from_baseline("copy", Adjustments::default())],
    };
    let results = run_model(&params, &Catalog::standard().unwrap(), ModelConfig::default()).unwrap();
    let copy = &results.scenarios[0];

    assert_eq!(copy.family_planning, results.baseline.family_planning);
    assert_eq!(copy.demand, results.baseline.demand);
    assert_eq!(copy.access, results.baseline.access);
    assert_eq!(copy.abortions, results.baseline.abortions);
    assert_eq!(copy.post_abortion_care, results.baseline.post_abortion_care);
}

#[test]
fn test_parallel_run_preserves_order_and_values() {
    let mut params = demo_parameters();
    for i in 0_u32..8 {
        let mut scenario = scenario_from_baseline(
            &format!("access-{i}"),
            Adjustments {
                facility_access: true,
                ..Default::default()
            },
        );
        scenario.facility_access.p_facility_offers_abortion = f64::from(i) / 8.0;
        params.scenarios.push(scenario);
    }

    let catalog = Catalog::standard().unwrap();
    let sequential = ScenarioRunner::new(&catalog).run(&params).unwrap();
    let parallel = ScenarioRunner::new(&catalog)
        .with_config(ModelConfig {
            parallel_scenarios: true,
            ..ModelConfig::default()
        })
        .run(&params)
        .unwrap();

    assert_eq!(sequential, parallel);
    let expected: Vec<&str> = params.scenarios.iter().map(|s| s.id.as_str()).collect();
    let actual: Vec<&str> = parallel.scenarios.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_error_names_scenario_and_parameter() {
    let mut bad = scenario_from_baseline(
        "bad-demand",
        Adjustments {
            demand: true,
            ..Default::default()
        },
    );
    bad.demand.p_demand_for_abortion = 1.5;
    let params = Parameters {
        baseline: baseline_parameters(),
        scenarios: vec![bad],
    };

    let err = run_model(&params, &Catalog::standard().unwrap(), ModelConfig::default()).unwrap_err();
    match &err {
        ModelError::ScenarioFailed { scenario, .. } => assert_eq!(scenario, "bad-demand"),
        other => panic!("unexpected error: {other:?}"),
    }
    match err.root() {
        ModelError::InvalidProportion { parameter, value } => {
            assert_eq!(parameter, "demand.pDemandForAbortion");
            assert_eq!(*value, 1.5);
        }
        other => panic!("unexpected root error: {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("bad-demand"));
    assert!(message.contains("demand.pDemandForAbortion"));
}

#[test]
fn test_unadjusted_categories_are_not_validated() {
    let mut scenario = scenario_from_baseline("ignored", Adjustments::default());
    scenario.facility_access.p_can_afford = 2.0;
    let params = Parameters {
        baseline: baseline_parameters(),
        scenarios: vec![scenario],
    };
    assert!(run_model(&params, &Catalog::standard().unwrap(), ModelConfig::default()).is_ok());
}

#[test]
fn test_duplicate_scenario_ids_are_rejected() {
    let params = Parameters {
        baseline: baseline_parameters(),
        scenarios: vec![
            scenario_from_baseline("twice", Adjustments::default()),
            scenario_from_baseline("twice", Adjustments::default()),
        ],
    };
    let err = run_model(&params, &Catalog::standard().unwrap(), ModelConfig::default()).unwrap_err();
    assert!(matches!(err, ModelError::ValidationError(_)));
}

#[test]
fn test_run_each_keeps_going_past_failures() {
    let mut bad = scenario_from_baseline(
        "bad-readiness",
        Adjustments {
            out_of_facility_readiness: true,
            ..Default::default()
        },
    );
    bad.out_of_facility_readiness = bad.out_of_facility_readiness.with("miso", -0.1);

    let params = Parameters {
        baseline: baseline_parameters(),
        scenarios: vec![
            scenario_from_baseline("first", Adjustments::default()),
            bad,
            scenario_from_baseline("third", Adjustments::default()),
        ],
    };

    let catalog = Catalog::standard().unwrap();
    let (baseline, scenarios) = ScenarioRunner::new(&catalog).run_each(&params);
    assert!(baseline.is_ok());
    assert_eq!(scenarios.len(), 3);
    assert_eq!(scenarios[0].as_ref().unwrap().id, "first");
    assert_eq!(scenarios[2].as_ref().unwrap().id, "third");

    let err = scenarios[1].as_ref().unwrap_err();
    match err.root() {
        ModelError::InvalidProportion { parameter, .. } => {
            assert_eq!(parameter, "outOfFacilityReadiness.miso");
        }
        other => panic!("unexpected root error: {other:?}"),
    }
}

#[test]
fn test_results_serialize_with_camel_case_keys() {
    let catalog = Catalog::standard().unwrap();
    let results = ScenarioRunner::new(&catalog).run(&demo_parameters()).unwrap();
    let json = results.to_json_pretty().unwrap();

    assert!(json.contains("\"noAbortion\""));
    assert!(json.contains("\"nSeeksInducedAbortion\""));
    assert!(json.contains("\"pFacilityOffersPAC\""));
    assert!(json.contains("\"safetySubtotals\""));
}
