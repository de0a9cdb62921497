//! Tests for parameter loading and validation

use pregnancy_pathways::models::{Adjustments, Parameters, ReadinessMap};
use pregnancy_pathways::ModelError;

use crate::utils::{DEMO_PARAMETERS, baseline_parameters, demo_parameters, scenario_from_baseline};

#[test]
fn test_demo_parameters_parse_and_validate() {
    let params = demo_parameters();
    assert_eq!(params.baseline.id, "baseline");
    assert_eq!(params.scenarios.len(), 2);
    assert_eq!(params.baseline.pregnancy_outcomes.n_unintended_pregnancies, 1000.0);
    assert_eq!(params.baseline.facility_access.p_facility_offers_pac, 0.9);
    assert_eq!(params.baseline.facility_readiness.get("theatre"), Some(0.6));

    let readiness = &params.scenarios[1];
    assert!(readiness.adjustments.facility_readiness);
    assert!(!readiness.adjustments.family_planning);
    assert_eq!(readiness.out_of_facility_readiness.iter().count(), 0);

    params.validate().unwrap();
}

#[test]
fn test_missing_pregnancy_outcomes_default_for_scenarios() {
    let params = Parameters::from_json_str(DEMO_PARAMETERS).unwrap();
    let scenario = &params.scenarios[0];
    assert_eq!(scenario.pregnancy_outcomes.n_unintended_pregnancies, 0.0);
}

#[test]
fn test_negative_unintended_count_is_rejected() {
    let mut params = Parameters {
        baseline: baseline_parameters(),
        scenarios: Vec::new(),
    };
    params.baseline.pregnancy_outcomes.n_unintended_pregnancies = -5.0;
    let err = params.validate().unwrap_err();
    assert!(matches!(err.root(), ModelError::ValidationError(_)));
}

#[test]
fn test_baseline_validates_every_category() {
    let mut params = Parameters {
        baseline: baseline_parameters(),
        scenarios: Vec::new(),
    };
    params.baseline.out_of_facility_access.p_within_distance = f64::NAN;
    let err = params.validate().unwrap_err();
    match err.root() {
        ModelError::InvalidProportion { parameter, .. } => {
            assert_eq!(parameter, "outOfFacilityAccess.pWithinDistance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_scenario_validation_covers_adjusted_readiness() {
    let mut scenario = scenario_from_baseline(
        "stock-out",
        Adjustments {
            facility_readiness: true,
            ..Default::default()
        },
    );
    scenario.facility_readiness = ReadinessMap::new().with("hw", 1.0).with("blood", 7.0);
    let params = Parameters {
        baseline: baseline_parameters(),
        scenarios: vec![scenario],
    };

    let err = params.validate().unwrap_err();
    match &err {
        ModelError::ScenarioFailed { scenario, source } => {
            assert_eq!(scenario, "stock-out");
            assert!(matches!(**source, ModelError::InvalidProportion { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_adjustments_default_to_none() {
    let json = r#"{ "familyPlanning": true }"#;
    let adjustments: Adjustments = serde_json::from_str(json).unwrap();
    assert!(adjustments.family_planning);
    assert!(!adjustments.demand);
    assert!(!adjustments.is_empty());
    assert!(Adjustments::default().is_empty());
}

#[test]
fn test_malformed_json_is_a_json_error() {
    let err = Parameters::from_json_str("{ \"baseline\": ").unwrap_err();
    assert!(matches!(err, ModelError::JsonError(_)));
}
