use pregnancy_pathways::models::{
    AccessFacilityParameters, AccessOutOfFacilityParameters, Adjustments, DemandParameters,
    FamilyPlanningParameters, Parameters, PregnancyOutcomesParameters, ReadinessMap,
    ScenarioParameters,
};

/// Parameters shipped with the repository under `demos/`
pub const DEMO_PARAMETERS: &str = include_str!("../../demos/parameters.json");

/// Parse the demo parameters
#[must_use]
pub fn demo_parameters() -> Parameters {
    Parameters::from_json_str(DEMO_PARAMETERS).expect("demo parameters should parse")
}

/// Facility readiness covering every standard catalog item at one level
#[must_use]
pub fn facility_readiness(level: f64) -> ReadinessMap {
    [
        "hw",
        "mva",
        "eva",
        "mife",
        "miso",
        "dc",
        "antibiotics",
        "iv_fluids",
        "blood",
        "theatre",
    ]
    .into_iter()
    .map(|item| (item.to_string(), level))
    .collect()
}

/// Out-of-facility readiness covering every standard catalog item at one level
#[must_use]
pub fn out_of_facility_readiness(level: f64) -> ReadinessMap {
    ["hw", "mife", "miso", "traditional"]
        .into_iter()
        .map(|item| (item.to_string(), level))
        .collect()
}

/// Baseline parameter set with round numbers
#[must_use]
pub fn baseline_parameters() -> ScenarioParameters {
    ScenarioParameters {
        id: "baseline".to_string(),
        name: "Baseline".to_string(),
        pregnancy_outcomes: PregnancyOutcomesParameters {
            n_unintended_pregnancies: 1000.0,
            p_resulting_in_miscarriage: 0.1,
            p_resulting_in_contraindication: 0.05,
        },
        family_planning: FamilyPlanningParameters {
            p_demand_for_family_planning: 0.8,
            p_met_demand_for_family_planning: 0.75,
            p_combined_effectiveness_of_methods: 0.9,
        },
        demand: DemandParameters {
            p_demand_for_abortion: 0.6,
            p_prefer_facility: 0.5,
        },
        facility_access: AccessFacilityParameters {
            p_no_legal_restrictions: 0.8,
            p_within_distance: 0.7,
            p_can_afford: 0.6,
            p_facility_offers_abortion: 0.5,
            p_facility_offers_pac: 0.9,
        },
        out_of_facility_access: AccessOutOfFacilityParameters {
            p_within_distance: 0.9,
            p_can_afford: 0.8,
        },
        facility_readiness: facility_readiness(0.6),
        out_of_facility_readiness: out_of_facility_readiness(0.4),
        adjustments: Adjustments::default(),
    }
}

/// A scenario that copies the baseline under a new id
#[must_use]
pub fn scenario_from_baseline(id: &str, adjustments: Adjustments) -> ScenarioParameters {
    ScenarioParameters {
        id: id.to_string(),
        name: format!("Scenario {id}"),
        adjustments,
        ..baseline_parameters()
    }
}

/// Assert two floats agree within a tolerance
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}
