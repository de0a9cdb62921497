//! Merging of baseline and scenario parameters

use crate::models::parameters::{ResolvedParams, ScenarioParameters};

/// Pick each category from the scenario when its adjustment flag is set
///
/// Pregnancy outcomes always come from the baseline: scenarios change
/// service delivery, not the underlying demographic and biological rates.
#[must_use]
pub fn resolve_parameters(baseline: &ScenarioParameters, scenario: &ScenarioParameters) -> ResolvedParams {
    let adjust = &scenario.adjustments;
    let pick = |flag: bool| if flag { scenario } else { baseline };

    ResolvedParams {
        pregnancy_outcomes: baseline.pregnancy_outcomes,
        baseline_family_planning: baseline.family_planning,
        family_planning: pick(adjust.family_planning).family_planning,
        demand: pick(adjust.demand).demand,
        facility_access: pick(adjust.facility_access).facility_access,
        out_of_facility_access: pick(adjust.out_of_facility_access).out_of_facility_access,
        facility_readiness: pick(adjust.facility_readiness).facility_readiness.clone(),
        out_of_facility_readiness: pick(adjust.out_of_facility_readiness)
            .out_of_facility_readiness
            .clone(),
    }
}
