//! Pregnancy counts from family planning coverage
//!
//! The baseline's unintended-pregnancy count is observed; everything else
//! is reconstructed from it. The intended-pregnancy count of the baseline
//! is held fixed across scenarios, and a scenario's family planning only
//! changes how many unintended pregnancies occur on top of it.

use crate::error::Result;
use crate::models::parameters::{FamilyPlanningParameters, PregnancyOutcomesParameters};
use crate::models::results::FamilyPlanningResults;
use crate::utils::{clamp01, round_count, safe_div};

/// Proportion of pregnancies that are unintended under a family planning regime
#[must_use]
pub fn proportion_unintended(params: &FamilyPlanningParameters) -> f64 {
    clamp01(
        1.0 - params.p_combined_effectiveness_of_methods
            * params.p_demand_for_family_planning
            * params.p_met_demand_for_family_planning,
    )
}

/// Compute total, intended and unintended pregnancies
///
/// # Arguments
/// * `outcomes` - Baseline pregnancy outcomes, providing the observed count
/// * `baseline` - Baseline family planning parameters
/// * `scenario` - Family planning parameters of this run
pub fn calculate_family_planning(
    outcomes: &PregnancyOutcomesParameters,
    baseline: &FamilyPlanningParameters,
    scenario: &FamilyPlanningParameters,
) -> Result<FamilyPlanningResults> {
    baseline.validate()?;
    scenario.validate()?;

    let n_unintended_baseline = outcomes.n_unintended_pregnancies;
    let pu_baseline = proportion_unintended(baseline);
    let pu_scenario = proportion_unintended(scenario);

    if pu_baseline == 0.0 && n_unintended_baseline > 0.0 {
        log::warn!(
            "Baseline family planning leaves no unintended pregnancies but {n_unintended_baseline} were observed"
        );
    }

    let total_baseline = round_count(safe_div(n_unintended_baseline, pu_baseline));

    let (n_intended, n_unintended) = if baseline == scenario {
        // Take the observed count directly rather than reconstructing it.
        (
            (total_baseline - n_unintended_baseline).max(0.0),
            n_unintended_baseline,
        )
    } else {
        let intended_baseline = (total_baseline - n_unintended_baseline).max(0.0);
        if pu_scenario >= 1.0 {
            log::warn!("Scenario family planning makes every pregnancy unintended; total pregnancies fall back to 0");
        }
        let total_scenario = round_count(safe_div(intended_baseline, 1.0 - pu_scenario));
        (
            intended_baseline,
            (total_scenario - intended_baseline).max(0.0),
        )
    };

    let results = FamilyPlanningResults {
        proportion_unintended_baseline: pu_baseline,
        proportion_unintended: pu_scenario,
        n_pregnancies: n_intended + n_unintended,
        n_intended,
        n_unintended,
    };
    log::debug!(
        "Family planning: {} pregnancies ({} intended, {} unintended)",
        results.n_pregnancies,
        results.n_intended,
        results.n_unintended
    );
    Ok(results)
}
