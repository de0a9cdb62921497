//! Split of pregnancies into miscarriage, contraindication, live birth and
//! abortion seeking.

use crate::error::Result;
use crate::error::util::ensure_proportions;
use crate::models::parameters::{DemandParameters, PregnancyOutcomesParameters};
use crate::models::results::{DemandResults, FamilyPlanningResults};
use crate::utils::{round_count, split_rounded};

/// Miscarriages, contraindications and what remains of one sub-population
struct SubPopulationSplit {
    miscarriage: f64,
    contraindicated: f64,
    remaining: f64,
}

fn split_sub_population(n: f64, p_miscarriage: f64, p_contraindicated: f64) -> SubPopulationSplit {
    let miscarriage = round_count(n * p_miscarriage);
    let contraindicated = round_count(n * p_contraindicated);
    SubPopulationSplit {
        miscarriage,
        contraindicated,
        remaining: (n - miscarriage - contraindicated).max(0.0),
    }
}

/// Compute demand for abortion among the pregnancies
///
/// Contraindicated pregnancies, intended or not, all seek an abortion in
/// addition to the demand-driven seekers among unintended pregnancies.
pub fn calculate_demand(
    family_planning: &FamilyPlanningResults,
    outcomes: &PregnancyOutcomesParameters,
    demand: &DemandParameters,
) -> Result<DemandResults> {
    ensure_proportions(&[
        (
            "pregnancyOutcomes.pResultingInMiscarriage",
            outcomes.p_resulting_in_miscarriage,
        ),
        (
            "pregnancyOutcomes.pResultingInContraindication",
            outcomes.p_resulting_in_contraindication,
        ),
        ("demand.pDemandForAbortion", demand.p_demand_for_abortion),
    ])?;

    let p_miscarriage = outcomes.p_resulting_in_miscarriage.min(1.0);
    let p_contraindicated = (1.0 - p_miscarriage).min(outcomes.p_resulting_in_contraindication);

    let intended = split_sub_population(family_planning.n_intended, p_miscarriage, p_contraindicated);
    let unintended =
        split_sub_population(family_planning.n_unintended, p_miscarriage, p_contraindicated);

    let (n_seeks_before_contraindicated, n_live_birth_unintended) =
        split_rounded(unintended.remaining, demand.p_demand_for_abortion);
    let n_contraindicated = intended.contraindicated + unintended.contraindicated;

    let results = DemandResults {
        p_miscarriage,
        p_contraindicated,
        n_miscarriage_intended: intended.miscarriage,
        n_miscarriage_unintended: unintended.miscarriage,
        n_miscarriage: intended.miscarriage + unintended.miscarriage,
        n_contraindicated_intended: intended.contraindicated,
        n_contraindicated_unintended: unintended.contraindicated,
        n_contraindicated,
        n_live_birth_intended: intended.remaining,
        n_live_birth_unintended,
        n_live_birth: intended.remaining + n_live_birth_unintended,
        n_seeks_before_contraindicated,
        n_seeks_induced_abortion: n_seeks_before_contraindicated + n_contraindicated,
    };
    log::debug!(
        "Demand: {} seek an induced abortion ({} contraindicated)",
        results.n_seeks_induced_abortion,
        results.n_contraindicated
    );
    Ok(results)
}
