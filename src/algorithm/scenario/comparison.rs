//! Differences between each scenario and the baseline

use serde::{Deserialize, Serialize};

use crate::models::results::{Results, ScenarioResults};

/// Change of the headline figures of one scenario relative to baseline
///
/// Every field is `scenario - baseline`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    /// Scenario id
    pub id: String,
    /// Scenario display name
    pub name: String,
    pub delta_pregnancies: f64,
    pub delta_unintended: f64,
    pub delta_seeking_abortion: f64,
    pub delta_no_access: f64,
    pub delta_safe: f64,
    pub delta_less_safe: f64,
    pub delta_least_safe: f64,
    pub delta_total_abortions: f64,
    pub delta_complications: f64,
    pub delta_severe_complications: f64,
    pub delta_receiving_effective_care: f64,
}

impl ScenarioComparison {
    /// Compare one scenario's results with the baseline's
    #[must_use]
    pub fn between(baseline: &ScenarioResults, scenario: &ScenarioResults) -> Self {
        Self {
            id: scenario.id.clone(),
            name: scenario.name.clone(),
            delta_pregnancies: scenario.family_planning.n_pregnancies
                - baseline.family_planning.n_pregnancies,
            delta_unintended: scenario.family_planning.n_unintended
                - baseline.family_planning.n_unintended,
            delta_seeking_abortion: scenario.demand.n_seeks_induced_abortion
                - baseline.demand.n_seeks_induced_abortion,
            delta_no_access: scenario.access.n_no_access - baseline.access.n_no_access,
            delta_safe: scenario.abortions.n_safe - baseline.abortions.n_safe,
            delta_less_safe: scenario.abortions.n_less_safe - baseline.abortions.n_less_safe,
            delta_least_safe: scenario.abortions.n_least_safe - baseline.abortions.n_least_safe,
            delta_total_abortions: scenario.abortions.n_total_abortions
                - baseline.abortions.n_total_abortions,
            delta_complications: scenario.complications.n_total_complications
                - baseline.complications.n_total_complications,
            delta_severe_complications: scenario.complications.n_severe
                - baseline.complications.n_severe,
            delta_receiving_effective_care: scenario.post_abortion_care.n_receiving_effective_care
                - baseline.post_abortion_care.n_receiving_effective_care,
        }
    }
}

/// Compare every scenario with the baseline, in scenario order
#[must_use]
pub fn compare_to_baseline(results: &Results) -> Vec<ScenarioComparison> {
    results
        .scenarios
        .iter()
        .map(|scenario| ScenarioComparison::between(&results.baseline, scenario))
        .collect()
}
