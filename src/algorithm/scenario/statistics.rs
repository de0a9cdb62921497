//! Plain-text summaries of model results

use itertools::Itertools;

use crate::algorithm::scenario::comparison::compare_to_baseline;
use crate::models::results::{Results, ScenarioResults};
use crate::models::types::Safety;

/// Functions for result summaries
pub struct ResultsSummary;

impl ResultsSummary {
    /// Generate a summary of the baseline and every scenario
    #[must_use]
    pub fn generate_summary(results: &Results) -> String {
        let mut summary = String::new();
        summary.push_str("Pregnancy Pathways Summary:\n");
        summary.push_str(&Self::scenario_section(&results.baseline));

        for scenario in &results.scenarios {
            summary.push('\n');
            summary.push_str(&Self::scenario_section(scenario));
        }

        let comparisons = compare_to_baseline(results);
        if !comparisons.is_empty() {
            summary.push_str("\nChange Relative to Baseline:\n");
            for comparison in comparisons {
                summary.push_str(&format!("  {} ({}):\n", comparison.name, comparison.id));
                summary.push_str(&format!(
                    "    Unintended Pregnancies: {:+.0}\n",
                    comparison.delta_unintended
                ));
                summary.push_str(&format!(
                    "    Safe / Less Safe / Least Safe: {:+.1} / {:+.1} / {:+.1}\n",
                    comparison.delta_safe, comparison.delta_less_safe, comparison.delta_least_safe
                ));
                summary.push_str(&format!(
                    "    Complications: {:+.1} ({:+.1} severe)\n",
                    comparison.delta_complications, comparison.delta_severe_complications
                ));
                summary.push_str(&format!(
                    "    Receiving Effective Care: {:+.0}\n",
                    comparison.delta_receiving_effective_care
                ));
            }
        }

        summary
    }

    fn scenario_section(results: &ScenarioResults) -> String {
        let mut section = String::new();
        section.push_str(&format!("  {} ({}):\n", results.name, results.id));
        section.push_str(&format!(
            "    Pregnancies: {:.0} ({:.0} intended, {:.0} unintended)\n",
            results.family_planning.n_pregnancies,
            results.family_planning.n_intended,
            results.family_planning.n_unintended
        ));
        section.push_str(&format!(
            "    Seeking Abortion: {:.0} ({:.0} contraindicated)\n",
            results.demand.n_seeks_induced_abortion, results.demand.n_contraindicated
        ));
        section.push_str(&format!(
            "    Reached Facility / Out-of-Facility / No Access: {:.0} / {:.0} / {:.0}\n",
            results.access.n_facility_arrive,
            results.access.n_out_of_facility_arrive,
            results.access.n_no_access
        ));

        let shares = results.safety_subtotals.total_shares;
        let by_safety = Safety::ALL
            .iter()
            .map(|safety| {
                format!(
                    "{safety}: {:.1} ({:.1}%)",
                    results.safety_subtotals.total.get(*safety),
                    shares.get(*safety) * 100.0
                )
            })
            .join(", ");
        section.push_str(&format!(
            "    Abortions: {:.1} [{by_safety}]\n",
            results.abortions.n_total_abortions
        ));
        section.push_str(&format!(
            "    Miscarriages / Live Births: {:.0} / {:.0}\n",
            results.abortions.n_miscarriage, results.abortions.n_live_birth
        ));
        section.push_str(&format!(
            "    Complications: {:.1} ({:.1} moderate, {:.1} severe)\n",
            results.complications.n_total_complications,
            results.complications.n_moderate,
            results.complications.n_severe
        ));
        section.push_str(&format!(
            "    Effective Post-Abortion Care: {:.0} of {:.1} (access {:.1}%)\n",
            results.post_abortion_care.n_receiving_effective_care,
            results.post_abortion_care.n_total_complications,
            results.post_abortion_care.p_access * 100.0
        ));
        section
    }
}
