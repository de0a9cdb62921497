//! Output of the scenario pipeline
//!
//! Every stage produces one of the structs below. Counts are `f64`: stages
//! that round produce whole numbers, while service receipts are expected
//! values and may be fractional.

use serde::{Deserialize, Serialize};

use crate::models::parameters::ResolvedParams;
use crate::models::types::{ComplicationCategory, Safety, Sector};
use crate::utils::safe_div;

/// Pregnancy counts after family planning
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyPlanningResults {
    /// Proportion of pregnancies that are unintended under baseline family planning
    pub proportion_unintended_baseline: f64,
    /// Proportion of pregnancies that are unintended in this run
    pub proportion_unintended: f64,
    /// Total pregnancies
    pub n_pregnancies: f64,
    /// Intended pregnancies
    pub n_intended: f64,
    /// Unintended pregnancies
    pub n_unintended: f64,
}

/// Split of pregnancies before any access barrier applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandResults {
    /// Effective miscarriage proportion
    pub p_miscarriage: f64,
    /// Effective contraindication proportion, capped by miscarriage
    pub p_contraindicated: f64,
    pub n_miscarriage_intended: f64,
    pub n_miscarriage_unintended: f64,
    /// All miscarriages before access
    pub n_miscarriage: f64,
    pub n_contraindicated_intended: f64,
    pub n_contraindicated_unintended: f64,
    /// All contraindicated pregnancies; these seek an abortion
    pub n_contraindicated: f64,
    pub n_live_birth_intended: f64,
    pub n_live_birth_unintended: f64,
    /// All live births before access
    pub n_live_birth: f64,
    /// Unintended pregnancies seeking abortion through demand alone
    pub n_seeks_before_contraindicated: f64,
    /// All abortion seekers, including contraindicated pregnancies
    pub n_seeks_induced_abortion: f64,
}

/// Routing of abortion seekers through the access funnels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessResults {
    /// Seekers entering the funnels
    pub n_seeks_induced_abortion: f64,
    /// Seekers whose first choice is a facility
    pub n_facility_seekers: f64,
    /// Seekers whose first choice is out-of-facility care
    pub n_out_of_facility_first_choice: f64,
    /// Probability a facility seeker arrives at a facility offering abortion
    pub p_facility_arrive: f64,
    /// Seekers arriving at a facility
    pub n_facility_arrive: f64,
    /// Facility seekers rerouted to out-of-facility care
    pub n_facility_rerouted: f64,
    /// Facility seekers with no access at all; always 0
    pub n_facility_no_access: f64,
    /// First-choice plus rerouted out-of-facility seekers
    pub n_out_of_facility_pool: f64,
    /// Probability an out-of-facility seeker reaches a provider
    pub p_out_of_facility_arrive: f64,
    /// Seekers reaching an out-of-facility provider
    pub n_out_of_facility_arrive: f64,
    /// Seekers without access to any abortion care
    pub n_no_access: f64,
    /// Share of seekers arriving at a facility
    pub p_facility_of_seekers: f64,
    /// Share of seekers reaching an out-of-facility provider
    pub p_out_of_facility_of_seekers: f64,
    /// Share of seekers without access
    pub p_no_access_of_seekers: f64,
}

/// Receipt of one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceReceipt {
    /// Service id from the catalog
    pub service_id: String,
    /// Probability an arriving client receives this service
    pub p: f64,
    /// Expected number of clients receiving this service
    pub n: f64,
}

/// Clients who arrived but received no abortion
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NoAbortion {
    /// Probability of receiving no service
    pub p: f64,
    /// Expected number of clients receiving no service
    pub n: f64,
}

/// Allocation of arriving clients across one sector's services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptTable {
    /// Sector this table belongs to
    pub sector: Sector,
    /// Clients arriving in the sector
    pub n_arriving: f64,
    /// Weight of the naive allocation in the blend
    pub mixture: f64,
    /// Services in catalog order
    pub services: Vec<ServiceReceipt>,
    /// Clients receiving no abortion
    pub no_abortion: NoAbortion,
}

impl ReceiptTable {
    /// Total expected abortions delivered in this sector
    #[must_use]
    pub fn total_received(&self) -> f64 {
        self.services.iter().map(|s| s.n).sum()
    }

    /// Sum of service probabilities plus the no-abortion probability
    #[must_use]
    pub fn total_probability(&self) -> f64 {
        self.services.iter().map(|s| s.p).sum::<f64>() + self.no_abortion.p
    }
}

/// Abortion counts per safety category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SafetyBreakdown {
    /// Safe abortions
    pub safe: f64,
    /// Less safe abortions
    pub less: f64,
    /// Least safe abortions
    pub least: f64,
}

impl SafetyBreakdown {
    /// Add a count to a category
    pub fn add(&mut self, safety: Safety, n: f64) {
        match safety {
            Safety::Safe => self.safe += n,
            Safety::Less => self.less += n,
            Safety::Least => self.least += n,
        }
    }

    /// Count for a category
    #[must_use]
    pub const fn get(&self, safety: Safety) -> f64 {
        match safety {
            Safety::Safe => self.safe,
            Safety::Less => self.less,
            Safety::Least => self.least,
        }
    }

    /// Sum of all categories
    #[must_use]
    pub fn total(&self) -> f64 {
        self.safe + self.less + self.least
    }

    /// Category-wise sum of two breakdowns
    #[must_use]
    pub fn combined(&self, other: &Self) -> Self {
        Self {
            safe: self.safe + other.safe,
            less: self.less + other.less,
            least: self.least + other.least,
        }
    }

    /// Each category as a share of the total (0 when there are no abortions)
    #[must_use]
    pub fn shares(&self) -> Self {
        let total = self.total();
        Self {
            safe: safe_div(self.safe, total),
            less: safe_div(self.less, total),
            least: safe_div(self.least, total),
        }
    }
}

/// Final abortion, miscarriage and live birth totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbortionOutcomes {
    /// Facility abortions by safety
    pub facility: SafetyBreakdown,
    /// Out-of-facility abortions by safety
    pub out_of_facility: SafetyBreakdown,
    pub n_safe: f64,
    pub n_less_safe: f64,
    pub n_least_safe: f64,
    /// All abortions
    pub n_total_abortions: f64,
    /// Seekers without access
    pub n_no_access: f64,
    /// Seekers who arrived but received no abortion, both sectors
    pub n_no_abortion_after_arrival: f64,
    /// Seekers not obtaining an abortion for any reason
    pub n_not_obtaining_abortion: f64,
    /// Miscarriages among seekers not obtaining an abortion
    pub n_additional_miscarriage: f64,
    /// Live births among seekers not obtaining an abortion
    pub n_additional_live_birth: f64,
    /// Final miscarriage total
    pub n_miscarriage: f64,
    /// Final live birth total
    pub n_live_birth: f64,
}

/// Count of one complication across both sectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplicationCount {
    /// Complication id
    pub id: String,
    /// Severity category
    pub category: ComplicationCategory,
    /// Complications following facility abortions
    pub n_facility: f64,
    /// Complications following out-of-facility abortions
    pub n_out_of_facility: f64,
    /// All complications of this kind
    pub n: f64,
}

/// Complications of abortion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplicationsResults {
    /// Per complication, in catalog order
    pub by_complication: Vec<ComplicationCount>,
    pub n_moderate_facility: f64,
    pub n_moderate_out_of_facility: f64,
    pub n_severe_facility: f64,
    pub n_severe_out_of_facility: f64,
    /// All moderate complications
    pub n_moderate: f64,
    /// All severe complications
    pub n_severe: f64,
    /// Moderate plus severe
    pub n_total_complications: f64,
    /// Abortions the complications were drawn from
    pub n_total_abortions: f64,
    /// Abortions without complication
    pub n_no_complications: f64,
}

/// Post-abortion care for one severity category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAbortionCareSeverity {
    /// Severity category
    pub category: ComplicationCategory,
    /// Complications of this severity
    pub n_total: f64,
    /// Complications reaching a facility offering care
    pub n_with_access: f64,
    /// Complications not reaching care
    pub n_without_access: f64,
    /// Probability every required item is available
    pub effectiveness: f64,
    /// Complications receiving effective care
    pub n_receiving_effective_care: f64,
    /// Complications not receiving effective care
    pub n_not_receiving_effective_care: f64,
}

/// Post-abortion care outcomes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAbortionCareResults {
    /// Probability of reaching a facility that offers post-abortion care
    pub p_access: f64,
    /// Moderate complications
    pub moderate: PostAbortionCareSeverity,
    /// Severe complications
    pub severe: PostAbortionCareSeverity,
    /// All complications
    pub n_total_complications: f64,
    /// All complications receiving effective care
    pub n_receiving_effective_care: f64,
    /// All complications not receiving effective care
    pub n_not_receiving_effective_care: f64,
}

/// Safety subtotals derived for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetySubtotals {
    /// Facility counts
    pub facility: SafetyBreakdown,
    /// Out-of-facility counts
    pub out_of_facility: SafetyBreakdown,
    /// Both sectors
    pub total: SafetyBreakdown,
    /// Shares of all abortions
    pub total_shares: SafetyBreakdown,
}

/// Everything computed for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResults {
    /// Scenario id
    pub id: String,
    /// Scenario display name
    pub name: String,
    /// Parameters the run used
    pub resolved: ResolvedParams,
    pub family_planning: FamilyPlanningResults,
    pub demand: DemandResults,
    pub access: AccessResults,
    pub facility_receipt: ReceiptTable,
    pub out_of_facility_receipt: ReceiptTable,
    pub abortions: AbortionOutcomes,
    pub complications: ComplicationsResults,
    pub post_abortion_care: PostAbortionCareResults,
    pub safety_subtotals: SafetySubtotals,
}

/// Baseline plus scenario results, scenarios in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Results {
    /// Baseline run
    pub baseline: ScenarioResults,
    /// Scenario runs
    pub scenarios: Vec<ScenarioResults>,
}

impl Results {
    /// Look up a scenario's results by id
    #[must_use]
    pub fn scenario(&self, id: &str) -> Option<&ScenarioResults> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
