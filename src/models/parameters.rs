//! Input parameter sets
//!
//! A run takes one baseline [`ScenarioParameters`] and any number of
//! scenarios. Each scenario carries a full set of values plus
//! [`Adjustments`] flags saying which categories actually override the
//! baseline.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::util::ensure_proportions;
use crate::error::{ModelError, Result};
use crate::models::types::ReadinessMap;

/// Demographic and biological rates, always taken from the baseline
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PregnancyOutcomesParameters {
    /// Empirical number of unintended pregnancies in the baseline population
    pub n_unintended_pregnancies: f64,
    /// Proportion of pregnancies ending in miscarriage
    pub p_resulting_in_miscarriage: f64,
    /// Proportion of pregnancies with a contraindication to continuing
    pub p_resulting_in_contraindication: f64,
}

impl PregnancyOutcomesParameters {
    /// Validate the count and both proportions
    pub fn validate(&self) -> Result<()> {
        if !self.n_unintended_pregnancies.is_finite() || self.n_unintended_pregnancies < 0.0 {
            return Err(ModelError::validation(format!(
                "pregnancyOutcomes.nUnintendedPregnancies must be a non-negative number, got {}",
                self.n_unintended_pregnancies
            )));
        }
        ensure_proportions(&[
            (
                "pregnancyOutcomes.pResultingInMiscarriage",
                self.p_resulting_in_miscarriage,
            ),
            (
                "pregnancyOutcomes.pResultingInContraindication",
                self.p_resulting_in_contraindication,
            ),
        ])
    }
}

/// Family planning coverage and effectiveness
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyPlanningParameters {
    /// Proportion of women with a demand for family planning
    pub p_demand_for_family_planning: f64,
    /// Proportion of that demand which is met
    pub p_met_demand_for_family_planning: f64,
    /// Combined effectiveness of the methods in use
    pub p_combined_effectiveness_of_methods: f64,
}

impl FamilyPlanningParameters {
    /// Validate all three proportions
    pub fn validate(&self) -> Result<()> {
        ensure_proportions(&[
            (
                "familyPlanning.pDemandForFamilyPlanning",
                self.p_demand_for_family_planning,
            ),
            (
                "familyPlanning.pMetDemandForFamilyPlanning",
                self.p_met_demand_for_family_planning,
            ),
            (
                "familyPlanning.pCombinedEffectivenessOfMethods",
                self.p_combined_effectiveness_of_methods,
            ),
        ])
    }
}

/// Demand for abortion among unintended pregnancies
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandParameters {
    /// Proportion of unintended pregnancies where abortion is sought
    pub p_demand_for_abortion: f64,
    /// Proportion of seekers whose first choice is a facility
    pub p_prefer_facility: f64,
}

impl DemandParameters {
    /// Validate both proportions
    pub fn validate(&self) -> Result<()> {
        ensure_proportions(&[
            ("demand.pDemandForAbortion", self.p_demand_for_abortion),
            ("demand.pPreferFacility", self.p_prefer_facility),
        ])
    }
}

/// Access barriers for facility-based care
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessFacilityParameters {
    /// Proportion for whom the law does not restrict facility abortion
    pub p_no_legal_restrictions: f64,
    /// Proportion living within reach of a facility
    pub p_within_distance: f64,
    /// Proportion able to afford facility care
    pub p_can_afford: f64,
    /// Proportion of facilities offering abortion
    pub p_facility_offers_abortion: f64,
    /// Proportion of facilities offering post-abortion care
    #[serde(rename = "pFacilityOffersPAC", alias = "pFacilityOffersPostAbortionCare")]
    pub p_facility_offers_pac: f64,
}

impl AccessFacilityParameters {
    /// Validate all proportions
    pub fn validate(&self) -> Result<()> {
        ensure_proportions(&[
            ("facilityAccess.pNoLegalRestrictions", self.p_no_legal_restrictions),
            ("facilityAccess.pWithinDistance", self.p_within_distance),
            ("facilityAccess.pCanAfford", self.p_can_afford),
            ("facilityAccess.pFacilityOffersAbortion", self.p_facility_offers_abortion),
            ("facilityAccess.pFacilityOffersPAC", self.p_facility_offers_pac),
        ])
    }
}

/// Access barriers for care outside facilities
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessOutOfFacilityParameters {
    /// Proportion within reach of an out-of-facility provider
    pub p_within_distance: f64,
    /// Proportion able to afford out-of-facility care
    pub p_can_afford: f64,
}

impl AccessOutOfFacilityParameters {
    /// Validate both proportions
    pub fn validate(&self) -> Result<()> {
        ensure_proportions(&[
            ("outOfFacilityAccess.pWithinDistance", self.p_within_distance),
            ("outOfFacilityAccess.pCanAfford", self.p_can_afford),
        ])
    }
}

/// Which parameter categories a scenario overrides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Adjustments {
    /// Override family planning parameters
    pub family_planning: bool,
    /// Override demand parameters
    pub demand: bool,
    /// Override facility access parameters
    pub facility_access: bool,
    /// Override out-of-facility access parameters
    pub out_of_facility_access: bool,
    /// Override facility readiness
    pub facility_readiness: bool,
    /// Override out-of-facility readiness
    pub out_of_facility_readiness: bool,
}

impl Adjustments {
    /// Adjustments overriding every category
    #[must_use]
    pub const fn all() -> Self {
        Self {
            family_planning: true,
            demand: true,
            facility_access: true,
            out_of_facility_access: true,
            facility_readiness: true,
            out_of_facility_readiness: true,
        }
    }

    /// Check if no category is overridden
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.family_planning
            || self.demand
            || self.facility_access
            || self.out_of_facility_access
            || self.facility_readiness
            || self.out_of_facility_readiness)
    }
}

/// A complete parameter set for the baseline or one scenario
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioParameters {
    /// Unique scenario id
    pub id: String,
    /// Display name
    pub name: String,
    /// Demographic rates; only the baseline's value is ever used
    #[serde(default)]
    pub pregnancy_outcomes: PregnancyOutcomesParameters,
    /// Family planning parameters
    pub family_planning: FamilyPlanningParameters,
    /// Demand parameters
    pub demand: DemandParameters,
    /// Facility access parameters
    pub facility_access: AccessFacilityParameters,
    /// Out-of-facility access parameters
    pub out_of_facility_access: AccessOutOfFacilityParameters,
    /// Facility readiness items
    pub facility_readiness: ReadinessMap,
    /// Out-of-facility readiness items
    pub out_of_facility_readiness: ReadinessMap,
    /// Categories this scenario overrides
    #[serde(default)]
    pub adjustments: Adjustments,
}

impl ScenarioParameters {
    /// Validate every category this parameter set would contribute
    ///
    /// For scenarios only the adjusted categories are checked, since the
    /// rest is never read.
    pub fn validate(&self, is_baseline: bool) -> Result<()> {
        let adjusted = if is_baseline {
            Adjustments::all()
        } else {
            self.adjustments
        };

        if is_baseline {
            self.pregnancy_outcomes.validate()?;
        }
        if adjusted.family_planning {
            self.family_planning.validate()?;
        }
        if adjusted.demand {
            self.demand.validate()?;
        }
        if adjusted.facility_access {
            self.facility_access.validate()?;
        }
        if adjusted.out_of_facility_access {
            self.out_of_facility_access.validate()?;
        }
        if adjusted.facility_readiness {
            self.facility_readiness.validate("facilityReadiness")?;
        }
        if adjusted.out_of_facility_readiness {
            self.out_of_facility_readiness
                .validate("outOfFacilityReadiness")?;
        }
        Ok(())
    }
}

/// Baseline plus what-if scenarios
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    /// Baseline parameter set
    pub baseline: ScenarioParameters,
    /// Scenarios, in output order
    #[serde(default)]
    pub scenarios: Vec<ScenarioParameters>,
}

impl Parameters {
    /// Parse parameters from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read parameters from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Validate the baseline, every scenario, and scenario id uniqueness
    pub fn validate(&self) -> Result<()> {
        self.baseline
            .validate(true)
            .map_err(|e| e.in_scenario(&self.baseline.id))?;

        let mut seen = FxHashSet::default();
        seen.insert(self.baseline.id.as_str());
        for scenario in &self.scenarios {
            if !seen.insert(scenario.id.as_str()) {
                return Err(ModelError::validation(format!(
                    "duplicate scenario id '{}'",
                    scenario.id
                )));
            }
            scenario
                .validate(false)
                .map_err(|e| e.in_scenario(&scenario.id))?;
        }
        Ok(())
    }
}

/// Effective parameters for one run after applying adjustment flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedParams {
    /// Baseline demographic rates
    pub pregnancy_outcomes: PregnancyOutcomesParameters,
    /// Baseline family planning, kept to anchor the intended-pregnancy count
    pub baseline_family_planning: FamilyPlanningParameters,
    /// Effective family planning parameters
    pub family_planning: FamilyPlanningParameters,
    /// Effective demand parameters
    pub demand: DemandParameters,
    /// Effective facility access parameters
    pub facility_access: AccessFacilityParameters,
    /// Effective out-of-facility access parameters
    pub out_of_facility_access: AccessOutOfFacilityParameters,
    /// Effective facility readiness
    pub facility_readiness: ReadinessMap,
    /// Effective out-of-facility readiness
    pub out_of_facility_readiness: ReadinessMap,
}
