//! The per-scenario calculation pipeline
//!
//! Stages run strictly in order, each consuming the outputs of the ones
//! before it:
//!
//! family planning → demand → access → service receipt (facility and
//! out-of-facility) → abortion outcomes → complications → post-abortion care

pub mod access;
pub mod complications;
pub mod demand;
pub mod family_planning;
pub mod outcomes;
pub mod post_abortion_care;
pub mod resolver;

// Re-export commonly used items
pub use access::calculate_access;
pub use complications::calculate_complications;
pub use demand::calculate_demand;
pub use family_planning::{calculate_family_planning, proportion_unintended};
pub use outcomes::{calculate_abortion_outcomes, safety_breakdown};
pub use post_abortion_care::calculate_post_abortion_care;
pub use resolver::resolve_parameters;

use crate::algorithm::allocation::allocate_services;
use crate::config::ModelConfig;
use crate::error::Result;
use crate::models::catalog::Catalog;
use crate::models::parameters::ResolvedParams;
use crate::models::results::{
    AbortionOutcomes, AccessResults, ComplicationsResults, DemandResults, FamilyPlanningResults,
    PostAbortionCareResults, ReceiptTable,
};
use crate::models::types::Sector;

/// Outputs of every stage for one run
#[derive(Debug, Clone, PartialEq)]
pub struct PathwayOutputs {
    pub family_planning: FamilyPlanningResults,
    pub demand: DemandResults,
    pub access: AccessResults,
    pub facility_receipt: ReceiptTable,
    pub out_of_facility_receipt: ReceiptTable,
    pub abortions: AbortionOutcomes,
    pub complications: ComplicationsResults,
    pub post_abortion_care: PostAbortionCareResults,
}

/// Run every stage on one set of resolved parameters
///
/// # Errors
/// The first stage failure aborts the run; there are no partial results.
pub fn run_pathway(
    params: &ResolvedParams,
    catalog: &Catalog,
    config: &ModelConfig,
) -> Result<PathwayOutputs> {
    let family_planning = calculate_family_planning(
        &params.pregnancy_outcomes,
        &params.baseline_family_planning,
        &params.family_planning,
    )?;
    let demand = calculate_demand(&family_planning, &params.pregnancy_outcomes, &params.demand)?;
    let access = calculate_access(
        &demand,
        &params.demand,
        &params.facility_access,
        &params.out_of_facility_access,
    )?;

    let facility_receipt = allocate_services(
        catalog.services(Sector::Facility),
        &params.facility_readiness,
        Sector::Facility,
        access.n_facility_arrive,
        config.normalization_epsilon,
    )?;
    let out_of_facility_receipt = allocate_services(
        catalog.services(Sector::OutOfFacility),
        &params.out_of_facility_readiness,
        Sector::OutOfFacility,
        access.n_out_of_facility_arrive,
        config.normalization_epsilon,
    )?;

    let abortions = calculate_abortion_outcomes(
        &demand,
        &access,
        &facility_receipt,
        &out_of_facility_receipt,
        catalog,
    )?;
    let complications = calculate_complications(
        &facility_receipt,
        &out_of_facility_receipt,
        &abortions,
        catalog,
        config.conservation_tolerance,
    )?;
    let post_abortion_care = calculate_post_abortion_care(
        &complications,
        &params.facility_access,
        &params.facility_readiness,
        catalog.post_abortion_care_items(),
        config.conservation_tolerance,
    )?;

    Ok(PathwayOutputs {
        family_planning,
        demand,
        access,
        facility_receipt,
        out_of_facility_receipt,
        abortions,
        complications,
        post_abortion_care,
    })
}
