//! Routing of abortion seekers through the access funnels
//!
//! Facility seekers who cannot reach a facility reroute to out-of-facility
//! care rather than dropping out, so the out-of-facility funnel is the only
//! place where access is lost entirely. Legal restrictions only apply to
//! facilities.

use crate::error::Result;
use crate::error::util::ensure_proportions;
use crate::models::parameters::{
    AccessFacilityParameters, AccessOutOfFacilityParameters, DemandParameters,
};
use crate::models::results::{AccessResults, DemandResults};
use crate::utils::{combine_access_barriers, round_count, safe_div};

/// Probability a facility seeker arrives at a facility offering abortion
#[must_use]
pub fn facility_arrival_probability(params: &AccessFacilityParameters) -> f64 {
    (params.p_no_legal_restrictions
        * params.p_facility_offers_abortion
        * combine_access_barriers(params.p_within_distance, params.p_can_afford))
    .min(1.0)
}

/// Probability an out-of-facility seeker reaches a provider
#[must_use]
pub fn out_of_facility_arrival_probability(params: &AccessOutOfFacilityParameters) -> f64 {
    combine_access_barriers(params.p_within_distance, params.p_can_afford).min(1.0)
}

/// Route the abortion seekers between sectors
pub fn calculate_access(
    demand_results: &DemandResults,
    demand: &DemandParameters,
    facility: &AccessFacilityParameters,
    out_of_facility: &AccessOutOfFacilityParameters,
) -> Result<AccessResults> {
    ensure_proportions(&[
        ("demand.pPreferFacility", demand.p_prefer_facility),
        ("facilityAccess.pNoLegalRestrictions", facility.p_no_legal_restrictions),
        ("facilityAccess.pWithinDistance", facility.p_within_distance),
        ("facilityAccess.pCanAfford", facility.p_can_afford),
        ("facilityAccess.pFacilityOffersAbortion", facility.p_facility_offers_abortion),
        ("outOfFacilityAccess.pWithinDistance", out_of_facility.p_within_distance),
        ("outOfFacilityAccess.pCanAfford", out_of_facility.p_can_afford),
    ])?;

    let n_seek = demand_results.n_seeks_induced_abortion;
    let n_facility_seekers = round_count(n_seek * demand.p_prefer_facility.min(1.0));
    let n_out_of_facility_first_choice = n_seek - n_facility_seekers;

    let p_facility_arrive = facility_arrival_probability(facility);
    let n_facility_arrive = round_count(n_facility_seekers * p_facility_arrive).min(n_facility_seekers);
    let n_facility_rerouted = n_facility_seekers - n_facility_arrive;

    let n_out_of_facility_pool = n_out_of_facility_first_choice + n_facility_rerouted;
    let p_out_of_facility_arrive = out_of_facility_arrival_probability(out_of_facility);
    let n_out_of_facility_arrive =
        round_count(n_out_of_facility_pool * p_out_of_facility_arrive).min(n_out_of_facility_pool);
    let n_no_access = n_out_of_facility_pool - n_out_of_facility_arrive;

    let results = AccessResults {
        n_seeks_induced_abortion: n_seek,
        n_facility_seekers,
        n_out_of_facility_first_choice,
        p_facility_arrive,
        n_facility_arrive,
        n_facility_rerouted,
        n_facility_no_access: 0.0,
        n_out_of_facility_pool,
        p_out_of_facility_arrive,
        n_out_of_facility_arrive,
        n_no_access,
        p_facility_of_seekers: safe_div(n_facility_arrive, n_seek),
        p_out_of_facility_of_seekers: safe_div(n_out_of_facility_arrive, n_seek),
        p_no_access_of_seekers: safe_div(n_no_access, n_seek),
    };
    log::debug!(
        "Access: {} reach a facility, {} reach out-of-facility care, {} without access",
        results.n_facility_arrive,
        results.n_out_of_facility_arrive,
        results.n_no_access
    );
    Ok(results)
}
