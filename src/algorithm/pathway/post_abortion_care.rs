//! Post-abortion care for complications
//!
//! Care is always sought at a facility, whichever sector the abortion
//! happened in, so access uses the facility funnel without its legal
//! restriction factor. Effectiveness requires every item on the severity's
//! list to be available at once.

use crate::error::Result;
use crate::error::util::{ensure_proportions, ensure_reconciles};
use crate::models::catalog::PostAbortionCareItems;
use crate::models::parameters::AccessFacilityParameters;
use crate::models::results::{ComplicationsResults, PostAbortionCareResults, PostAbortionCareSeverity};
use crate::models::types::{ComplicationCategory, ReadinessMap};
use crate::utils::{combine_access_barriers, round_count};

/// Probability a complication reaches a facility offering post-abortion care
#[must_use]
pub fn post_abortion_care_access(params: &AccessFacilityParameters) -> f64 {
    (params.p_facility_offers_pac
        * combine_access_barriers(params.p_within_distance, params.p_can_afford))
    .min(1.0)
}

/// Product of readiness over the required items
pub fn care_effectiveness(items: &[String], readiness: &ReadinessMap) -> Result<f64> {
    items.iter().try_fold(1.0, |product, item| {
        Ok(product * readiness.require(item, "facilityReadiness")?)
    })
}

fn severity_care(
    category: ComplicationCategory,
    n_total: f64,
    p_access: f64,
    effectiveness: f64,
) -> PostAbortionCareSeverity {
    let n_with_access = n_total * p_access;
    let n_receiving_effective_care = round_count(n_with_access * effectiveness).min(n_total);
    PostAbortionCareSeverity {
        category,
        n_total,
        n_with_access,
        n_without_access: n_total - n_with_access,
        effectiveness,
        n_receiving_effective_care,
        n_not_receiving_effective_care: n_total - n_receiving_effective_care,
    }
}

/// Compute access to and effectiveness of post-abortion care
pub fn calculate_post_abortion_care(
    complications: &ComplicationsResults,
    facility_access: &AccessFacilityParameters,
    facility_readiness: &ReadinessMap,
    items: &PostAbortionCareItems,
    tolerance: f64,
) -> Result<PostAbortionCareResults> {
    ensure_proportions(&[
        ("facilityAccess.pFacilityOffersPAC", facility_access.p_facility_offers_pac),
        ("facilityAccess.pWithinDistance", facility_access.p_within_distance),
        ("facilityAccess.pCanAfford", facility_access.p_can_afford),
    ])?;

    let p_access = post_abortion_care_access(facility_access);
    let moderate = severity_care(
        ComplicationCategory::Moderate,
        complications.n_moderate,
        p_access,
        care_effectiveness(items.for_category(ComplicationCategory::Moderate), facility_readiness)?,
    );
    let severe = severity_care(
        ComplicationCategory::Severe,
        complications.n_severe,
        p_access,
        care_effectiveness(items.for_category(ComplicationCategory::Severe), facility_readiness)?,
    );

    let results = PostAbortionCareResults {
        p_access,
        moderate,
        severe,
        n_total_complications: complications.n_total_complications,
        n_receiving_effective_care: moderate.n_receiving_effective_care
            + severe.n_receiving_effective_care,
        n_not_receiving_effective_care: moderate.n_not_receiving_effective_care
            + severe.n_not_receiving_effective_care,
    };

    ensure_reconciles(
        "post-abortion care receiving plus not receiving",
        results.n_receiving_effective_care + results.n_not_receiving_effective_care,
        results.n_total_complications,
        tolerance,
    )?;

    log::debug!(
        "Post-abortion care: access {:.3}, {} of {:.2} complications receive effective care",
        results.p_access,
        results.n_receiving_effective_care,
        results.n_total_complications
    );
    Ok(results)
}
