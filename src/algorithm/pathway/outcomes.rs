//! Aggregation of service receipts into abortion, miscarriage and live
//! birth totals.

use crate::error::Result;
use crate::error::util::ensure_finite;
use crate::models::catalog::Catalog;
use crate::models::results::{
    AbortionOutcomes, AccessResults, DemandResults, ReceiptTable, SafetyBreakdown,
};
use crate::utils::split_rounded;

/// Sum a receipt table by the safety category of each service
///
/// # Errors
/// `MissingConfigData` when the table lists a service the catalog does not
/// know for that sector.
pub fn safety_breakdown(table: &ReceiptTable, catalog: &Catalog) -> Result<SafetyBreakdown> {
    let mut breakdown = SafetyBreakdown::default();
    for receipt in &table.services {
        let service = catalog.service(table.sector, &receipt.service_id)?;
        breakdown.add(service.safety, receipt.n);
    }
    Ok(breakdown)
}

/// Roll both sectors' receipts into final outcome totals
///
/// Seekers without access and seekers who arrived but received nothing do
/// not obtain an abortion; they are split into miscarriage and live birth
/// with the same rounding as the demand stage and added to its totals.
pub fn calculate_abortion_outcomes(
    demand: &DemandResults,
    access: &AccessResults,
    facility_receipt: &ReceiptTable,
    out_of_facility_receipt: &ReceiptTable,
    catalog: &Catalog,
) -> Result<AbortionOutcomes> {
    let facility = safety_breakdown(facility_receipt, catalog)?;
    let out_of_facility = safety_breakdown(out_of_facility_receipt, catalog)?;
    let total = facility.combined(&out_of_facility);

    let n_no_abortion_after_arrival =
        facility_receipt.no_abortion.n + out_of_facility_receipt.no_abortion.n;
    let n_not_obtaining_abortion = access.n_no_access + n_no_abortion_after_arrival;
    let (n_additional_miscarriage, n_additional_live_birth) =
        split_rounded(n_not_obtaining_abortion, demand.p_miscarriage);

    let outcomes = AbortionOutcomes {
        facility,
        out_of_facility,
        n_safe: total.safe,
        n_less_safe: total.less,
        n_least_safe: total.least,
        n_total_abortions: ensure_finite("total abortions", total.total())?,
        n_no_access: access.n_no_access,
        n_no_abortion_after_arrival,
        n_not_obtaining_abortion,
        n_additional_miscarriage,
        n_additional_live_birth,
        n_miscarriage: ensure_finite(
            "final miscarriages",
            demand.n_miscarriage + n_additional_miscarriage,
        )?,
        n_live_birth: ensure_finite(
            "final live births",
            demand.n_live_birth + n_additional_live_birth,
        )?,
    };
    log::debug!(
        "Abortions: {:.1} safe, {:.1} less safe, {:.1} least safe; {:.1} not obtaining an abortion",
        outcomes.n_safe,
        outcomes.n_less_safe,
        outcomes.n_least_safe,
        outcomes.n_not_obtaining_abortion
    );
    Ok(outcomes)
}
