//! Complications of abortion
//!
//! Applies each service's complication rates to its receipt count. Rates
//! are positional against the catalog's complication list; their count and
//! range are checked once when the catalog is built.

use crate::error::{ModelError, Result};
use crate::models::catalog::Catalog;
use crate::models::results::{AbortionOutcomes, ComplicationCount, ComplicationsResults, ReceiptTable};
use crate::models::types::{ComplicationCategory, Sector};

/// Compute complications following facility and out-of-facility abortions
///
/// # Arguments
/// * `facility_receipt` - Facility receipt table
/// * `out_of_facility_receipt` - Out-of-facility receipt table
/// * `abortions` - Aggregated abortion outcomes
/// * `catalog` - Service and complication catalog
/// * `tolerance` - How far complications may exceed abortions before failing
pub fn calculate_complications(
    facility_receipt: &ReceiptTable,
    out_of_facility_receipt: &ReceiptTable,
    abortions: &AbortionOutcomes,
    catalog: &Catalog,
    tolerance: f64,
) -> Result<ComplicationsResults> {
    let complications = catalog.complications();
    let mut results = ComplicationsResults {
        by_complication: complications
            .iter()
            .map(|c| ComplicationCount {
                id: c.id.clone(),
                category: c.category,
                n_facility: 0.0,
                n_out_of_facility: 0.0,
                n: 0.0,
            })
            .collect(),
        n_total_abortions: abortions.n_total_abortions,
        ..Default::default()
    };

    for table in [facility_receipt, out_of_facility_receipt] {
        for receipt in &table.services {
            let service = catalog.service(table.sector, &receipt.service_id)?;
            for (count, rate) in results
                .by_complication
                .iter_mut()
                .zip(&service.complication_rates)
            {
                let n_with_complication = receipt.n * rate;
                count.n += n_with_complication;
                match (table.sector, count.category) {
                    (Sector::Facility, ComplicationCategory::Moderate) => {
                        count.n_facility += n_with_complication;
                        results.n_moderate_facility += n_with_complication;
                    }
                    (Sector::Facility, ComplicationCategory::Severe) => {
                        count.n_facility += n_with_complication;
                        results.n_severe_facility += n_with_complication;
                    }
                    (Sector::OutOfFacility, ComplicationCategory::Moderate) => {
                        count.n_out_of_facility += n_with_complication;
                        results.n_moderate_out_of_facility += n_with_complication;
                    }
                    (Sector::OutOfFacility, ComplicationCategory::Severe) => {
                        count.n_out_of_facility += n_with_complication;
                        results.n_severe_out_of_facility += n_with_complication;
                    }
                }
            }
        }
    }

    results.n_moderate = results.n_moderate_facility + results.n_moderate_out_of_facility;
    results.n_severe = results.n_severe_facility + results.n_severe_out_of_facility;
    results.n_total_complications = results.n_moderate + results.n_severe;

    let n_no_complications = abortions.n_total_abortions - results.n_total_complications;
    if n_no_complications < -tolerance || n_no_complications.is_nan() {
        return Err(ModelError::conservation(format!(
            "{} complications exceed {} abortions",
            results.n_total_complications, abortions.n_total_abortions
        )));
    }
    results.n_no_complications = n_no_complications.max(0.0);

    log::debug!(
        "Complications: {:.2} moderate, {:.2} severe out of {:.1} abortions",
        results.n_moderate,
        results.n_severe,
        results.n_total_abortions
    );
    Ok(results)
}
