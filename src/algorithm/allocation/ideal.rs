//! Priority-ordered greedy allocation
//!
//! Services are served in catalog order. Each combo of a service claims the
//! availability of its scarcest item, and that amount is then removed from
//! every item's remaining readiness, not only from the combo's items:
//! readiness acts as one shared pool of overall service capacity rather
//! than per-commodity stock.

use rustc_hash::FxHashMap;

use super::{Allocation, ServiceShare, combo_availability};
use crate::error::{ModelError, Result};
use crate::models::catalog::Service;
use crate::models::types::ReadinessMap;

/// Compute the ideal allocation of a sector's services
///
/// Works on a private copy of `readiness`; the caller's map is never
/// modified and nothing carries over between calls.
///
/// # Errors
/// `MissingConfigData` when a combo references an item absent from
/// `readiness`, `ConservationViolation` when services claim more than the
/// whole population (beyond `epsilon`).
pub fn ideal_allocation(
    services: &[Service],
    readiness: &ReadinessMap,
    map_name: &str,
    epsilon: f64,
) -> Result<Allocation> {
    let mut remaining: FxHashMap<&str, f64> = readiness.iter().collect();
    let mut shares = Vec::with_capacity(services.len());
    let mut allocated = 0.0;

    for service in services {
        let mut p = 0.0;
        for combo in &service.component_combos {
            let available = combo_availability(
                combo,
                |item| remaining.get(item).copied(),
                map_name,
                &service.id,
            )?;
            p += available;
            if available > 0.0 {
                for value in remaining.values_mut() {
                    *value = (*value - available).max(0.0);
                }
            }
        }
        allocated += p;
        shares.push(ServiceShare {
            service_id: service.id.clone(),
            p,
        });
    }

    let no_abortion = 1.0 - allocated;
    if no_abortion < -epsilon {
        return Err(ModelError::conservation(format!(
            "ideal allocation over {map_name} claims {allocated}, more than the whole population"
        )));
    }

    Ok(Allocation {
        shares,
        no_abortion,
    })
}
