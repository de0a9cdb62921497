//! Proportional allocation ignoring resource contention
//!
//! Each service is scored by its best combo against the undepleted
//! readiness map, and the capacity the ideal model achieves is shared out
//! in proportion to those scores.

use super::{Allocation, ServiceShare, combo_availability, ideal_allocation};
use crate::error::Result;
use crate::models::catalog::Service;
use crate::models::types::ReadinessMap;
use crate::utils::safe_div;

/// Compute the naive allocation of a sector's services
///
/// The total probability claimed by services is capped at the capacity of
/// [`ideal_allocation`] over the same inputs.
pub fn naive_allocation(
    services: &[Service],
    readiness: &ReadinessMap,
    map_name: &str,
    epsilon: f64,
) -> Result<Allocation> {
    let ideal = ideal_allocation(services, readiness, map_name, epsilon)?;
    naive_with_capacity(services, readiness, map_name, ideal.capacity())
}

/// Naive allocation with a precomputed capacity cap
pub(crate) fn naive_with_capacity(
    services: &[Service],
    readiness: &ReadinessMap,
    map_name: &str,
    capacity: f64,
) -> Result<Allocation> {
    let scores = services
        .iter()
        .map(|service| potential_score(service, readiness, map_name))
        .collect::<Result<Vec<f64>>>()?;
    let total_score: f64 = scores.iter().sum();

    let shares: Vec<ServiceShare> = services
        .iter()
        .zip(&scores)
        .map(|(service, score)| ServiceShare {
            service_id: service.id.clone(),
            p: safe_div(*score, total_score) * capacity,
        })
        .collect();
    let claimed: f64 = shares.iter().map(|s| s.p).sum();

    Ok(Allocation {
        shares,
        no_abortion: (1.0 - claimed).max(0.0),
    })
}

/// Best availability over a service's combos, read from the original map
pub fn potential_score(service: &Service, readiness: &ReadinessMap, map_name: &str) -> Result<f64> {
    let mut best: f64 = 0.0;
    for combo in &service.component_combos {
        let available = combo_availability(combo, |item| readiness.get(item), map_name, &service.id)?;
        best = best.max(available);
    }
    Ok(best)
}
