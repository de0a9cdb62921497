//! Service receipt allocation
//!
//! Distributes the clients arriving in a sector across that sector's
//! services, given the readiness of the items each service needs. Two
//! models are combined:
//!
//! - [`ideal`]: a priority-ordered greedy allocation that depletes a single
//!   shared capacity pool, as a well-triaged system would.
//! - [`naive`]: a proportional allocation by each service's potential,
//!   capped at the capacity the ideal model achieves.
//!
//! The health worker item (`hw`) sets the mixture: full health worker
//! availability gives the ideal allocation, none gives the naive one, and
//! anything in between blends the two linearly.

pub mod ideal;
pub mod naive;

pub use ideal::ideal_allocation;
pub use naive::naive_allocation;

use crate::error::{ModelError, Result};
use crate::models::catalog::{ComponentCombo, Service};
use crate::models::results::{NoAbortion, ReceiptTable, ServiceReceipt};
use crate::models::types::{HEALTH_WORKER_ITEM, ReadinessMap, Sector};
use crate::utils::clamp01;

/// Probability of receipt of one service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceShare {
    /// Service id
    pub service_id: String,
    /// Probability an arriving client receives the service
    pub p: f64,
}

/// Probabilities over a sector's services plus receiving nothing
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Shares in catalog order
    pub shares: Vec<ServiceShare>,
    /// Probability of receiving no abortion
    pub no_abortion: f64,
}

impl Allocation {
    /// Total probability allocated to services
    #[must_use]
    pub fn capacity(&self) -> f64 {
        self.shares.iter().map(|s| s.p).sum()
    }

    /// Service probabilities plus the no-abortion probability
    #[must_use]
    pub fn total_probability(&self) -> f64 {
        self.capacity() + self.no_abortion
    }

    /// Linear blend `(1 - mixture) * self + mixture * other`
    ///
    /// Both allocations must come from the same service list.
    #[must_use]
    pub fn blend(&self, other: &Self, mixture: f64) -> Self {
        let shares = self
            .shares
            .iter()
            .zip(&other.shares)
            .map(|(a, b)| ServiceShare {
                service_id: a.service_id.clone(),
                p: (1.0 - mixture) * a.p + mixture * b.p,
            })
            .collect();
        Self {
            shares,
            no_abortion: (1.0 - mixture) * self.no_abortion + mixture * other.no_abortion,
        }
    }

    /// Scale to counts for the clients arriving in a sector
    #[must_use]
    pub fn into_receipt_table(self, sector: Sector, n_arriving: f64, mixture: f64) -> ReceiptTable {
        ReceiptTable {
            sector,
            n_arriving,
            mixture,
            services: self
                .shares
                .into_iter()
                .map(|share| ServiceReceipt {
                    n: n_arriving * share.p,
                    service_id: share.service_id,
                    p: share.p,
                })
                .collect(),
            no_abortion: NoAbortion {
                p: self.no_abortion,
                n: n_arriving * self.no_abortion,
            },
        }
    }
}

/// Weight of the naive allocation for a readiness map
///
/// `1 - clamp01(hw)`, treating a missing health worker item as unavailable.
#[must_use]
pub fn mixture(readiness: &ReadinessMap) -> f64 {
    1.0 - clamp01(readiness.get(HEALTH_WORKER_ITEM).unwrap_or(0.0))
}

/// Allocate the clients arriving in a sector across its services
///
/// # Arguments
/// * `services` - The sector's services in delivery priority order
/// * `readiness` - Availability of every item the services reference
/// * `sector` - Sector being allocated, used for naming and the result
/// * `n_arriving` - Clients arriving in the sector
/// * `epsilon` - Tolerance on the allocation summing to one
///
/// # Errors
/// `InvalidProportion` for a readiness value outside [0, 1],
/// `MissingConfigData` for a combo item absent from `readiness`, and
/// `ConservationViolation` when the result does not sum to one.
pub fn allocate_services(
    services: &[Service],
    readiness: &ReadinessMap,
    sector: Sector,
    n_arriving: f64,
    epsilon: f64,
) -> Result<ReceiptTable> {
    let map_name = sector.readiness_name();
    readiness.validate(map_name)?;

    let mixture = mixture(readiness);
    let allocation = if mixture <= 0.0 {
        ideal_allocation(services, readiness, map_name, epsilon)?
    } else if mixture >= 1.0 {
        naive_allocation(services, readiness, map_name, epsilon)?
    } else {
        let ideal = ideal_allocation(services, readiness, map_name, epsilon)?;
        let naive = naive::naive_with_capacity(services, readiness, map_name, ideal.capacity())?;
        ideal.blend(&naive, mixture)
    };

    let total = allocation.total_probability();
    if (total - 1.0).abs() > epsilon {
        return Err(ModelError::conservation(format!(
            "{sector} allocation sums to {total} instead of 1"
        )));
    }

    log::debug!(
        "Allocated {n_arriving} {sector} clients (mixture {mixture:.3}): capacity {:.4}, no abortion {:.4}",
        allocation.capacity(),
        allocation.no_abortion
    );

    Ok(allocation.into_receipt_table(sector, n_arriving, mixture))
}

/// Availability of a combo: the minimum over its items, floored at 0
///
/// Every item is looked up even after the minimum reaches 0, so an unknown
/// item is always reported.
pub(crate) fn combo_availability(
    combo: &ComponentCombo,
    lookup: impl Fn(&str) -> Option<f64>,
    map_name: &str,
    service_id: &str,
) -> Result<f64> {
    let mut availability = f64::INFINITY;
    for item in combo {
        let value = lookup(item).ok_or_else(|| {
            ModelError::missing_config(format!(
                "service '{service_id}' requires item '{item}' which is not present in {map_name}"
            ))
        })?;
        availability = availability.min(value);
    }
    if availability.is_finite() {
        Ok(availability.max(0.0))
    } else {
        Ok(0.0)
    }
}
