//! Common domain type definitions
//!
//! Enumerations and the readiness map shared by the catalog, the parameter
//! sets and the results.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Readiness item id of the health worker, which drives the allocation mixture
pub const HEALTH_WORKER_ITEM: &str = "hw";

/// Safety classification of an abortion service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Safety {
    /// Recommended method delivered by a trained provider
    Safe,
    /// Either the method or the provider falls short
    Less,
    /// Neither method nor provider meets standards
    Least,
}

impl Safety {
    /// All safety categories in display order
    pub const ALL: [Self; 3] = [Self::Safe, Self::Less, Self::Least];

    /// Get a descriptive name for this category
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Less => "Less safe",
            Self::Least => "Least safe",
        }
    }
}

impl fmt::Display for Safety {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Severity category of an abortion complication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplicationCategory {
    /// Treatable at primary level
    Moderate,
    /// Requires comprehensive post-abortion care
    Severe,
}

impl ComplicationCategory {
    /// Get a descriptive name for this category
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }
}

impl fmt::Display for ComplicationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Care sector an abortion or service belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sector {
    /// Health facility based care
    Facility,
    /// Care obtained outside a health facility
    OutOfFacility,
}

impl Sector {
    /// Prefix used when naming parameters of this sector
    #[must_use]
    pub const fn readiness_name(self) -> &'static str {
        match self {
            Self::Facility => "facilityReadiness",
            Self::OutOfFacility => "outOfFacilityReadiness",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Facility => write!(f, "facility"),
            Self::OutOfFacility => write!(f, "out-of-facility"),
        }
    }
}

/// Availability proportion of each readiness item, keyed by item id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadinessMap(BTreeMap<String, f64>);

impl ReadinessMap {
    /// Create an empty readiness map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the availability of an item
    pub fn insert(&mut self, item: impl Into<String>, availability: f64) {
        self.0.insert(item.into(), availability);
    }

    /// Builder-style variant of [`ReadinessMap::insert`]
    #[must_use]
    pub fn with(mut self, item: impl Into<String>, availability: f64) -> Self {
        self.insert(item, availability);
        self
    }

    /// Availability of an item, if present
    #[must_use]
    pub fn get(&self, item: &str) -> Option<f64> {
        self.0.get(item).copied()
    }

    /// Availability of an item, failing when the item is unknown
    pub fn require(&self, item: &str, map_name: &str) -> Result<f64> {
        self.get(item).ok_or_else(|| {
            ModelError::missing_config(format!("item '{item}' is not present in {map_name}"))
        })
    }

    /// Iterate over `(item, availability)` pairs in item order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(item, value)| (item.as_str(), *value))
    }

    /// Validate that every availability is a proportion
    pub fn validate(&self, map_name: &str) -> Result<()> {
        for (item, value) in self.iter() {
            crate::error::util::ensure_proportion(&format!("{map_name}.{item}"), value)?;
        }
        Ok(())
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ReadinessMap {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
