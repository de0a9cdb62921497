//! Static service and complication catalog
//!
//! The catalog is configuration: ordered service lists per sector, the
//! global complication list, and the readiness items that post-abortion
//! care depends on. It is validated once when constructed, so the pipeline
//! can rely on complication rates lining up with the complication list.

use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::util::ensure_proportion;
use crate::error::{ModelError, Result};
use crate::models::types::{ComplicationCategory, Safety, Sector};

/// One viable bundle of readiness items that together deliver a service
pub type ComponentCombo = SmallVec<[String; 4]>;

/// An abortion service offered in one sector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Unique id within the sector
    pub id: String,
    /// Display label
    pub label: String,
    /// Safety classification
    pub safety: Safety,
    /// Alternative item bundles, any of which can deliver the service
    pub component_combos: Vec<ComponentCombo>,
    /// Complication rates, positionally aligned with the complication list
    pub complication_rates: Vec<f64>,
}

/// A complication of abortion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complication {
    /// Unique id
    pub id: String,
    /// Display label
    pub label: String,
    /// Severity category
    pub category: ComplicationCategory,
}

/// Facility readiness items required for effective post-abortion care
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAbortionCareItems {
    /// Items needed to treat moderate complications
    pub moderate: Vec<String>,
    /// Items needed to treat severe complications
    pub severe: Vec<String>,
}

impl PostAbortionCareItems {
    /// Items for a severity category
    #[must_use]
    pub fn for_category(&self, category: ComplicationCategory) -> &[String] {
        match category {
            ComplicationCategory::Moderate => &self.moderate,
            ComplicationCategory::Severe => &self.severe,
        }
    }
}

/// Serialized form of a [`Catalog`], before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDefinition {
    /// Facility services in delivery priority order
    pub facility_services: Vec<Service>,
    /// Out-of-facility services in delivery priority order
    pub out_of_facility_services: Vec<Service>,
    /// Global ordered complication list
    pub complications: Vec<Complication>,
    /// Post-abortion care readiness items
    pub post_abortion_care_items: PostAbortionCareItems,
}

/// Validated catalog with id lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CatalogDefinition", into = "CatalogDefinition")]
pub struct Catalog {
    definition: CatalogDefinition,
    facility_index: FxHashMap<String, usize>,
    out_of_facility_index: FxHashMap<String, usize>,
}

impl Catalog {
    /// Validate a definition and build the lookup indices
    pub fn new(definition: CatalogDefinition) -> Result<Self> {
        check_unique(
            definition.complications.iter().map(|c| c.id.as_str()),
            "complications",
        )?;
        check_unique(
            definition.facility_services.iter().map(|s| s.id.as_str()),
            "facilityServices",
        )?;
        check_unique(
            definition
                .out_of_facility_services
                .iter()
                .map(|s| s.id.as_str()),
            "outOfFacilityServices",
        )?;

        let n_complications = definition.complications.len();
        for (sector, services) in [
            (Sector::Facility, &definition.facility_services),
            (Sector::OutOfFacility, &definition.out_of_facility_services),
        ] {
            for service in services {
                validate_service(service, sector, n_complications)?;
            }
        }

        log::debug!(
            "Catalog loaded: {} facility services, {} out-of-facility services, {} complications",
            definition.facility_services.len(),
            definition.out_of_facility_services.len(),
            n_complications
        );

        Ok(Self {
            facility_index: index_positions(definition.facility_services.iter().map(|s| &s.id)),
            out_of_facility_index: index_positions(
                definition.out_of_facility_services.iter().map(|s| &s.id),
            ),
            definition,
        })
    }

    /// Parse and validate a catalog from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let definition: CatalogDefinition = serde_json::from_str(json)?;
        Self::new(definition)
    }

    /// Read and validate a catalog from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Ordered services of a sector
    #[must_use]
    pub fn services(&self, sector: Sector) -> &[Service] {
        match sector {
            Sector::Facility => &self.definition.facility_services,
            Sector::OutOfFacility => &self.definition.out_of_facility_services,
        }
    }

    /// Look up a service of a sector by id
    pub fn service(&self, sector: Sector, id: &str) -> Result<&Service> {
        let index = match sector {
            Sector::Facility => &self.facility_index,
            Sector::OutOfFacility => &self.out_of_facility_index,
        };
        index
            .get(id)
            .map(|&i| &self.services(sector)[i])
            .ok_or_else(|| {
                ModelError::missing_config(format!("{sector} service '{id}' is not in the catalog"))
            })
    }

    /// Global ordered complication list
    #[must_use]
    pub fn complications(&self) -> &[Complication] {
        &self.definition.complications
    }

    /// Readiness items for post-abortion care
    #[must_use]
    pub fn post_abortion_care_items(&self) -> &PostAbortionCareItems {
        &self.definition.post_abortion_care_items
    }

    /// Every readiness item id referenced by a sector's services
    #[must_use]
    pub fn referenced_items(&self, sector: Sector) -> Vec<&str> {
        let mut items: Vec<&str> = self
            .services(sector)
            .iter()
            .flat_map(|s| s.component_combos.iter().flatten())
            .map(String::as_str)
            .collect();
        items.sort_unstable();
        items.dedup();
        items
    }

    /// The built-in catalog used when no catalog file is supplied
    ///
    /// Goes through the same validation as a loaded catalog.
    pub fn standard() -> Result<Self> {
        Self::new(standard_definition())
    }
}

impl TryFrom<CatalogDefinition> for Catalog {
    type Error = ModelError;

    fn try_from(definition: CatalogDefinition) -> Result<Self> {
        Self::new(definition)
    }
}

impl From<Catalog> for CatalogDefinition {
    fn from(catalog: Catalog) -> Self {
        catalog.definition
    }
}

fn check_unique<'a>(ids: impl Iterator<Item = &'a str>, list_name: &str) -> Result<()> {
    let mut seen = FxHashSet::default();
    for id in ids {
        if !seen.insert(id) {
            return Err(ModelError::validation(format!(
                "duplicate id '{id}' in {list_name}"
            )));
        }
    }
    Ok(())
}

fn index_positions<'a>(ids: impl Iterator<Item = &'a String>) -> FxHashMap<String, usize> {
    ids.enumerate().map(|(i, id)| (id.clone(), i)).collect()
}

fn validate_service(service: &Service, sector: Sector, n_complications: usize) -> Result<()> {
    if service.complication_rates.len() != n_complications {
        return Err(ModelError::missing_config(format!(
            "{sector} service '{}' has {} complication rates but the catalog lists {} complications",
            service.id,
            service.complication_rates.len(),
            n_complications
        )));
    }
    for (position, rate) in service.complication_rates.iter().enumerate() {
        ensure_proportion(
            &format!("services.{}.complicationRates[{position}]", service.id),
            *rate,
        )?;
    }
    let total_rate: f64 = service.complication_rates.iter().sum();
    if total_rate > 1.0 + 1e-9 {
        return Err(ModelError::validation(format!(
            "{sector} service '{}' has complication rates summing to {total_rate}",
            service.id
        )));
    }

    let mut seen = FxHashSet::default();
    for combo in &service.component_combos {
        if combo.is_empty() {
            return Err(ModelError::missing_config(format!(
                "{sector} service '{}' has an empty component combo",
                service.id
            )));
        }
        seen.clear();
        for item in combo {
            if !seen.insert(item.as_str()) {
                return Err(ModelError::validation(format!(
                    "{sector} service '{}' lists item '{item}' twice in one combo",
                    service.id
                )));
            }
        }
    }
    Ok(())
}

fn service(
    id: &str,
    label: &str,
    safety: Safety,
    component_combos: Vec<ComponentCombo>,
    complication_rates: [f64; 5],
) -> Service {
    Service {
        id: id.to_string(),
        label: label.to_string(),
        safety,
        component_combos,
        complication_rates: complication_rates.to_vec(),
    }
}

fn complication(id: &str, label: &str, category: ComplicationCategory) -> Complication {
    Complication {
        id: id.to_string(),
        label: label.to_string(),
        category,
    }
}

fn combo(items: &[&str]) -> ComponentCombo {
    items.iter().map(|item| (*item).to_string()).collect()
}

fn items(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| (*id).to_string()).collect()
}

// Complication order: incomplete, infection, haemorrhage, sepsis, perforation
fn standard_definition() -> CatalogDefinition {
    CatalogDefinition {
        facility_services: vec![
            service(
                "facility-vacuum-aspiration",
                "Vacuum aspiration",
                Safety::Safe,
                vec![combo(&["hw", "mva"]), combo(&["hw", "eva"])],
                [0.010, 0.005, 0.002, 0.001, 0.0005],
            ),
            service(
                "facility-medical-combined",
                "Medical abortion (mifepristone and misoprostol)",
                Safety::Safe,
                vec![combo(&["hw", "mife", "miso"])],
                [0.030, 0.005, 0.003, 0.001, 0.0],
            ),
            service(
                "facility-medical-miso",
                "Medical abortion (misoprostol only)",
                Safety::Safe,
                vec![combo(&["hw", "miso"])],
                [0.050, 0.005, 0.004, 0.001, 0.0],
            ),
            service(
                "facility-dilatation-curettage",
                "Dilatation and curettage",
                Safety::Less,
                vec![combo(&["hw", "dc"])],
                [0.030, 0.020, 0.010, 0.005, 0.003],
            ),
        ],
        out_of_facility_services: vec![
            service(
                "oof-medical-informed",
                "Medical abortion with accurate information",
                Safety::Safe,
                vec![combo(&["hw", "mife", "miso"]), combo(&["hw", "miso"])],
                [0.040, 0.010, 0.005, 0.002, 0.0],
            ),
            service(
                "oof-medical-uninformed",
                "Medical abortion without accurate information",
                Safety::Less,
                vec![combo(&["miso"])],
                [0.080, 0.020, 0.010, 0.005, 0.0],
            ),
            service(
                "oof-invasive",
                "Invasive or ingested methods",
                Safety::Least,
                vec![combo(&["traditional"])],
                [0.150, 0.100, 0.080, 0.050, 0.030],
            ),
        ],
        complications: vec![
            complication("incomplete", "Incomplete abortion", ComplicationCategory::Moderate),
            complication("infection", "Infection", ComplicationCategory::Moderate),
            complication("haemorrhage", "Haemorrhage", ComplicationCategory::Severe),
            complication("sepsis", "Sepsis", ComplicationCategory::Severe),
            complication("perforation", "Uterine perforation", ComplicationCategory::Severe),
        ],
        post_abortion_care_items: PostAbortionCareItems {
            moderate: items(&["hw", "miso", "antibiotics"]),
            severe: items(&["hw", "antibiotics", "iv_fluids", "blood", "theatre"]),
        },
    }
}
