//! Domain models for the pathway model
//!
//! Input parameters, the static catalog, and the results each pipeline
//! stage produces.

pub mod catalog;
pub mod parameters;
pub mod results;
pub mod types;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogDefinition, Complication, ComponentCombo, PostAbortionCareItems, Service};
pub use parameters::{
    AccessFacilityParameters, AccessOutOfFacilityParameters, Adjustments, DemandParameters,
    FamilyPlanningParameters, Parameters, PregnancyOutcomesParameters, ResolvedParams,
    ScenarioParameters,
};
pub use results::{
    AbortionOutcomes, AccessResults, ComplicationCount, ComplicationsResults, DemandResults,
    FamilyPlanningResults, NoAbortion, PostAbortionCareResults, PostAbortionCareSeverity,
    ReceiptTable, Results, SafetyBreakdown, SafetySubtotals, ScenarioResults, ServiceReceipt,
};
pub use types::{ComplicationCategory, HEALTH_WORKER_ITEM, ReadinessMap, Safety, Sector};
