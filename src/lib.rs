//! A Rust library for comparing pregnancy pathway scenarios: family
//! planning, abortion demand and access, service receipt, complications
//! and post-abortion care.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::ModelConfig;
pub use error::{ModelError, Result};
pub use models::{Catalog, Parameters, Results, ScenarioParameters, ScenarioResults};

// Running the model
pub use algorithm::scenario::{ResultsSummary, ScenarioComparison, ScenarioRunner, run_model};
