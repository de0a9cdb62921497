//! Scenario comparison
//!
//! Orchestrates the pathway over the baseline and every scenario, and
//! summarizes the results.

pub mod comparison;
pub mod runner;
pub mod statistics;

// Re-export commonly used items
pub use comparison::{ScenarioComparison, compare_to_baseline};
pub use runner::{ScenarioRunner, derive_safety_subtotals, run_model};
pub use statistics::ResultsSummary;
