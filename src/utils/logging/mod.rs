//! Logging utilities for scenario runs and console output

pub mod console;
pub mod log;

// Re-export commonly used functions for convenience
pub use console::{print_receipt_table, print_results_summary};
pub use log::{log_load, log_scenario_complete, log_scenario_start, log_warning};
