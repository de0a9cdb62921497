//! Logging utilities
//!
//! This module provides standardized logging functions for scenario runs.

use std::path::Path;
use std::time::Duration;

/// Log a scenario start with consistent format
///
/// # Arguments
/// * `id` - Scenario id
/// * `name` - Scenario display name
pub fn log_scenario_start(id: &str, name: &str) {
    log::info!("Running scenario '{id}' ({name})");
}

/// Log a scenario completion with consistent format
///
/// # Arguments
/// * `id` - Scenario id
/// * `n_abortions` - Total abortions in the scenario's outcome
/// * `elapsed` - Time spent on the scenario
pub fn log_scenario_complete(id: &str, n_abortions: f64, elapsed: Duration) {
    log::info!("Completed scenario '{id}' with {n_abortions:.1} abortions in {elapsed:?}");
}

/// Log a file being loaded
pub fn log_load(what: &str, path: &Path) {
    log::info!("Loading {what} from {}", path.display());
}

/// Log a warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `scenario` - Optional id of the scenario the warning concerns
pub fn log_warning(message: &str, scenario: Option<&str>) {
    if let Some(id) = scenario {
        log::warn!("{id}: {message}");
    } else {
        log::warn!("{message}");
    }
}
