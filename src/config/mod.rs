//! Configuration for model runs.

use std::fmt;

/// Tolerance used when checking that an allocation sums to one
pub const DEFAULT_NORMALIZATION_EPSILON: f64 = 1e-9;

/// Tolerance used when reconciling counts between stages
pub const DEFAULT_CONSERVATION_TOLERANCE: f64 = 0.01;

/// Configuration for running the scenario pipeline
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Run scenarios on the rayon thread pool (output order is preserved)
    pub parallel_scenarios: bool,
    /// Tolerance for allocation normalization checks
    pub normalization_epsilon: f64,
    /// Tolerance for complication and post-abortion care reconciliation
    pub conservation_tolerance: f64,
    /// Log the output of every stage at debug level
    pub log_stage_results: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            parallel_scenarios: false,
            normalization_epsilon: DEFAULT_NORMALIZATION_EPSILON,
            conservation_tolerance: DEFAULT_CONSERVATION_TOLERANCE,
            log_stage_results: false,
        }
    }
}

impl ModelConfig {
    /// Default configuration with overrides from the environment
    ///
    /// Reads `PATHWAYS_PARALLEL` and `PATHWAYS_LOG_STAGES`; accepted values
    /// are `1`/`true`/`yes` and `0`/`false`/`no`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(parallel) = env_flag("PATHWAYS_PARALLEL") {
            config.parallel_scenarios = parallel;
        }
        if let Some(log_stages) = env_flag("PATHWAYS_LOG_STAGES") {
            config.log_stage_results = log_stages;
        }
        config
    }
}

/// Helper function to read a boolean flag from the environment
fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|value| parse_flag(&value))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl fmt::Display for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model Configuration:")?;
        writeln!(f, "  Parallel Scenarios: {}", self.parallel_scenarios)?;
        writeln!(f, "  Normalization Epsilon: {:e}", self.normalization_epsilon)?;
        writeln!(f, "  Conservation Tolerance: {}", self.conservation_tolerance)?;
        writeln!(f, "  Log Stage Results: {}", self.log_stage_results)?;
        Ok(())
    }
}
