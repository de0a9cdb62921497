//! Utility functions for error handling
//!
//! Guards used by the pipeline stages to fail fast on bad input and to
//! check conservation between stages.

use crate::error::{ModelError, Result};

/// Ensure a value is a proportion in [0, 1]
///
/// # Arguments
/// * `parameter` - Name reported in the error
/// * `value` - The value to check
///
/// # Returns
/// The value unchanged when valid
pub fn ensure_proportion(parameter: &str, value: f64) -> Result<f64> {
    if value.is_nan() || !(0.0..=1.0).contains(&value) {
        return Err(ModelError::invalid_proportion(parameter, value));
    }
    Ok(value)
}

/// Ensure every named value is a proportion in [0, 1]
pub fn ensure_proportions(values: &[(&str, f64)]) -> Result<()> {
    for (parameter, value) in values {
        ensure_proportion(parameter, *value)?;
    }
    Ok(())
}

/// Ensure an aggregate is a finite number
pub fn ensure_finite(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(ModelError::conservation(format!(
            "{name} is not a finite number ({value})"
        )));
    }
    Ok(value)
}

/// Ensure two totals agree within a tolerance
///
/// # Arguments
/// * `what` - Description of the reconciliation, used in the error
/// * `actual` - The reconstructed total
/// * `expected` - The total it must match
/// * `tolerance` - Maximum absolute difference
pub fn ensure_reconciles(what: &str, actual: f64, expected: f64, tolerance: f64) -> Result<()> {
    if (actual - expected).abs() > tolerance || actual.is_nan() || expected.is_nan() {
        return Err(ModelError::conservation(format!(
            "{what}: {actual} does not reconcile with {expected} (tolerance {tolerance})"
        )));
    }
    Ok(())
}
