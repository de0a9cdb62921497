//! Error handling for the pathway model.
//!
//! Every failure aborts the computation of the scenario it occurred in.
//! Division by zero is not an error anywhere in the model; see
//! [`crate::utils::safe_div`].

pub mod util;

use std::io;

/// Specialized error type for the pathway model
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A proportion parameter outside [0, 1] or NaN
    #[error("Invalid proportion for '{parameter}': {value} (expected a value in [0, 1])")]
    InvalidProportion {
        /// Fully qualified parameter name
        parameter: String,
        /// Offending value
        value: f64,
    },

    /// Configuration references data that does not exist
    #[error("Missing configuration data: {0}")]
    MissingConfigData(String),

    /// A conservation check failed, signalling a logic defect upstream
    #[error("Conservation violation: {0}")]
    ConservationViolation(String),

    /// Structural problem in the input parameters
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error reading an input file
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Error decoding or encoding JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Wraps the error of a single scenario run with the scenario's id
    #[error("Scenario '{scenario}' failed: {source}")]
    ScenarioFailed {
        /// Id of the failing scenario
        scenario: String,
        /// Underlying error
        #[source]
        source: Box<ModelError>,
    },
}

impl ModelError {
    /// Create an invalid proportion error for a named parameter
    #[must_use]
    pub fn invalid_proportion(parameter: impl Into<String>, value: f64) -> Self {
        Self::InvalidProportion {
            parameter: parameter.into(),
            value,
        }
    }

    /// Create a missing configuration data error
    #[must_use]
    pub fn missing_config(message: impl Into<String>) -> Self {
        Self::MissingConfigData(message.into())
    }

    /// Create a conservation violation error
    #[must_use]
    pub fn conservation(message: impl Into<String>) -> Self {
        Self::ConservationViolation(message.into())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Attach the id of the scenario this error occurred in
    #[must_use]
    pub fn in_scenario(self, scenario: impl Into<String>) -> Self {
        Self::ScenarioFailed {
            scenario: scenario.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping scenario context
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::ScenarioFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for pathway model operations
pub type Result<T> = std::result::Result<T, ModelError>;
