//! Scenario pipeline orchestration
//!
//! Runs the pathway once for the baseline against itself and once per
//! scenario against the baseline, assembling the results in input order.

use std::time::Instant;

use rayon::prelude::*;

use crate::algorithm::pathway::{resolve_parameters, run_pathway};
use crate::config::ModelConfig;
use crate::error::Result;
use crate::models::catalog::Catalog;
use crate::models::parameters::{Parameters, ScenarioParameters};
use crate::models::results::{AbortionOutcomes, Results, SafetySubtotals, ScenarioResults};
use crate::utils::logging::{log_scenario_complete, log_scenario_start, log_warning};

/// Runs baseline and scenarios against a catalog
#[derive(Debug, Clone)]
pub struct ScenarioRunner<'a> {
    catalog: &'a Catalog,
    config: ModelConfig,
}

impl<'a> ScenarioRunner<'a> {
    /// Create a runner with the default configuration
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            config: ModelConfig::default(),
        }
    }

    /// Set the configuration
    #[must_use]
    pub fn with_config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Run the baseline and every scenario
    ///
    /// The first failing scenario fails the whole run, with the scenario's
    /// id attached to the error.
    pub fn run(&self, params: &Parameters) -> Result<Results> {
        let start = Instant::now();
        log::info!(
            "Running baseline '{}' and {} scenarios",
            params.baseline.id,
            params.scenarios.len()
        );
        params.validate()?;

        let baseline = self.run_scenario(&params.baseline, &params.baseline)?;
        let scenarios = if self.config.parallel_scenarios {
            params
                .scenarios
                .par_iter()
                .map(|scenario| self.run_scenario(&params.baseline, scenario))
                .collect::<Result<Vec<_>>>()?
        } else {
            params
                .scenarios
                .iter()
                .map(|scenario| self.run_scenario(&params.baseline, scenario))
                .collect::<Result<Vec<_>>>()?
        };

        log::info!(
            "Completed {} scenario runs in {:?}",
            scenarios.len() + 1,
            start.elapsed()
        );
        Ok(Results {
            baseline,
            scenarios,
        })
    }

    /// Run every scenario independently, keeping failures per scenario
    ///
    /// Returns the baseline result and one result per scenario in input
    /// order. Nothing is validated up front, so each scenario fails on its
    /// own bad parameters only.
    pub fn run_each(
        &self,
        params: &Parameters,
    ) -> (Result<ScenarioResults>, Vec<Result<ScenarioResults>>) {
        for scenario in &params.scenarios {
            if scenario.adjustments.is_empty() {
                log_warning(
                    "no category is adjusted, results equal the baseline",
                    Some(&scenario.id),
                );
            }
        }

        let baseline = self.run_scenario(&params.baseline, &params.baseline);
        let scenarios: Vec<_> = if self.config.parallel_scenarios {
            params
                .scenarios
                .par_iter()
                .map(|scenario| self.run_scenario(&params.baseline, scenario))
                .collect()
        } else {
            params
                .scenarios
                .iter()
                .map(|scenario| self.run_scenario(&params.baseline, scenario))
                .collect()
        };

        for (scenario, result) in params.scenarios.iter().zip(&scenarios) {
            if let Err(e) = result {
                log_warning(&format!("scenario failed: {e}"), Some(&scenario.id));
            }
        }
        (baseline, scenarios)
    }

    /// Run one scenario against the baseline
    pub fn run_scenario(
        &self,
        baseline: &ScenarioParameters,
        scenario: &ScenarioParameters,
    ) -> Result<ScenarioResults> {
        let start = Instant::now();
        log_scenario_start(&scenario.id, &scenario.name);

        let resolved = resolve_parameters(baseline, scenario);
        let outputs = run_pathway(&resolved, self.catalog, &self.config)
            .map_err(|e| e.in_scenario(&scenario.id))?;

        if self.config.log_stage_results {
            log::debug!("Scenario '{}' stage outputs: {outputs:#?}", scenario.id);
        }

        let results = ScenarioResults {
            id: scenario.id.clone(),
            name: scenario.name.clone(),
            safety_subtotals: derive_safety_subtotals(&outputs.abortions),
            resolved,
            family_planning: outputs.family_planning,
            demand: outputs.demand,
            access: outputs.access,
            facility_receipt: outputs.facility_receipt,
            out_of_facility_receipt: outputs.out_of_facility_receipt,
            abortions: outputs.abortions,
            complications: outputs.complications,
            post_abortion_care: outputs.post_abortion_care,
        };
        log_scenario_complete(&scenario.id, results.abortions.n_total_abortions, start.elapsed());
        Ok(results)
    }
}

/// Run the model with the given catalog and configuration
pub fn run_model(params: &Parameters, catalog: &Catalog, config: ModelConfig) -> Result<Results> {
    ScenarioRunner::new(catalog).with_config(config).run(params)
}

/// Facility and out-of-facility safety subtotals for display
#[must_use]
pub fn derive_safety_subtotals(abortions: &AbortionOutcomes) -> SafetySubtotals {
    let total = abortions.facility.combined(&abortions.out_of_facility);
    SafetySubtotals {
        facility: abortions.facility,
        out_of_facility: abortions.out_of_facility,
        total,
        total_shares: total.shares(),
    }
}
