//! End-to-end analysis: configuration to dispatch, summary and economics.

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, SiteConfig};
use crate::demand::{DemandError, EnergyDemand};
use crate::economics::EconomicsReport;
use crate::sim::controller::LoadFollowingController;
use crate::sim::engine::Engine;
use crate::sim::summary::DispatchSummary;
use crate::sim::types::DispatchResult;

/// Failure to set up an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// One or more configuration values violate their constraints.
    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ConfigError>),

    #[error(transparent)]
    Equipment(#[from] ConfigError),

    #[error("cannot load demand")]
    Demand(#[from] DemandError),
}

fn join_errors(errors: &[ConfigError]) -> String {
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    messages.join("; ")
}

/// Everything one analysis run produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub demand: EnergyDemand,
    pub engine: Engine,
    pub result: DispatchResult,
    pub summary: DispatchSummary,
    pub economics: EconomicsReport,
}

impl Analysis {
    /// Validates the configuration, builds the plant, loads demand and runs
    /// the analysis.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalysisError`] if the configuration is invalid or the
    /// demand file cannot be loaded.
    pub fn from_config(config: &SiteConfig) -> Result<Self, AnalysisError> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(AnalysisError::Invalid(errors));
        }

        let engine = Engine::new(
            config.chp()?,
            config.aux_boiler()?,
            config.thermal_storage()?,
            LoadFollowingController,
        );
        let demand = config.load_demand()?;
        info!(
            n_hours = demand.len(),
            path = %config.demand_path().display(),
            "loaded demand",
        );
        Ok(Self::run(demand, engine))
    }

    /// Dispatches the plant against the demand and prices the outcome.
    pub fn run(demand: EnergyDemand, engine: Engine) -> Self {
        let result = engine.run(demand.hours());
        let summary = DispatchSummary::from_result(&result, engine.tes().capacity);
        debug!("\n{summary}");
        let economics = EconomicsReport::calculate(
            &demand,
            engine.chp(),
            engine.boiler(),
            engine.tes(),
            &summary,
        );
        info!(
            total_savings = %economics.total_cost_savings,
            payback = %economics.simple_payback,
            "analysis finished",
        );
        Self {
            demand,
            engine,
            result,
            summary,
            economics,
        }
    }
}
