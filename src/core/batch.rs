use rayon::prelude::*;

use super::engine::run_simulation;
use super::error::EngineResult;
use super::types::{ParameterSet, SimulationResult};

/// Runs independent scenarios in parallel. Results keep the input order and
/// one invalid scenario does not affect the others.
pub fn run_scenarios(scenarios: &[ParameterSet]) -> Vec<EngineResult<SimulationResult>> {
    scenarios.par_iter().map(run_simulation).collect()
}

/// Like [`run_scenarios`], for scenarios that may already have failed to
/// load. A load error is passed through at its own index.
pub fn run_loaded_scenarios(
    scenarios: Vec<EngineResult<ParameterSet>>,
) -> Vec<EngineResult<SimulationResult>> {
    scenarios
        .into_par_iter()
        .map(|loaded| loaded.and_then(|params| run_simulation(&params)))
        .collect()
}
