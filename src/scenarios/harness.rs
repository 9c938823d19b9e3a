//! Runs one scenario at several step sizes with several integrators
//!
//! Every (step size, integrator) pair is an independent run with its own
//! step count. Failed runs stay in the report next to the successful ones.

use super::Scenario;
use crate::config::RunConfig;
use crate::error::{Result, SimulationError};
use crate::physics::integrators::{Integrator, IntegratorRegistry};
use crate::physics::math::Scalar;
use crate::simulation::{
    CancellationToken, Observables, RunResult, RunSummary, Simulation, StepConfiguration,
    StepRounding,
};
use bevy::log::info;
use rayon::prelude::*;

/// Label of one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunKey {
    pub scenario: String,
    pub step_size: Scalar,
    /// Canonical integrator name
    pub integrator: String,
}

pub struct Harness {
    steps: Vec<StepConfiguration>,
    integrators: Vec<Box<dyn Integrator>>,
    observables: Observables,
    parallel: bool,
    cancellation: Option<CancellationToken>,
}

impl Harness {
    /// Harness without integrators; add them with [`with_integrator`](Self::with_integrator)
    pub fn new(step_sizes: &[Scalar], duration: Scalar, rounding: StepRounding) -> Result<Self> {
        if step_sizes.is_empty() {
            return Err(SimulationError::invalid("at least one step size is required"));
        }

        let steps = step_sizes
            .iter()
            .map(|&step_size| StepConfiguration::with_rounding(step_size, duration, rounding))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            steps,
            integrators: Vec::new(),
            observables: Observables::default(),
            parallel: false,
            cancellation: None,
        })
    }

    /// Harness for the run settings of a configuration file
    pub fn from_config(run: &RunConfig, registry: &IntegratorRegistry) -> Result<Self> {
        if run.integrators.is_empty() {
            return Err(SimulationError::invalid("at least one integrator is required"));
        }

        let mut harness = Self::new(&run.step_sizes, run.duration, run.rounding)?
            .with_observables(run.observables)
            .parallel(run.parallel);
        for name in &run.integrators {
            harness = harness.with_integrator(registry.create(name)?);
        }
        Ok(harness)
    }

    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.integrators.push(integrator);
        self
    }

    pub fn with_observables(mut self, observables: Observables) -> Self {
        self.observables = observables;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn step_configurations(&self) -> &[StepConfiguration] {
        &self.steps
    }

    pub fn integrators(&self) -> &[Box<dyn Integrator>] {
        &self.integrators
    }

    /// Run every (step size, integrator) pair, ordered by step size first
    pub fn run(&self, scenario: &Scenario) -> HarnessReport {
        let jobs: Vec<(&StepConfiguration, &dyn Integrator)> = self
            .steps
            .iter()
            .flat_map(|steps| {
                self.integrators
                    .iter()
                    .map(move |integrator| (steps, integrator.as_ref()))
            })
            .collect();

        info!(
            "Running scenario `{}`: {} step sizes x {} integrators{}",
            scenario.name(),
            self.steps.len(),
            self.integrators.len(),
            if self.parallel { " in parallel" } else { "" }
        );

        let run_one = |(steps, integrator): &(&StepConfiguration, &dyn Integrator)| {
            let key = RunKey {
                scenario: scenario.name().to_string(),
                step_size: steps.step_size(),
                integrator: integrator.name().to_string(),
            };
            let mut simulation = Simulation::new(scenario, *integrator, **steps)
                .with_observables(self.observables);
            if let Some(token) = &self.cancellation {
                simulation = simulation.with_cancellation(token.clone());
            }
            (key, simulation.run())
        };

        // Indexed parallel iterators keep the job order when collecting
        let entries: Vec<(RunKey, RunResult)> = if self.parallel {
            jobs.par_iter().map(run_one).collect()
        } else {
            jobs.iter().map(run_one).collect()
        };

        let failed = entries.iter().filter(|(_, result)| result.is_err()).count();
        info!(
            "Scenario `{}` done: {} of {} runs completed",
            scenario.name(),
            entries.len() - failed,
            entries.len()
        );

        HarnessReport { entries }
    }

    /// Run several scenarios one after another into a single report
    pub fn run_all<'s>(&self, scenarios: impl IntoIterator<Item = &'s Scenario>) -> HarnessReport {
        let entries = scenarios
            .into_iter()
            .flat_map(|scenario| self.run(scenario).entries)
            .collect();
        HarnessReport { entries }
    }
}

/// Results keyed by (scenario, step size, integrator), in run order
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessReport {
    entries: Vec<(RunKey, RunResult)>,
}

impl HarnessReport {
    pub fn entries(&self) -> &[(RunKey, RunResult)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Result for a step size and canonical integrator name
    ///
    /// Step sizes are compared exactly, as configured. In a report from
    /// [`Harness::run_all`] this returns the first scenario's run; use
    /// [`get_in`](Self::get_in) to pick the scenario.
    pub fn get(&self, step_size: Scalar, integrator: &str) -> Option<&RunResult> {
        self.find(|key| key.step_size == step_size && key.integrator == integrator)
    }

    /// Result for a scenario, step size and canonical integrator name
    pub fn get_in(&self, scenario: &str, step_size: Scalar, integrator: &str) -> Option<&RunResult> {
        self.find(|key| {
            key.scenario == scenario && key.step_size == step_size && key.integrator == integrator
        })
    }

    fn find(&self, matches: impl Fn(&RunKey) -> bool) -> Option<&RunResult> {
        self.entries
            .iter()
            .find(|(key, _)| matches(key))
            .map(|(_, result)| result)
    }

    pub fn successes(&self) -> impl Iterator<Item = (&RunKey, &crate::simulation::RunRecord)> {
        self.entries
            .iter()
            .filter_map(|(key, result)| result.as_ref().ok().map(|record| (key, record)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&RunKey, &crate::simulation::RunFailure)> {
        self.entries
            .iter()
            .filter_map(|(key, result)| result.as_ref().err().map(|failure| (key, failure)))
    }

    /// Divergence summary per run, failed runs summarised up to the failure
    pub fn summaries(&self) -> Vec<(RunKey, RunSummary)> {
        self.entries
            .iter()
            .map(|(key, result)| {
                let record = match result {
                    Ok(record) => record,
                    Err(failure) => &failure.partial,
                };
                (key.clone(), record.summary())
            })
            .collect()
    }
}
