//! Runs one integrator over one scenario and records the observables

use super::cancel::CancellationToken;
use super::series::{Observables, RunRecord};
use super::steps::StepConfiguration;
use crate::error::SimulationError;
use crate::physics::components::Body;
use crate::physics::integrators::Integrator;
use crate::physics::math::Vector;
use crate::scenarios::Scenario;
use bevy::log::{info, trace, warn};
use thiserror::Error;

/// A run that ended early, with everything recorded up to that point
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct RunFailure {
    /// Samples up to and including the last finite state
    pub partial: RunRecord,
    pub error: SimulationError,
}

pub type RunResult = std::result::Result<RunRecord, RunFailure>;

/// A single deterministic run
///
/// The driver owns a private copy of the scenario's bodies for the duration
/// of the run; the scenario itself is never modified, so the same scenario
/// can back any number of concurrent runs.
pub struct Simulation<'a> {
    scenario: &'a Scenario,
    integrator: &'a dyn Integrator,
    steps: StepConfiguration,
    observables: Observables,
    cancellation: Option<CancellationToken>,
}

impl<'a> Simulation<'a> {
    pub fn new(
        scenario: &'a Scenario,
        integrator: &'a dyn Integrator,
        steps: StepConfiguration,
    ) -> Self {
        Self {
            scenario,
            integrator,
            steps,
            observables: Observables::default(),
            cancellation: None,
        }
    }

    pub fn with_observables(mut self, observables: Observables) -> Self {
        self.observables = observables;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Integrate for the configured number of steps
    ///
    /// Sample `k` holds the state after `k` completed steps at `t = k * h`;
    /// sample 0 is the initial state.
    pub fn run(&self) -> RunResult {
        let step_size = self.steps.step_size();
        let step_count = self.steps.step_count();
        let field = self.scenario.force_model();

        let mut bodies = self.scenario.bodies().to_vec();
        let mut record = RunRecord::new(
            self.scenario.name(),
            self.integrator.name(),
            step_size,
            step_count,
            &bodies,
            self.observables,
        );
        record.record(0.0, &bodies);

        info!(
            "Starting `{}` with {} at h = {} for {} steps",
            self.scenario.name(),
            self.integrator.name(),
            step_size,
            step_count
        );

        let mut last_finite: Vec<(Vector, Vector)> = Vec::with_capacity(bodies.len());

        for step in 0..step_count {
            if self
                .cancellation
                .as_ref()
                .is_some_and(CancellationToken::is_cancelled)
            {
                warn!(
                    "Run `{}` with {} at h = {} cancelled after {} steps",
                    self.scenario.name(),
                    self.integrator.name(),
                    step_size,
                    step
                );
                return Err(self.fail(
                    record,
                    step,
                    SimulationError::Cancelled {
                        completed_steps: step,
                    },
                ));
            }

            last_finite.clear();
            last_finite.extend(bodies.iter().map(|body| (body.position, body.velocity)));

            if let Err(degenerate) = self.integrator.step(&mut bodies, &field, step_size) {
                let error = SimulationError::DegenerateGeometry {
                    step,
                    first: self.scenario.participant_name(degenerate.first).to_string(),
                    second: self.scenario.participant_name(degenerate.second).to_string(),
                    separation: degenerate.separation,
                };
                warn!(
                    "Run `{}` with {} at h = {} failed: {}",
                    self.scenario.name(),
                    self.integrator.name(),
                    step_size,
                    error
                );
                return Err(self.fail(record, step, error));
            }

            if !bodies.iter().all(Body::is_finite) {
                let last_finite_state = bodies
                    .iter()
                    .zip(&last_finite)
                    .map(|(body, (position, velocity))| Body {
                        position: *position,
                        velocity: *velocity,
                        ..body.clone()
                    })
                    .collect();
                let error = SimulationError::NumericalDivergence {
                    step,
                    time: self.steps.time_at(step),
                    last_finite_state,
                };
                warn!(
                    "Run `{}` with {} at h = {} failed: {}",
                    self.scenario.name(),
                    self.integrator.name(),
                    step_size,
                    error
                );
                return Err(self.fail(record, step, error));
            }

            let time = self.steps.time_at(step + 1);
            record.record(time, &bodies);
            trace!("t = {}: {:?}", time, bodies);
        }

        record.set_completed_steps(step_count);
        info!(
            "Finished `{}` with {} at h = {}: {} steps, max relative angular momentum drift {:e}",
            self.scenario.name(),
            self.integrator.name(),
            step_size,
            step_count,
            record
                .summary()
                .max_relative_angular_momentum_drift
                .unwrap_or(0.0)
        );
        Ok(record)
    }

    fn fail(&self, mut partial: RunRecord, completed_steps: usize, error: SimulationError) -> RunFailure {
        partial.set_completed_steps(completed_steps);
        RunFailure { partial, error }
    }
}
