//! Recorded observables of a run

use crate::physics::components::Body;
use crate::physics::math::{Scalar, Vector, relative_deviation};
use serde::{Deserialize, Serialize};

/// Samples reserved up front per series; longer runs grow as they go
const PREALLOCATED_SAMPLES: usize = 1 << 16;

/// Which quantities the driver records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Observables {
    pub position: bool,
    pub velocity: bool,
    /// Per-body `(r × p)_z` plus the total over all dynamic bodies
    pub angular_momentum: bool,
}

impl Observables {
    pub const ALL: Self = Self {
        position: true,
        velocity: true,
        angular_momentum: true,
    };

    pub const ANGULAR_MOMENTUM_ONLY: Self = Self {
        position: false,
        velocity: false,
        angular_momentum: true,
    };
}

impl Default for Observables {
    fn default() -> Self {
        Self::ALL
    }
}

/// One `(time, value)` pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<T> {
    pub time: Scalar,
    pub value: T,
}

/// Ordered samples of one observable
///
/// Only the driver appends; a finished series is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<T> {
    samples: Vec<Sample<T>>,
}

impl<T: Copy> TimeSeries<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, time: Scalar, value: T) {
        self.samples.push(Sample { time, value });
    }

    pub fn samples(&self) -> &[Sample<T>] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample<T>> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample<T>> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample<T>> {
        self.samples.last()
    }

    pub fn times(&self) -> impl Iterator<Item = Scalar> + '_ {
        self.samples.iter().map(|sample| sample.time)
    }

    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.samples.iter().map(|sample| sample.value)
    }
}

impl TimeSeries<Scalar> {
    /// Largest `|x(t) - x(0)| / |x(0)|` over the series
    pub fn max_relative_drift(&self) -> Option<Scalar> {
        let reference = self.first()?.value;
        Some(
            self.values()
                .map(|value| relative_deviation(value, reference))
                .fold(0.0, Scalar::max),
        )
    }

    /// Relative drift of every sample from the first one
    pub fn relative_drift(&self) -> Vec<Sample<Scalar>> {
        let Some(reference) = self.first().map(|sample| sample.value) else {
            return Vec::new();
        };
        self.iter()
            .map(|sample| Sample {
                time: sample.time,
                value: relative_deviation(sample.value, reference),
            })
            .collect()
    }
}

/// A body's state at one sample time, for row-oriented consumers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateSample {
    pub time: Scalar,
    pub position: Option<Vector>,
    pub velocity: Option<Vector>,
    pub angular_momentum_z: Option<Scalar>,
}

/// Everything recorded for one dynamic body
#[derive(Debug, Clone, PartialEq)]
pub struct BodySeries {
    name: String,
    mass: Scalar,
    times: TimeSeries<()>,
    position: Option<TimeSeries<Vector>>,
    velocity: Option<TimeSeries<Vector>>,
    angular_momentum_z: Option<TimeSeries<Scalar>>,
}

impl BodySeries {
    pub(crate) fn new(body: &Body, observables: Observables, capacity: usize) -> Self {
        Self {
            name: body.name.clone(),
            mass: body.mass,
            times: TimeSeries::with_capacity(capacity),
            position: observables
                .position
                .then(|| TimeSeries::with_capacity(capacity)),
            velocity: observables
                .velocity
                .then(|| TimeSeries::with_capacity(capacity)),
            angular_momentum_z: observables
                .angular_momentum
                .then(|| TimeSeries::with_capacity(capacity)),
        }
    }

    pub(crate) fn record(&mut self, time: Scalar, body: &Body) {
        self.times.push(time, ());
        if let Some(series) = &mut self.position {
            series.push(time, body.position);
        }
        if let Some(series) = &mut self.velocity {
            series.push(time, body.velocity);
        }
        if let Some(series) = &mut self.angular_momentum_z {
            series.push(time, body.angular_momentum_z());
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> Scalar {
        self.mass
    }

    pub fn sample_count(&self) -> usize {
        self.times.len()
    }

    pub fn position(&self) -> Option<&TimeSeries<Vector>> {
        self.position.as_ref()
    }

    pub fn velocity(&self) -> Option<&TimeSeries<Vector>> {
        self.velocity.as_ref()
    }

    pub fn angular_momentum_z(&self) -> Option<&TimeSeries<Scalar>> {
        self.angular_momentum_z.as_ref()
    }

    /// State at sample `index`, with whichever observables were recorded
    pub fn row(&self, index: usize) -> Option<StateSample> {
        let time = self.times.samples().get(index)?.time;
        let value_at = |series: Option<&TimeSeries<Vector>>| {
            series.and_then(|s| s.samples().get(index)).map(|sample| sample.value)
        };
        Some(StateSample {
            time,
            position: value_at(self.position.as_ref()),
            velocity: value_at(self.velocity.as_ref()),
            angular_momentum_z: self
                .angular_momentum_z
                .as_ref()
                .and_then(|s| s.samples().get(index))
                .map(|sample| sample.value),
        })
    }

    /// Row view: one [`StateSample`] per recorded time
    pub fn rows(&self) -> Vec<StateSample> {
        (0..self.sample_count())
            .filter_map(|index| self.row(index))
            .collect()
    }
}

/// Divergence summary of one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub completed_steps: usize,
    pub final_time: Scalar,
    pub initial_angular_momentum_z: Option<Scalar>,
    pub final_angular_momentum_z: Option<Scalar>,
    /// Largest relative deviation of the total angular momentum from its
    /// initial value
    pub max_relative_angular_momentum_drift: Option<Scalar>,
    /// Final recorded state per body
    pub final_states: Vec<(String, StateSample)>,
}

/// Labelled output of one (scenario, step size, integrator) run
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    scenario: String,
    integrator: String,
    step_size: Scalar,
    planned_steps: usize,
    completed_steps: usize,
    bodies: Vec<BodySeries>,
    total_angular_momentum_z: Option<TimeSeries<Scalar>>,
}

impl RunRecord {
    pub(crate) fn new(
        scenario: &str,
        integrator: &str,
        step_size: Scalar,
        planned_steps: usize,
        bodies: &[Body],
        observables: Observables,
    ) -> Self {
        let capacity = planned_steps.saturating_add(1).min(PREALLOCATED_SAMPLES);
        Self {
            scenario: scenario.to_string(),
            integrator: integrator.to_string(),
            step_size,
            planned_steps,
            completed_steps: 0,
            bodies: bodies
                .iter()
                .map(|body| BodySeries::new(body, observables, capacity))
                .collect(),
            total_angular_momentum_z: observables
                .angular_momentum
                .then(|| TimeSeries::with_capacity(capacity)),
        }
    }

    /// Append one sample for every body
    pub(crate) fn record(&mut self, time: Scalar, bodies: &[Body]) {
        for (series, body) in self.bodies.iter_mut().zip(bodies) {
            series.record(time, body);
        }
        if let Some(total) = &mut self.total_angular_momentum_z {
            total.push(time, bodies.iter().map(Body::angular_momentum_z).sum());
        }
    }

    pub(crate) fn set_completed_steps(&mut self, completed_steps: usize) {
        self.completed_steps = completed_steps;
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// Canonical name of the integrator that produced the run
    pub fn integrator(&self) -> &str {
        &self.integrator
    }

    pub fn step_size(&self) -> Scalar {
        self.step_size
    }

    pub fn planned_steps(&self) -> usize {
        self.planned_steps
    }

    pub fn completed_steps(&self) -> usize {
        self.completed_steps
    }

    pub fn is_complete(&self) -> bool {
        self.completed_steps == self.planned_steps
    }

    pub fn bodies(&self) -> &[BodySeries] {
        &self.bodies
    }

    pub fn body(&self, name: &str) -> Option<&BodySeries> {
        self.bodies.iter().find(|series| series.name() == name)
    }

    pub fn total_angular_momentum_z(&self) -> Option<&TimeSeries<Scalar>> {
        self.total_angular_momentum_z.as_ref()
    }

    pub fn sample_count(&self) -> usize {
        self.bodies.first().map_or(0, BodySeries::sample_count)
    }

    pub fn summary(&self) -> RunSummary {
        let total = self.total_angular_momentum_z.as_ref();
        RunSummary {
            completed_steps: self.completed_steps,
            final_time: self.completed_steps as Scalar * self.step_size,
            initial_angular_momentum_z: total.and_then(|s| s.first()).map(|s| s.value),
            final_angular_momentum_z: total.and_then(|s| s.last()).map(|s| s.value),
            max_relative_angular_momentum_drift: total.and_then(|s| s.max_relative_drift()),
            final_states: self
                .bodies
                .iter()
                .filter_map(|series| {
                    series
                        .row(series.sample_count().checked_sub(1)?)
                        .map(|row| (series.name().to_string(), row))
                })
                .collect(),
        }
    }
}
