//! Physical scenarios and the multi-run harness
//!
//! A [`Scenario`] is an immutable description of one physical setup: the
//! dynamic bodies, the fixed sources, which interactions are active and the
//! unit system everything is expressed in. Conversion between unit systems
//! happens exactly once, in [`Scenario::from_config`]; from then on the
//! scenario carries a single consistent `G`.

pub mod harness;
pub mod presets;

pub use harness::{Harness, HarnessReport, RunKey};
pub use presets::{Preset, SunTreatment};

use crate::config::ScenarioConfig;
use crate::error::{Result, SimulationError};
use crate::physics::components::{Body, FixedSource, SystemState};
use crate::physics::forces::{FixedSourceGravity, GravitySet, PairwiseGravity, Participant};
use crate::physics::math::{Scalar, Vector};
use crate::physics::units::{PhysicalConstants, UnitSystem};
use bevy::log::debug;
use std::collections::HashSet;

const UNNAMED_SCENARIO: &str = "custom";

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    name: String,
    units: UnitSystem,
    gravitational_constant: Scalar,
    state: SystemState,
    mutual_attraction: bool,
    min_separation: Scalar,
}

impl Scenario {
    /// Scenario from bodies and sources already expressed in `units`
    ///
    /// Dynamic bodies only feel the fixed sources until
    /// [`with_mutual_attraction`](Self::with_mutual_attraction) is set.
    pub fn new(
        name: impl Into<String>,
        units: UnitSystem,
        constants: &PhysicalConstants,
        state: SystemState,
    ) -> Result<Self> {
        Self::with_gravitational_constant(name, units, constants.gravitational_constant(units), state)
    }

    /// Scenario whose `G` is given directly in `units`
    pub fn with_gravitational_constant(
        name: impl Into<String>,
        units: UnitSystem,
        gravitational_constant: Scalar,
        state: SystemState,
    ) -> Result<Self> {
        state.validate()?;

        let mut names = HashSet::new();
        for name in state
            .bodies
            .iter()
            .map(|body| body.name.as_str())
            .chain(state.sources.iter().map(|source| source.name.as_str()))
        {
            if !names.insert(name) {
                return Err(SimulationError::invalid(format!(
                    "duplicate body name `{name}`"
                )));
            }
        }

        if !(gravitational_constant.is_finite() && gravitational_constant > 0.0) {
            return Err(SimulationError::invalid(format!(
                "gravitational constant must be positive and finite, got {gravitational_constant}"
            )));
        }

        Ok(Self {
            name: name.into(),
            units,
            gravitational_constant,
            state,
            mutual_attraction: false,
            min_separation: 0.0,
        })
    }

    /// Let the dynamic bodies attract each other as well
    pub fn with_mutual_attraction(mut self, enabled: bool) -> Self {
        self.mutual_attraction = enabled;
        self
    }

    /// Separations at or below this distance are treated as degenerate
    pub fn with_min_separation(mut self, min_separation: Scalar) -> Result<Self> {
        if !(min_separation.is_finite() && min_separation >= 0.0) {
            return Err(SimulationError::invalid(format!(
                "minimum separation must be non-negative and finite, got {min_separation}"
            )));
        }
        self.min_separation = min_separation;
        Ok(self)
    }

    /// Build a scenario from configuration, expanding presets and converting
    /// the initial conditions into the working unit system
    ///
    /// `G` is taken from the table in the input units and converted along
    /// with everything else, so the working units never change the orbit.
    pub fn from_config(config: &ScenarioConfig, constants: &PhysicalConstants) -> Result<Self> {
        let config = config.resolve(constants);
        let working_units = config.working_units.unwrap_or(config.units);
        let conversion = constants.conversion(config.units, working_units);

        let mut dimensions = None;
        let mut vector = |components: &[Scalar], what: &str| -> Result<Vector> {
            let parsed = match components {
                [x, y] => Vector::new(*x, *y, 0.0),
                [x, y, z] => Vector::new(*x, *y, *z),
                _ => {
                    return Err(SimulationError::invalid(format!(
                        "{what} has {} components; only 2 or 3 are supported",
                        components.len()
                    )));
                }
            };
            match dimensions {
                None => dimensions = Some(components.len()),
                Some(expected) if expected != components.len() => {
                    return Err(SimulationError::invalid(format!(
                        "{what} has {} components but the scenario is {expected}-dimensional",
                        components.len()
                    )));
                }
                Some(_) => {}
            }
            Ok(parsed)
        };

        let mut sources = Vec::with_capacity(config.sources.len());
        for source in &config.sources {
            let position = vector(&source.position, &format!("position of `{}`", source.name))?;
            sources.push(FixedSource::new(
                source.name.clone(),
                source.mass * conversion.mass,
                conversion.position(position),
            ));
        }

        let mut bodies = Vec::with_capacity(config.bodies.len());
        for body in &config.bodies {
            let position = vector(&body.position, &format!("position of `{}`", body.name))?;
            let velocity = vector(&body.velocity, &format!("velocity of `{}`", body.name))?;
            bodies.push(Body::new(
                body.name.clone(),
                body.mass * conversion.mass,
                conversion.position(position),
                conversion.velocity(velocity),
            ));
        }

        let name = if config.name.is_empty() {
            UNNAMED_SCENARIO.to_string()
        } else {
            config.name.clone()
        };

        if config.units != working_units {
            debug!(
                "Scenario `{}`: converted initial conditions from {} to {}",
                name, config.units, working_units
            );
        }

        Scenario::with_gravitational_constant(
            name,
            working_units,
            conversion.gravitational_constant(constants.gravitational_constant(config.units)),
            SystemState::new(bodies, sources),
        )?
        .with_mutual_attraction(config.mutual_attraction)
        .with_min_separation(config.min_separation)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit system the scenario is integrated in
    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn gravitational_constant(&self) -> Scalar {
        self.gravitational_constant
    }

    pub fn initial_state(&self) -> &SystemState {
        &self.state
    }

    pub fn bodies(&self) -> &[Body] {
        &self.state.bodies
    }

    pub fn sources(&self) -> &[FixedSource] {
        &self.state.sources
    }

    pub fn mutual_attraction(&self) -> bool {
        self.mutual_attraction
    }

    pub fn min_separation(&self) -> Scalar {
        self.min_separation
    }

    /// Acceleration field acting on the dynamic bodies
    pub fn force_model(&self) -> GravitySet {
        let mut field = GravitySet::new();

        if !self.state.sources.is_empty() {
            field = field.with(FixedSourceGravity {
                gravitational_constant: self.gravitational_constant,
                sources: self.state.sources.clone(),
                min_separation: self.min_separation,
            });
        }

        if self.mutual_attraction && self.state.bodies.len() > 1 {
            field = field.with(PairwiseGravity {
                gravitational_constant: self.gravitational_constant,
                masses: self.state.bodies.iter().map(|body| body.mass).collect(),
                min_separation: self.min_separation,
            });
        }

        field
    }

    /// Name of a body or source referred to by a force model
    pub fn participant_name(&self, participant: Participant) -> &str {
        let name = match participant {
            Participant::Body(index) => self.state.bodies.get(index).map(|body| &body.name),
            Participant::Source(index) => self.state.sources.get(index).map(|source| &source.name),
        };
        name.map_or("<unknown>", String::as_str)
    }
}
