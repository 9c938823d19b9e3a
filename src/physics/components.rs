//! State types for the bodies taking part in a scenario

use crate::error::{Result, SimulationError};
use crate::physics::math::{Scalar, Vector, angular_momentum_z};

/// A dynamic body, moved by the integrator every step
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub mass: Scalar,
    pub position: Vector,
    pub velocity: Vector,
}

impl Body {
    pub fn new(name: impl Into<String>, mass: Scalar, position: Vector, velocity: Vector) -> Self {
        Self {
            name: name.into(),
            mass,
            position,
            velocity,
        }
    }

    #[inline]
    pub fn angular_momentum_z(&self) -> Scalar {
        angular_momentum_z(self.mass, self.position, self.velocity)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// A field source that never moves (infinite-mass approximation)
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSource {
    pub name: String,
    pub mass: Scalar,
    pub position: Vector,
}

impl FixedSource {
    pub fn new(name: impl Into<String>, mass: Scalar, position: Vector) -> Self {
        Self {
            name: name.into(),
            mass,
            position,
        }
    }
}

/// Everything that takes part in one scenario
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SystemState {
    pub bodies: Vec<Body>,
    pub sources: Vec<FixedSource>,
}

impl SystemState {
    pub fn new(bodies: Vec<Body>, sources: Vec<FixedSource>) -> Self {
        Self { bodies, sources }
    }

    /// Sum of `(r × p)_z` over the dynamic bodies
    pub fn total_angular_momentum_z(&self) -> Scalar {
        self.bodies.iter().map(Body::angular_momentum_z).sum()
    }

    /// Check masses and initial vectors before anything is integrated
    pub fn validate(&self) -> Result<()> {
        if self.bodies.is_empty() {
            return Err(SimulationError::invalid(
                "a scenario needs at least one dynamic body",
            ));
        }

        for body in &self.bodies {
            if !(body.mass.is_finite() && body.mass > 0.0) {
                return Err(SimulationError::invalid(format!(
                    "body `{}` has non-positive mass {}",
                    body.name, body.mass
                )));
            }
            if !body.is_finite() {
                return Err(SimulationError::invalid(format!(
                    "body `{}` has a non-finite initial state",
                    body.name
                )));
            }
        }

        for source in &self.sources {
            if !(source.mass.is_finite() && source.mass > 0.0) {
                return Err(SimulationError::invalid(format!(
                    "source `{}` has non-positive mass {}",
                    source.name, source.mass
                )));
            }
            if !source.position.is_finite() {
                return Err(SimulationError::invalid(format!(
                    "source `{}` has a non-finite position",
                    source.name
                )));
            }
        }

        Ok(())
    }
}
