//! Explicit Euler integration method (forward Euler)
//!
//! Provided for comparison. On a circular orbit the angular momentum grows
//! by a factor `1 + h² GM / r³` every step, so the orbit spirals outward.

use super::{Integrator, positions_of};
use crate::physics::components::Body;
use crate::physics::forces::{AccelerationField, DegenerateSeparation};
use crate::physics::math::Scalar;

/// Explicit Euler integrator (forward Euler method)
///
/// Position and velocity are both advanced from the state at the start of
/// the step:
///
/// ```text
/// a(t)     = a(x(t))
/// x(t+dt)  = x(t) + v(t) * dt
/// v(t+dt)  = v(t) + a(t) * dt
/// ```
///
/// # Mathematical Properties
///
/// - **Order of accuracy**: first order
/// - **Force evaluations**: 1 per timestep
/// - **Symplectic**: No
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(
        &self,
        bodies: &mut [Body],
        field: &dyn AccelerationField,
        dt: Scalar,
    ) -> Result<(), DegenerateSeparation> {
        // Acceleration at the ORIGINAL positions
        let accelerations = field.evaluate(&positions_of(bodies))?;

        for (body, acceleration) in bodies.iter_mut().zip(accelerations) {
            // Position first, using the CURRENT velocity
            body.position += body.velocity * dt;
            body.velocity += acceleration * dt;
        }

        Ok(())
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "explicit_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["forward_euler"]
    }
}
