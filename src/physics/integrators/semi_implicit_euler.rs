//! Semi-implicit Euler integration method (Euler–Cromer)

use super::{Integrator, positions_of};
use crate::physics::components::Body;
use crate::physics::forces::{AccelerationField, DegenerateSeparation};
use crate::physics::math::Scalar;

/// Semi-implicit Euler integrator (also known as Euler–Cromer)
///
/// First-order method that updates velocities before positions. For a
/// central force the torque about the centre vanishes, so this form keeps
/// `(r × v)_z` constant up to rounding, unlike [`super::ExplicitEuler`].
///
/// ```text
/// v(t+dt) = v(t) + a(x(t)) * dt
/// x(t+dt) = x(t) + v(t+dt) * dt
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(
        &self,
        bodies: &mut [Body],
        field: &dyn AccelerationField,
        dt: Scalar,
    ) -> Result<(), DegenerateSeparation> {
        let accelerations = field.evaluate(&positions_of(bodies))?;

        for (body, acceleration) in bodies.iter_mut().zip(accelerations) {
            // Update velocity first: v(t+dt) = v(t) + a(t) * dt
            body.velocity += acceleration * dt;

            // Then position using the new velocity
            body.position += body.velocity * dt;
        }

        Ok(())
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "semi_implicit_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["euler_cromer", "symplectic_euler"]
    }
}
