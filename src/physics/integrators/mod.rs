//! Fixed-step integration methods
//!
//! Every strategy advances all dynamic bodies of a system by exactly one
//! step of size `dt`, pulling accelerations from an [`AccelerationField`].
//! The Euler and second-order Runge–Kutta variants are kept apart as distinct
//! named strategies because they conserve angular momentum very differently.

use crate::physics::components::Body;
use crate::physics::forces::{AccelerationField, DegenerateSeparation};
use crate::physics::math::{Scalar, Vector};

pub mod explicit_euler;
pub mod registry;
pub mod runge_kutta;
pub mod semi_implicit_euler;

pub use explicit_euler::ExplicitEuler;
pub use registry::IntegratorRegistry;
pub use runge_kutta::{RungeKuttaSecondOrder, RungeKuttaSecondOrderMidpoint};
pub use semi_implicit_euler::SemiImplicitEuler;

/// Base trait for all integrators
pub trait Integrator: Send + Sync {
    /// Create a boxed clone of this integrator
    fn clone_box(&self) -> Box<dyn Integrator>;

    /// Advance every body by one time step
    ///
    /// On error the bodies may hold a partially updated state; callers that
    /// need the previous state must keep their own copy.
    ///
    /// # Arguments
    /// * `bodies` - Dynamic bodies, updated in place
    /// * `field` - Source of accelerations for the current positions
    /// * `dt` - Time step
    fn step(
        &self,
        bodies: &mut [Body],
        field: &dyn AccelerationField,
        dt: Scalar,
    ) -> Result<(), DegenerateSeparation>;

    /// Order of the global truncation error
    fn convergence_order(&self) -> usize;

    /// Canonical name used for lookup and labelling
    fn name(&self) -> &'static str;

    /// Alternative names accepted by the registry
    fn aliases(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

impl Clone for Box<dyn Integrator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl std::fmt::Debug for dyn Integrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Integrator")
            .field("name", &self.name())
            .field("order", &self.convergence_order())
            .finish()
    }
}

#[inline]
pub(crate) fn positions_of(bodies: &[Body]) -> Vec<Vector> {
    bodies.iter().map(|body| body.position).collect()
}
