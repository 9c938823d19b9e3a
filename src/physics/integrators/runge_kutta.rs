//! Second-order Runge–Kutta integration methods

use super::{Integrator, positions_of};
use crate::physics::components::Body;
use crate::physics::forces::{AccelerationField, DegenerateSeparation};
use crate::physics::math::{Scalar, Vector};

/// Two-stage second-order Runge–Kutta method (`rk2`)
///
/// This is NOT the midpoint method found in the literature. The second
/// position increment uses the Euler-predicted velocity and the second
/// acceleration is taken at the full-step Euler position, then both stages
/// are averaged:
///
/// ```text
/// k1_v = h * a(r)
/// k1_r = h * v
/// k2_r = h * (v + k1_v)
/// k2_v = h * a(r + k1_r)
/// r_new = r + (k1_r + k2_r) / 2
/// v_new = v + (k1_v + k2_v) / 2
/// ```
///
/// The formula is kept exactly as written. For the textbook variant use
/// [`RungeKuttaSecondOrderMidpoint`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKuttaSecondOrder;

impl Integrator for RungeKuttaSecondOrder {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(
        &self,
        bodies: &mut [Body],
        field: &dyn AccelerationField,
        dt: Scalar,
    ) -> Result<(), DegenerateSeparation> {
        let positions = positions_of(bodies);

        // Stage 1: at the current state
        let k1_v: Vec<Vector> = field
            .evaluate(&positions)?
            .into_iter()
            .map(|acceleration| acceleration * dt)
            .collect();
        let k1_r: Vec<Vector> = bodies.iter().map(|body| body.velocity * dt).collect();

        // Stage 2: Euler-predicted velocity, acceleration at r + k1_r
        let k2_r: Vec<Vector> = bodies
            .iter()
            .zip(&k1_v)
            .map(|(body, dv)| (body.velocity + *dv) * dt)
            .collect();
        let predicted: Vec<Vector> = positions.iter().zip(&k1_r).map(|(r, dr)| *r + *dr).collect();
        let k2_v: Vec<Vector> = field
            .evaluate(&predicted)?
            .into_iter()
            .map(|acceleration| acceleration * dt)
            .collect();

        for (i, body) in bodies.iter_mut().enumerate() {
            body.position += 0.5 * (k1_r[i] + k2_r[i]);
            body.velocity += 0.5 * (k1_v[i] + k2_v[i]);
        }

        Ok(())
    }

    fn convergence_order(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "runge_kutta_second_order"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["rk2"]
    }
}

/// Second-order Runge–Kutta method (midpoint method)
///
/// The textbook form, evaluating the derivative at the midpoint of the
/// step:
///
/// ```text
/// r_mid = r + v * h/2
/// v_mid = v + a(r) * h/2
/// r_new = r + v_mid * h
/// v_new = v + a(r_mid) * h
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKuttaSecondOrderMidpoint;

impl Integrator for RungeKuttaSecondOrderMidpoint {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(
        &self,
        bodies: &mut [Body],
        field: &dyn AccelerationField,
        dt: Scalar,
    ) -> Result<(), DegenerateSeparation> {
        let half_dt = 0.5 * dt;
        let accelerations = field.evaluate(&positions_of(bodies))?;

        let midpoint_positions: Vec<Vector> = bodies
            .iter()
            .map(|body| body.position + body.velocity * half_dt)
            .collect();
        let midpoint_velocities: Vec<Vector> = bodies
            .iter()
            .zip(&accelerations)
            .map(|(body, acceleration)| body.velocity + *acceleration * half_dt)
            .collect();
        let midpoint_accelerations = field.evaluate(&midpoint_positions)?;

        for ((body, velocity), acceleration) in bodies
            .iter_mut()
            .zip(midpoint_velocities)
            .zip(midpoint_accelerations)
        {
            body.position += velocity * dt;
            body.velocity += acceleration * dt;
        }

        Ok(())
    }

    fn convergence_order(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "runge_kutta_second_order_midpoint"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["midpoint", "rk2_midpoint"]
    }
}
