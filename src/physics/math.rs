/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 3D vector type for positions, velocities, and accelerations
///
/// Planar scenarios use the same type with `z = 0`.
pub type Vector = bevy::math::DVec3;

/// z-component of the angular momentum `r × (m v)` about the origin
#[inline]
pub fn angular_momentum_z(mass: Scalar, position: Vector, velocity: Vector) -> Scalar {
    mass * (position.x * velocity.y - position.y * velocity.x)
}

/// Speed of a circular orbit of radius `radius` around a central mass
/// with gravitational parameter `mu = G * M`
#[inline]
pub fn circular_orbit_speed(mu: Scalar, radius: Scalar) -> Scalar {
    libm::sqrt(mu / radius)
}

/// Point at `radius` on a circle in the xy-plane, `angle` radians from +x
#[inline]
pub fn polar_to_cartesian(radius: Scalar, angle: Scalar) -> Vector {
    Vector::new(radius * libm::cos(angle), radius * libm::sin(angle), 0.0)
}

/// Unit vector perpendicular to `angle` in the xy-plane, pointing in the
/// counter-clockwise (prograde) direction
#[inline]
pub fn prograde_direction(angle: Scalar) -> Vector {
    Vector::new(-libm::sin(angle), libm::cos(angle), 0.0)
}

/// Relative deviation of `value` from `reference`
///
/// Falls back to the absolute deviation when the reference is zero.
#[inline]
pub fn relative_deviation(value: Scalar, reference: Scalar) -> Scalar {
    let deviation = (value - reference).abs();
    if reference == 0.0 {
        deviation
    } else {
        deviation / reference.abs()
    }
}
