//! Unit systems and the physical constants table
//!
//! Every scenario is integrated in exactly one [`UnitSystem`]. Initial
//! conditions given in another system are converted once, when the scenario
//! is built, using the scale factors of a [`PhysicalConstants`] table that is
//! passed around explicitly.

use crate::physics::math::{Scalar, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit convention a scenario is expressed and integrated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Metres, seconds, kilograms
    Si,
    /// Astronomical units, years, solar masses
    #[default]
    Astronomical,
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Si => write!(f, "SI (m, s, kg)"),
            UnitSystem::Astronomical => write!(f, "astronomical (AU, yr, M☉)"),
        }
    }
}

/// Process-wide physical constants, passed explicitly to whatever needs them
///
/// Overriding a field (for instance `gravitational_constant_si`) affects only
/// the scenarios built with that table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// G in m³ kg⁻¹ s⁻²
    pub gravitational_constant_si: Scalar,
    /// G in AU³ M☉⁻¹ yr⁻² (Kepler's third law gives 4π²)
    pub gravitational_constant_astronomical: Scalar,
    pub solar_mass_kg: Scalar,
    pub earth_mass_kg: Scalar,
    pub jupiter_mass_kg: Scalar,
    pub astronomical_unit_m: Scalar,
    /// Length of the year used for time conversion (365 days)
    pub year_s: Scalar,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            gravitational_constant_si: 6.67430e-11,
            gravitational_constant_astronomical: 4.0 * std::f64::consts::PI * std::f64::consts::PI,
            solar_mass_kg: 1.989e30,
            earth_mass_kg: 5.972e24,
            jupiter_mass_kg: 1.898e27,
            astronomical_unit_m: 1.496e11,
            year_s: 365.0 * 24.0 * 3600.0,
        }
    }
}

impl PhysicalConstants {
    /// Gravitational constant expressed in `units`
    pub fn gravitational_constant(&self, units: UnitSystem) -> Scalar {
        match units {
            UnitSystem::Si => self.gravitational_constant_si,
            UnitSystem::Astronomical => self.gravitational_constant_astronomical,
        }
    }

    /// Metres per length unit
    pub fn length_unit(&self, units: UnitSystem) -> Scalar {
        match units {
            UnitSystem::Si => 1.0,
            UnitSystem::Astronomical => self.astronomical_unit_m,
        }
    }

    /// Seconds per time unit
    pub fn time_unit(&self, units: UnitSystem) -> Scalar {
        match units {
            UnitSystem::Si => 1.0,
            UnitSystem::Astronomical => self.year_s,
        }
    }

    /// Kilograms per mass unit
    pub fn mass_unit(&self, units: UnitSystem) -> Scalar {
        match units {
            UnitSystem::Si => 1.0,
            UnitSystem::Astronomical => self.solar_mass_kg,
        }
    }

    /// Mass of the Sun expressed in `units`
    pub fn solar_mass(&self, units: UnitSystem) -> Scalar {
        self.solar_mass_kg / self.mass_unit(units)
    }

    /// Mass of the Earth expressed in `units`
    pub fn earth_mass(&self, units: UnitSystem) -> Scalar {
        self.earth_mass_kg / self.mass_unit(units)
    }

    /// Mass of Jupiter expressed in `units`
    pub fn jupiter_mass(&self, units: UnitSystem) -> Scalar {
        self.jupiter_mass_kg / self.mass_unit(units)
    }

    /// Factors converting values from `from` to `to`
    pub fn conversion(&self, from: UnitSystem, to: UnitSystem) -> UnitConversion {
        if from == to {
            return UnitConversion::IDENTITY;
        }
        let length = self.length_unit(from) / self.length_unit(to);
        let time = self.time_unit(from) / self.time_unit(to);
        let mass = self.mass_unit(from) / self.mass_unit(to);
        UnitConversion {
            length,
            time,
            mass,
            velocity: length / time,
        }
    }
}

/// Multiplicative scale factors between two unit systems
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConversion {
    pub length: Scalar,
    pub time: Scalar,
    pub mass: Scalar,
    pub velocity: Scalar,
}

impl UnitConversion {
    pub const IDENTITY: Self = Self {
        length: 1.0,
        time: 1.0,
        mass: 1.0,
        velocity: 1.0,
    };

    #[inline]
    pub fn position(&self, value: Vector) -> Vector {
        value * self.length
    }

    #[inline]
    pub fn velocity(&self, value: Vector) -> Vector {
        value * self.velocity
    }

    /// Rescale a gravitational constant (L³ M⁻¹ T⁻²)
    #[inline]
    pub fn gravitational_constant(&self, value: Scalar) -> Scalar {
        value * self.length * self.length * self.length / (self.mass * self.time * self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_conversion() {
        let constants = PhysicalConstants::default();
        let conversion = constants.conversion(UnitSystem::Si, UnitSystem::Si);
        assert_eq!(conversion, UnitConversion::IDENTITY);
    }

    #[test]
    fn test_si_to_astronomical_round_trip_scale() {
        let constants = PhysicalConstants::default();
        let to_au = constants.conversion(UnitSystem::Si, UnitSystem::Astronomical);
        let to_si = constants.conversion(UnitSystem::Astronomical, UnitSystem::Si);

        let position = to_au.position(Vector::new(1.496e11, 0.0, 0.0));
        assert!((position.x - 1.0).abs() < 1e-12);

        assert!((to_au.length * to_si.length - 1.0).abs() < 1e-12);
        assert!((to_au.velocity * to_si.velocity - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_earth_orbital_speed_in_both_systems() {
        // ~29.8 km/s is ~6.28 AU/yr
        let constants = PhysicalConstants::default();
        let to_au = constants.conversion(UnitSystem::Si, UnitSystem::Astronomical);
        let speed = to_au.velocity(Vector::new(0.0, 2.98e4, 0.0)).y;
        assert!((speed - 2.0 * std::f64::consts::PI).abs() < 0.05);
    }

    #[test]
    fn test_astronomical_g_consistent_with_si() {
        // G expressed through the unit scales should be close to 4π²
        let constants = PhysicalConstants::default();
        let derived = constants.gravitational_constant_si * constants.solar_mass_kg
            * constants.year_s
            * constants.year_s
            / constants.astronomical_unit_m.powi(3);
        let relative = (derived - constants.gravitational_constant(UnitSystem::Astronomical)).abs()
            / derived;
        assert!(relative < 0.01, "derived G = {derived}");
    }

    #[test]
    fn test_gravitational_constant_conversion() {
        let constants = PhysicalConstants::default();
        let to_au = constants.conversion(UnitSystem::Si, UnitSystem::Astronomical);
        let to_si = constants.conversion(UnitSystem::Astronomical, UnitSystem::Si);

        let converted = to_au.gravitational_constant(constants.gravitational_constant_si);
        let expected = constants.gravitational_constant_si * constants.solar_mass_kg
            * constants.year_s
            * constants.year_s
            / constants.astronomical_unit_m.powi(3);
        assert!((converted - expected).abs() / expected < 1e-12, "{converted} vs {expected}");

        let back = to_si.gravitational_constant(converted);
        assert!((back - constants.gravitational_constant_si).abs() / back < 1e-12);
        assert_eq!(UnitConversion::IDENTITY.gravitational_constant(4.0), 4.0);
    }

    #[test]
    fn test_masses_in_solar_units() {
        let constants = PhysicalConstants::default();
        assert_eq!(constants.solar_mass(UnitSystem::Astronomical), 1.0);
        assert!(constants.jupiter_mass(UnitSystem::Astronomical) > 9.0e-4);
        assert!(constants.earth_mass(UnitSystem::Astronomical) < 4.0e-6);
        assert_eq!(constants.earth_mass(UnitSystem::Si), 5.972e24);
    }

    #[test]
    fn test_unit_system_serializes_snake_case() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            units: UnitSystem,
        }
        let text = toml::to_string(&Wrapper {
            units: UnitSystem::Astronomical,
        })
        .unwrap();
        assert!(text.contains("\"astronomical\""));
        let parsed: Wrapper = toml::from_str("units = \"si\"").unwrap();
        assert_eq!(parsed.units, UnitSystem::Si);
    }
}
