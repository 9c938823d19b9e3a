//! Built-in Sun–Earth(–Jupiter) scenarios

use super::Scenario;
use crate::config::{BodyConfig, ScenarioConfig, SourceConfig};
use crate::error::Result;
use crate::physics::math::{Scalar, Vector, circular_orbit_speed, polar_to_cartesian, prograde_direction};
use crate::physics::units::{PhysicalConstants, UnitSystem};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Earth's perihelion distance in metres
pub const PERIHELION_DISTANCE_M: Scalar = 1.4710e11;
/// Earth's orbital speed at perihelion in metres per second
pub const PERIHELION_SPEED_M_PER_S: Scalar = 3.0287e4;
/// Radius of Jupiter's (circularised) orbit in AU
pub const JUPITER_ORBIT_RADIUS_AU: Scalar = 5.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Earth on a circular 1 AU orbit
    SunEarth,
    /// Earth starting at perihelion, initial conditions in SI units
    SunEarthPerihelion,
    /// Earth at 1 AU and Jupiter at 5.2 AU on opposite sides of the Sun
    SunEarthJupiter,
}

/// Whether the Sun is pinned at the origin or integrated like the others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SunTreatment {
    #[default]
    Fixed,
    Dynamic,
}

impl Preset {
    pub const ALL: [Preset; 3] = [
        Preset::SunEarth,
        Preset::SunEarthPerihelion,
        Preset::SunEarthJupiter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::SunEarth => "sun_earth",
            Preset::SunEarthPerihelion => "sun_earth_perihelion",
            Preset::SunEarthJupiter => "sun_earth_jupiter",
        }
    }

    /// Fully explicit configuration for this preset
    pub fn scenario_config(&self, constants: &PhysicalConstants, sun: SunTreatment) -> ScenarioConfig {
        let (units, working_units, planets) = match self {
            Preset::SunEarth => {
                let units = UnitSystem::Astronomical;
                (units, None, vec![circular_planet("Earth", constants.earth_mass(units), 1.0, 0.0, constants)])
            }
            Preset::SunEarthPerihelion => {
                let units = UnitSystem::Si;
                let earth = BodyConfig {
                    name: "Earth".into(),
                    mass: constants.earth_mass(units),
                    position: vec![PERIHELION_DISTANCE_M, 0.0],
                    velocity: vec![0.0, PERIHELION_SPEED_M_PER_S],
                };
                (units, Some(UnitSystem::Astronomical), vec![earth])
            }
            Preset::SunEarthJupiter => {
                let units = UnitSystem::Astronomical;
                (
                    units,
                    None,
                    vec![
                        circular_planet("Earth", constants.earth_mass(units), 1.0, 0.0, constants),
                        circular_planet(
                            "Jupiter",
                            constants.jupiter_mass(units),
                            JUPITER_ORBIT_RADIUS_AU,
                            PI,
                            constants,
                        ),
                    ],
                )
            }
        };

        let sun_mass = constants.solar_mass(units);
        let mut config = ScenarioConfig {
            name: self.name().to_string(),
            preset: None,
            sun,
            units,
            working_units,
            ..ScenarioConfig::default()
        };

        match sun {
            SunTreatment::Fixed => {
                config.sources.push(SourceConfig {
                    name: "Sun".into(),
                    mass: sun_mass,
                    position: vec![0.0, 0.0],
                });
                config.mutual_attraction = planets.len() > 1;
                config.bodies = planets;
            }
            SunTreatment::Dynamic => {
                // Give the Sun the recoil that zeroes the total momentum
                let momentum = planets.iter().fold(Vector::ZERO, |total, planet| {
                    total + planet.mass * Vector::new(planet.velocity[0], planet.velocity[1], 0.0)
                });
                let sun_velocity = -momentum / sun_mass;

                config.name = format!("{}_dynamic_sun", self.name());
                config.mutual_attraction = true;
                config.bodies.push(BodyConfig {
                    name: "Sun".into(),
                    mass: sun_mass,
                    position: vec![0.0, 0.0],
                    velocity: vec![sun_velocity.x, sun_velocity.y],
                });
                config.bodies.extend(planets);
            }
        }

        config
    }

    pub fn scenario(&self, constants: &PhysicalConstants, sun: SunTreatment) -> Result<Scenario> {
        Scenario::from_config(&self.scenario_config(constants, sun), constants)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Planet on a circular astronomical-unit orbit around a solar mass at the origin
fn circular_planet(
    name: &str,
    mass: Scalar,
    radius: Scalar,
    angle: Scalar,
    constants: &PhysicalConstants,
) -> BodyConfig {
    let units = UnitSystem::Astronomical;
    let mu = constants.gravitational_constant(units) * constants.solar_mass(units);
    let position = polar_to_cartesian(radius, angle);
    let velocity = prograde_direction(angle) * circular_orbit_speed(mu, radius);

    BodyConfig {
        name: name.into(),
        mass,
        position: vec![position.x, position.y],
        velocity: vec![velocity.x, velocity.y],
    }
}
