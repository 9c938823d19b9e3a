use crate::error::ConfigLoadError;
use crate::physics::math::Scalar;
use crate::physics::units::{PhysicalConstants, UnitSystem};
use crate::scenarios::{Preset, SunTreatment};
use crate::simulation::{Observables, StepRounding};
use bevy::log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub constants: PhysicalConstants,
    pub run: RunConfig,
    pub scenario: ScenarioConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            constants: PhysicalConstants::default(),
            run: RunConfig::default(),
            scenario: ScenarioConfig::from_preset(Preset::SunEarth),
        }
    }
}

/// Harness settings shared by every run of a scenario
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Each step size gets its own run per integrator
    pub step_sizes: Vec<Scalar>,
    /// Simulated time, in the scenario's working time unit
    pub duration: Scalar,
    pub rounding: StepRounding,
    /// Integrator names or aliases, in reporting order
    pub integrators: Vec<String>,
    pub observables: Observables,
    /// Run independent (step size, integrator) pairs on the rayon pool
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            step_sizes: vec![0.1, 0.01, 0.001],
            duration: 10.0,
            rounding: StepRounding::Truncate,
            integrators: vec![
                "explicit_euler".to_string(),
                "semi_implicit_euler".to_string(),
                "runge_kutta_second_order".to_string(),
            ],
            observables: Observables::default(),
            parallel: false,
        }
    }
}

/// Initial conditions, either a preset or explicit bodies and sources
///
/// Vectors have 2 or 3 components; planar input is padded with `z = 0`. All
/// vectors of one scenario must have the same number of components.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub name: String,
    /// When set, `sources`, `bodies`, `units` and `mutual_attraction` come
    /// from the preset
    pub preset: Option<Preset>,
    pub sun: SunTreatment,
    /// Units the values below are written in
    pub units: UnitSystem,
    /// Units the scenario is integrated in, defaulting to `units`
    pub working_units: Option<UnitSystem>,
    pub mutual_attraction: bool,
    /// In working units
    pub min_separation: Scalar,
    pub sources: Vec<SourceConfig>,
    pub bodies: Vec<BodyConfig>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            preset: None,
            sun: SunTreatment::Fixed,
            units: UnitSystem::Astronomical,
            working_units: None,
            mutual_attraction: false,
            min_separation: 0.0,
            sources: Vec::new(),
            bodies: Vec::new(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset: Some(preset),
            ..Self::default()
        }
    }

    /// Expand the preset, if any, keeping explicit overrides
    pub fn resolve(&self, constants: &PhysicalConstants) -> ScenarioConfig {
        let Some(preset) = self.preset else {
            return self.clone();
        };

        let mut resolved = preset.scenario_config(constants, self.sun);
        if !self.name.is_empty() {
            resolved.name = self.name.clone();
        }
        if self.working_units.is_some() {
            resolved.working_units = self.working_units;
        }
        resolved.min_separation = self.min_separation;
        resolved
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SourceConfig {
    pub name: String,
    pub mass: Scalar,
    pub position: Vec<Scalar>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub mass: Scalar,
    pub position: Vec<Scalar>,
    pub velocity: Vec<Scalar>,
}

impl SimulationConfig {
    /// Load configuration from a file; the format follows the extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("Config file {} not found. Using defaults.", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to parse config file {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Load `config.toml` from the platform configuration directory
    pub fn load_from_user_config() -> Self {
        match directories::ProjectDirs::from("", "", env!("CARGO_PKG_NAME")) {
            Some(dirs) => Self::load_or_default(dirs.config_dir().join(CONFIG_FILE_NAME)),
            None => {
                warn!("No configuration directory available. Using defaults.");
                Self::default()
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigLoadError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigLoadError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigLoadError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Save to the platform configuration directory
    pub fn save_to_user_config(&self) -> Result<(), ConfigLoadError> {
        let dirs = directories::ProjectDirs::from("", "", env!("CARGO_PKG_NAME"))
            .ok_or(ConfigLoadError::NoConfigDirectory)?;
        self.save(dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
