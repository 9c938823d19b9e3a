//! Error types for simulation runs

use crate::physics::components::Body;
use crate::physics::math::Scalar;
use thiserror::Error;

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Errors that can end a run or reject a configuration
///
/// All of these are local to a single run. The harness records them per
/// (step size, strategy) entry and carries on with the remaining runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error(
        "degenerate geometry at step {step}: `{first}` and `{second}` are separated by {separation:e}"
    )]
    DegenerateGeometry {
        /// Zero-based index of the step that was being attempted
        step: usize,
        first: String,
        second: String,
        separation: Scalar,
    },

    #[error("numerical divergence at step {step} (t = {time}): integrator produced a non-finite state")]
    NumericalDivergence {
        /// Zero-based index of the step that produced the non-finite state
        step: usize,
        /// Time of the last finite state
        time: Scalar,
        /// Bodies as they were before the failing step
        last_finite_state: Vec<Body>,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("run cancelled after {completed_steps} steps")]
    Cancelled { completed_steps: usize },
}

impl SimulationError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SimulationError::InvalidConfiguration(message.into())
    }

    /// Index of the step the error refers to, if it happened mid-run
    pub fn step(&self) -> Option<usize> {
        match self {
            SimulationError::DegenerateGeometry { step, .. }
            | SimulationError::NumericalDivergence { step, .. } => Some(*step),
            SimulationError::Cancelled { completed_steps } => Some(*completed_steps),
            SimulationError::InvalidConfiguration(_) => None,
        }
    }
}

/// Errors raised while reading or writing configuration files
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no configuration directory available on this platform")]
    NoConfigDirectory,
}
