//! Orbitdrift prelude module
//!
//! This module re-exports the most commonly used types and traits to reduce
//! import boilerplate.

// Internal re-exports - Config
pub use crate::config::{BodyConfig, RunConfig, ScenarioConfig, SimulationConfig, SourceConfig};

// Internal re-exports - Errors
pub use crate::error::{ConfigLoadError, SimulationError};

// Internal re-exports - Physics
pub use crate::physics::components::{Body, FixedSource, SystemState};
pub use crate::physics::forces::{AccelerationField, GravitySet};
pub use crate::physics::integrators::{Integrator, IntegratorRegistry};
pub use crate::physics::math::{Scalar, Vector};
pub use crate::physics::units::{PhysicalConstants, UnitSystem};

// Internal re-exports - Scenarios
pub use crate::scenarios::{Harness, HarnessReport, Preset, RunKey, Scenario, SunTreatment};

// Internal re-exports - Simulation
pub use crate::simulation::{
    CancellationToken, Observables, RunFailure, RunRecord, RunResult, RunSummary, Simulation,
    StepConfiguration, StepRounding, TimeSeries,
};
