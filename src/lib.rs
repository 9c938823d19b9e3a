//! Orbitdrift library
//!
//! Fixed-step integration of Sun–Earth(–Jupiter) systems and a harness that
//! compares integrators and step sizes by how far the angular momentum of
//! each run drifts from its initial value.
//!
//! ```no_run
//! use orbitdrift::prelude::*;
//!
//! let config = SimulationConfig::default();
//! let scenario = Scenario::from_config(&config.scenario, &config.constants)?;
//! let harness = Harness::from_config(&config.run, &IntegratorRegistry::default())?;
//! for (key, summary) in harness.run(&scenario).summaries() {
//!     println!("{} h={}: {:?}", key.integrator, key.step_size, summary.max_relative_angular_momentum_drift);
//! }
//! # Ok::<(), orbitdrift::error::SimulationError>(())
//! ```

pub mod config;
pub mod error;
pub mod physics;
pub mod prelude;
pub mod scenarios;
pub mod simulation;
