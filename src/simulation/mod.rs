//! Simulation driver: step configuration, recorded series, cancellation

pub mod cancel;
pub mod driver;
pub mod series;
pub mod steps;

pub use cancel::CancellationToken;
pub use driver::{RunFailure, RunResult, Simulation};
pub use series::{BodySeries, Observables, RunRecord, RunSummary, Sample, StateSample, TimeSeries};
pub use steps::{StepConfiguration, StepRounding};
