//! Physics core: state types, force models, unit handling and integrators

pub mod components;
pub mod forces;
pub mod integrators;
pub mod math;
pub mod units;
