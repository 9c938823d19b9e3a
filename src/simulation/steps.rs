//! Step size, duration and the derived step count

use crate::error::{Result, SimulationError};
use crate::physics::math::Scalar;
use serde::{Deserialize, Serialize};

/// Relative slack when deciding whether `duration / step_size` is integral
///
/// `10.0 / 0.1` and friends are not exactly representable; anything this
/// close to an integer counts as that integer under every rounding policy.
const INTEGRAL_RATIO_TOLERANCE: Scalar = 1e-9;

/// Upper bound on the number of steps in a single run
pub const MAX_STEP_COUNT: usize = 100_000_000;

/// How a non-integral `duration / step_size` becomes a step count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepRounding {
    /// Drop the partial final step (`int(duration / step_size)`)
    #[default]
    Truncate,
    /// Take one more step so the run reaches at least `duration`
    Ceil,
}

/// Fixed step size and total simulated duration for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepConfiguration {
    step_size: Scalar,
    duration: Scalar,
    rounding: StepRounding,
    step_count: usize,
}

impl StepConfiguration {
    pub fn new(step_size: Scalar, duration: Scalar) -> Result<Self> {
        Self::with_rounding(step_size, duration, StepRounding::default())
    }

    pub fn with_rounding(step_size: Scalar, duration: Scalar, rounding: StepRounding) -> Result<Self> {
        if !(step_size.is_finite() && step_size > 0.0) {
            return Err(SimulationError::invalid(format!(
                "step size must be positive and finite, got {step_size}"
            )));
        }
        if !(duration.is_finite() && duration > 0.0) {
            return Err(SimulationError::invalid(format!(
                "duration must be positive and finite, got {duration}"
            )));
        }

        let ratio = duration / step_size;
        if !ratio.is_finite() || ratio > MAX_STEP_COUNT as Scalar {
            return Err(SimulationError::invalid(format!(
                "duration {duration} at step size {step_size} needs more than {MAX_STEP_COUNT} steps"
            )));
        }

        let nearest = ratio.round();
        let step_count = if (ratio - nearest).abs() <= INTEGRAL_RATIO_TOLERANCE * nearest.max(1.0) {
            nearest
        } else {
            match rounding {
                StepRounding::Truncate => ratio.floor(),
                StepRounding::Ceil => ratio.ceil(),
            }
        } as usize;

        Ok(Self {
            step_size,
            duration,
            rounding,
            step_count,
        })
    }

    #[inline]
    pub fn step_size(&self) -> Scalar {
        self.step_size
    }

    #[inline]
    pub fn duration(&self) -> Scalar {
        self.duration
    }

    #[inline]
    pub fn rounding(&self) -> StepRounding {
        self.rounding
    }

    /// Number of integration steps in a complete run
    #[inline]
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Time of the state after `completed_steps` steps
    ///
    /// Computed by multiplication so rounding does not accumulate.
    #[inline]
    pub fn time_at(&self, completed_steps: usize) -> Scalar {
        completed_steps as Scalar * self.step_size
    }

    /// Time reached by a complete run
    pub fn end_time(&self) -> Scalar {
        self.time_at(self.step_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_counts_for_standard_step_sizes() {
        assert_eq!(StepConfiguration::new(0.1, 10.0).unwrap().step_count(), 100);
        assert_eq!(StepConfiguration::new(0.01, 10.0).unwrap().step_count(), 1_000);
        assert_eq!(StepConfiguration::new(0.001, 10.0).unwrap().step_count(), 10_000);
    }

    #[test]
    fn test_representation_error_never_loses_a_step() {
        // 0.3 / 0.1 evaluates to 2.9999999999999996
        assert!(0.3_f64 / 0.1 < 3.0);
        for rounding in [StepRounding::Truncate, StepRounding::Ceil] {
            let steps = StepConfiguration::with_rounding(0.1, 0.3, rounding).unwrap();
            assert_eq!(steps.step_count(), 3);
        }
    }

    #[test]
    fn test_rounding_policies_for_partial_steps() {
        let truncated = StepConfiguration::with_rounding(0.3, 1.0, StepRounding::Truncate).unwrap();
        let ceiled = StepConfiguration::with_rounding(0.3, 1.0, StepRounding::Ceil).unwrap();
        assert_eq!(truncated.step_count(), 3);
        assert_eq!(ceiled.step_count(), 4);
        assert!(ceiled.end_time() >= 1.0);
        assert!(truncated.end_time() < 1.0);
    }

    #[test]
    fn test_step_larger_than_duration() {
        let steps = StepConfiguration::new(5.0, 1.0).unwrap();
        assert_eq!(steps.step_count(), 0);
        let steps = StepConfiguration::with_rounding(5.0, 1.0, StepRounding::Ceil).unwrap();
        assert_eq!(steps.step_count(), 1);
    }

    #[test]
    fn test_time_at_is_multiplicative() {
        let steps = StepConfiguration::new(0.1, 10.0).unwrap();
        assert_eq!(steps.time_at(0), 0.0);
        assert_eq!(steps.time_at(37), 37.0 * 0.1);
        assert_eq!(steps.end_time(), 100.0 * 0.1);
    }

    #[test]
    fn test_invalid_configurations() {
        for (step_size, duration) in [
            (0.0, 10.0),
            (-0.1, 10.0),
            (Scalar::NAN, 10.0),
            (0.1, 0.0),
            (0.1, -1.0),
            (0.1, Scalar::INFINITY),
            (1e-12, 10.0),
        ] {
            assert!(
                matches!(
                    StepConfiguration::new(step_size, duration),
                    Err(SimulationError::InvalidConfiguration(_))
                ),
                "accepted step size {step_size}, duration {duration}"
            );
        }
    }
}
