//! Gravitational acceleration fields
//!
//! A field turns the positions of the dynamic bodies into one acceleration
//! per body. Terms are combined in a [`GravitySet`], so a scenario can use the
//! two-body model (fixed sources only), pairwise superposition between the
//! dynamic bodies, or both.
//!
//! Coincident bodies are never softened or clamped: any separation at or
//! below `min_separation`, or one with a non-finite component, is reported as
//! a [`DegenerateSeparation`]. A finite separation too large to square yields
//! zero acceleration.

use crate::physics::components::FixedSource;
use crate::physics::math::{Scalar, Vector};

/// Something taking part in a pairwise interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participant {
    /// Index into the dynamic bodies
    Body(usize),
    /// Index into the fixed sources
    Source(usize),
}

/// Two participants closer than the field allows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegenerateSeparation {
    pub first: Participant,
    pub second: Participant,
    pub separation: Scalar,
}

/// Trait for acceleration sources acting on the dynamic bodies
pub trait AccelerationField: Send + Sync {
    /// Add this field's contribution for every body into `out`
    ///
    /// `positions[i]` and `out[i]` both refer to dynamic body `i`.
    fn accumulate(
        &self,
        positions: &[Vector],
        out: &mut [Vector],
    ) -> Result<(), DegenerateSeparation>;

    /// Total acceleration of every body at `positions`
    fn evaluate(&self, positions: &[Vector]) -> Result<Vec<Vector>, DegenerateSeparation> {
        let mut out = vec![Vector::ZERO; positions.len()];
        self.accumulate(positions, &mut out)?;
        Ok(out)
    }
}

/// Attraction towards fixed sources only (the two-body model)
///
/// `a = -G M / |r|³ · r` with `r` measured from each source.
#[derive(Debug, Clone)]
pub struct FixedSourceGravity {
    pub gravitational_constant: Scalar,
    pub sources: Vec<FixedSource>,
    pub min_separation: Scalar,
}

impl AccelerationField for FixedSourceGravity {
    fn accumulate(
        &self,
        positions: &[Vector],
        out: &mut [Vector],
    ) -> Result<(), DegenerateSeparation> {
        let min_separation_squared = self.min_separation * self.min_separation;

        for (i, (position, acceleration)) in positions.iter().zip(out.iter_mut()).enumerate() {
            for (s, source) in self.sources.iter().enumerate() {
                let r = *position - source.position;
                let r2 = r.length_squared();
                if !r.is_finite() || r2 <= min_separation_squared {
                    return Err(DegenerateSeparation {
                        first: Participant::Source(s),
                        second: Participant::Body(i),
                        separation: libm::sqrt(r2),
                    });
                }

                let inv_r3 = 1.0 / (r2 * libm::sqrt(r2));
                *acceleration -= (self.gravitational_constant * source.mass * inv_r3) * r;
            }
        }

        Ok(())
    }
}

/// Mutual attraction between the dynamic bodies (pairwise superposition)
///
/// `a_i = Σ_{j≠i} G m_j / |r_j - r_i|³ · (r_j - r_i)`
#[derive(Debug, Clone)]
pub struct PairwiseGravity {
    pub gravitational_constant: Scalar,
    /// Masses of the dynamic bodies, in body order
    pub masses: Vec<Scalar>,
    pub min_separation: Scalar,
}

impl AccelerationField for PairwiseGravity {
    fn accumulate(
        &self,
        positions: &[Vector],
        out: &mut [Vector],
    ) -> Result<(), DegenerateSeparation> {
        debug_assert_eq!(
            positions.len(),
            self.masses.len(),
            "one mass per dynamic body"
        );
        let n = positions.len().min(self.masses.len());
        let min_separation_squared = self.min_separation * self.min_separation;

        // Each unordered pair once, equal and opposite
        for i in 0..n {
            for j in (i + 1)..n {
                let r = positions[j] - positions[i];
                let r2 = r.length_squared();
                if !r.is_finite() || r2 <= min_separation_squared {
                    return Err(DegenerateSeparation {
                        first: Participant::Body(i),
                        second: Participant::Body(j),
                        separation: libm::sqrt(r2),
                    });
                }

                let coefficient = self.gravitational_constant / (r2 * libm::sqrt(r2));
                out[i] += (coefficient * self.masses[j]) * r;
                out[j] -= (coefficient * self.masses[i]) * r;
            }
        }

        Ok(())
    }
}

/// Collection of acceleration terms whose contributions are summed
#[derive(Default)]
pub struct GravitySet {
    terms: Vec<Box<dyn AccelerationField>>,
}

impl GravitySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a term
    pub fn with(mut self, term: impl AccelerationField + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl AccelerationField for GravitySet {
    fn accumulate(
        &self,
        positions: &[Vector],
        out: &mut [Vector],
    ) -> Result<(), DegenerateSeparation> {
        for term in &self.terms {
            term.accumulate(positions, out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    const G: Scalar = 0.1;

    fn sun_at_origin(mass: Scalar) -> FixedSourceGravity {
        FixedSourceGravity {
            gravitational_constant: G,
            sources: vec![FixedSource::new("Sun", mass, Vector::ZERO)],
            min_separation: 0.0,
        }
    }

    fn pairwise(masses: Vec<Scalar>) -> PairwiseGravity {
        PairwiseGravity {
            gravitational_constant: G,
            masses,
            min_separation: 0.0,
        }
    }

    #[test]
    fn test_fixed_source_matches_closed_form() {
        let field = sun_at_origin(2.0);
        let position = Vector::new(3.0, 4.0, 0.0);
        let acceleration = field.evaluate(&[position]).unwrap()[0];

        // -G M r / |r|^3 with |r| = 5
        let expected = -(G * 2.0 / 125.0) * position;
        assert!((acceleration - expected).length() < 1e-15);
    }

    #[test]
    fn test_fixed_source_points_at_source() {
        let field = FixedSourceGravity {
            gravitational_constant: G,
            sources: vec![FixedSource::new("Sun", 1.0, Vector::new(1.0, 1.0, 0.0))],
            min_separation: 0.0,
        };
        let position = Vector::new(4.0, -3.0, 0.0);
        let acceleration = field.evaluate(&[position]).unwrap()[0];
        let towards_source = Vector::new(1.0, 1.0, 0.0) - position;
        assert!(acceleration.dot(towards_source) > 0.0);
        assert!(acceleration.cross(towards_source).length() < 1e-12);
    }

    #[test]
    fn test_gravity_inverse_square_law() {
        let field = sun_at_origin(1.0);
        let near = field.evaluate(&[Vector::new(1.0, 0.0, 0.0)]).unwrap()[0];
        let far = field.evaluate(&[Vector::new(2.0, 0.0, 0.0)]).unwrap()[0];

        let ratio = near.length() / far.length();
        assert!((ratio - 4.0).abs() < 1e-12, "Expected 4x, got {ratio}");
    }

    #[test]
    fn test_pairwise_newton_third_law() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..50 {
            let masses: Vec<Scalar> = (0..3).map(|_| rng.random_range(0.1..10.0)).collect();
            let positions: Vec<Vector> = (0..3)
                .map(|_| {
                    Vector::new(
                        rng.random_range(-5.0..5.0),
                        rng.random_range(-5.0..5.0),
                        rng.random_range(-5.0..5.0),
                    )
                })
                .collect();

            let accelerations = pairwise(masses.clone()).evaluate(&positions).unwrap();
            let net: Vector = accelerations
                .iter()
                .zip(&masses)
                .map(|(a, m)| *a * *m)
                .sum();

            let scale: Scalar = accelerations
                .iter()
                .zip(&masses)
                .map(|(a, m)| (*a * *m).length())
                .sum();
            assert!(
                net.length() <= 1e-12 * scale.max(1.0),
                "Net force not zero: {net:?}"
            );
        }
    }

    #[test]
    fn test_pairwise_superposition() {
        let masses = vec![1.0, 2.0, 3.0];
        let positions = vec![
            Vector::new(0.0, 0.0, 0.0),
            Vector::new(1.0, 0.0, 0.0),
            Vector::new(0.0, 2.0, 0.0),
        ];
        let accelerations = pairwise(masses).evaluate(&positions).unwrap();

        // Body 0 feels body 1 (G*2/1 along +x) and body 2 (G*3/4 along +y)
        let expected = Vector::new(G * 2.0, G * 3.0 / 4.0, 0.0);
        assert!((accelerations[0] - expected).length() < 1e-15);
    }

    #[test]
    fn test_gravity_set_sums_terms() {
        let positions = vec![Vector::new(1.0, 0.0, 0.0), Vector::new(-2.0, 0.0, 0.0)];
        let masses = vec![1.0e-3, 1.0e-2];

        let only_sun = sun_at_origin(1.0).evaluate(&positions).unwrap();
        let only_pairs = pairwise(masses.clone()).evaluate(&positions).unwrap();
        let combined = GravitySet::new()
            .with(sun_at_origin(1.0))
            .with(pairwise(masses))
            .evaluate(&positions)
            .unwrap();

        for i in 0..2 {
            assert!((combined[i] - (only_sun[i] + only_pairs[i])).length() < 1e-15);
        }
    }

    #[test]
    fn test_zero_separation_is_degenerate() {
        let error = sun_at_origin(1.0).evaluate(&[Vector::ZERO]).unwrap_err();
        assert_eq!(error.first, Participant::Source(0));
        assert_eq!(error.second, Participant::Body(0));
        assert_eq!(error.separation, 0.0);

        let same = Vector::new(1.0, 1.0, 0.0);
        let error = pairwise(vec![1.0, 1.0]).evaluate(&[same, same]).unwrap_err();
        assert_eq!(error.first, Participant::Body(0));
        assert_eq!(error.second, Participant::Body(1));
    }

    #[test]
    fn test_min_separation_threshold() {
        let mut field = sun_at_origin(1.0);
        field.min_separation = 0.5;

        assert!(field.evaluate(&[Vector::new(0.4, 0.0, 0.0)]).is_err());
        assert!(field.evaluate(&[Vector::new(0.6, 0.0, 0.0)]).is_ok());
    }

    #[test]
    fn test_non_finite_separation_is_degenerate() {
        let error = sun_at_origin(1.0)
            .evaluate(&[Vector::new(Scalar::INFINITY, 0.0, 0.0)])
            .unwrap_err();
        assert_eq!(error.first, Participant::Source(0));
        assert_eq!(error.second, Participant::Body(0));

        let error = pairwise(vec![1.0, 1.0])
            .evaluate(&[Vector::ZERO, Vector::new(Scalar::NAN, 1.0, 0.0)])
            .unwrap_err();
        assert_eq!(error.first, Participant::Body(0));
        assert_eq!(error.second, Participant::Body(1));
    }

    #[test]
    fn test_huge_finite_separation_has_no_pull() {
        let far = Vector::new(1.0e200, 0.0, 0.0);
        let acceleration = sun_at_origin(1.0).evaluate(&[far]).unwrap()[0];
        assert!(acceleration.is_finite());
        assert_eq!(acceleration.length(), 0.0);

        let accelerations = pairwise(vec![1.0, 1.0]).evaluate(&[Vector::ZERO, far]).unwrap();
        assert!(accelerations.iter().all(|a| a.is_finite()));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "one mass per dynamic body")]
    fn test_pairwise_rejects_mismatched_masses() {
        let _ = pairwise(vec![1.0]).evaluate(&[Vector::ZERO, Vector::new(1.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_empty_set_is_zero() {
        let set = GravitySet::new();
        assert!(set.is_empty());
        let accelerations = set.evaluate(&[Vector::new(1.0, 2.0, 3.0)]).unwrap();
        assert_eq!(accelerations, vec![Vector::ZERO]);
    }
}
