use super::Parameter;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
#[error("mutation factor must be finite and greater than 0.0, got: {0}")]
pub struct MutationFactorOutOfRange(pub(crate) f64);

impl MutationFactorOutOfRange {
    /// The rejected factor.
    pub fn factor(&self) -> f64 {
        self.0
    }
}

/// Single-dimension neighbourhood perturbation.
///
/// A candidate coordinate is drawn around a base coordinate, scaled by its
/// distance to a donor's coordinate:
///
/// `v = base + φ · (base − donor)`, with `φ ~ U(−a, a)`,
///
/// then clamped to the parameter's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodMutation {
    factor: f64,
}

impl NeighborhoodMutation {
    pub fn new(factor: f64) -> Result<Self, MutationFactorOutOfRange> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(MutationFactorOutOfRange(factor));
        }

        Ok(Self { factor })
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub(crate) fn perturb<R: Rng>(
        &self,
        rng: &mut R,
        base: f64,
        donor: f64,
        parameter: &Parameter,
    ) -> f64 {
        let phi = rng.random_range(-self.factor..=self.factor);
        parameter.clamp(base + phi * (base - donor))
    }
}

/// Picks a partner slot uniformly among all slots other than `index`.
pub(crate) fn partner<R: Rng>(rng: &mut R, index: usize, size: usize) -> usize {
    let partner = rng.random_range(0..size - 1);
    if partner >= index { partner + 1 } else { partner }
}
