//! Chaotic sequence generation for scout resets.
//!
//! The logistic map `r -> 4r(1 - r)` is fully chaotic on the open unit
//! interval: successive values look decorrelated while staying deterministic
//! for a given seed. Three seeds are degenerate and must never be used:
//!
//! | seed | orbit |
//! |------|-------|
//! | 0.25 | 0.25 → 0.75 → 0.75 → … |
//! | 0.5  | 0.5 → 1.0 → 0.0 → 0.0 → … |
//! | 0.75 | 0.75 → 0.75 → … |
//!
//! Zero and one collapse onto zero in the same way, so seed selection
//! redraws until it obtains a value in `(0, 1)` that is none of the fixed
//! points above.

use rand::Rng;
use tracing::instrument;

const DEGENERATE_SEEDS: [f64; 3] = [0.25, 0.5, 0.75];

/// One step of the logistic map at the chaotic parameter 4.
pub fn logistic(r: f64) -> f64 {
    4.0 * r * (1.0 - r)
}

/// Returns true when `r` can drive the logistic map without collapsing.
pub fn is_viable(r: f64) -> bool {
    r > 0.0 && r < 1.0 && !DEGENERATE_SEEDS.contains(&r)
}

/// The chaotic cursor of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChaoticMap {
    state: f64,
}

impl ChaoticMap {
    /// Seeds the map from an arbitrary uniform source, redrawing degenerate values.
    ///
    /// Returns the map together with the number of rejected draws.
    pub fn seed_from<F>(mut draw: F) -> (Self, usize)
    where
        F: FnMut() -> f64,
    {
        let mut rejected = 0;
        loop {
            let r = draw();
            if is_viable(r) {
                return (Self { state: r }, rejected);
            }
            rejected += 1;
        }
    }

    #[instrument(level = "debug", skip(rng))]
    pub fn seeded<R: Rng>(rng: &mut R) -> Self {
        let (map, rejected) = Self::seed_from(|| rng.random::<f64>());
        tracing::debug!(state = map.state, rejected, "Seeded chaotic map");
        map
    }

    pub fn state(&self) -> f64 {
        self.state
    }

    /// Advances the cursor and returns the new value in `(0, 1)`.
    ///
    /// Floating point iteration can in rare cases land exactly on a fixed point;
    /// the cursor is then reseeded from `rng`.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> f64 {
        let next = logistic(self.state);
        if is_viable(next) {
            self.state = next;
        } else {
            tracing::warn!(state = self.state, next, "Chaotic map collapsed, reseeding");
            *self = Self::seeded(rng);
        }

        self.state
    }
}
