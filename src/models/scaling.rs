//! Rank-based fitness scaling and roulette wheel selection.
//!
//! After the employed phase the population is sorted worst first and every
//! bee at rank `i` (0-based) receives the raw weight `i^k`. Weights are
//! normalized into selection probabilities and accumulated into a
//! cumulative distribution, the *wheel*:
//!
//! | rank | raw (`k = 5`) | probability | bound |
//! |------|---------------|-------------|-------|
//! | 0    | 0             | 0.000       | 0.000 |
//! | 1    | 1             | 0.004       | 0.004 |
//! | 2    | 32            | 0.116       | 0.120 |
//! | 3    | 243           | 0.880       | 1.000 |
//!
//! Higher exponents concentrate onlooker attention on the fittest bees while
//! every bee above the worst keeps a nonzero chance of being followed. An
//! exponent of `0` degrades to uniform selection.
//!
//! The wheel refers to slot indices of the sorted population, so it is only
//! valid until the population is reordered again.

use super::Population;
use tracing::instrument;

/// Normalized power-rank weights for `size` ranks, worst rank first.
///
/// Ranks are divided by the top rank before exponentiation so that large
/// exponents underflow towards zero instead of overflowing.
pub fn power_rank_weights(size: usize, exponent: f64) -> Vec<f64> {
    if size == 1 {
        return vec![1.0];
    }

    let top = size.saturating_sub(1) as f64;
    let raw: Vec<f64> = (0..size)
        .map(|rank| (rank as f64 / top).powf(exponent))
        .collect();
    let total: f64 = raw.iter().sum();

    raw.into_iter().map(|weight| weight / total).collect()
}

/// Cumulative selection distribution over the sorted population.
#[derive(Debug, Clone, PartialEq)]
pub struct RouletteWheel {
    bounds: Vec<f64>,
}

impl RouletteWheel {
    /// Sorts the population worst first, stores every bee's scaled fitness and
    /// returns the wheel built from them.
    #[instrument(level = "debug", skip(population), fields(bees = population.len()))]
    pub(crate) fn power_rank(population: &mut Population, exponent: f64) -> Self {
        population.sort_by_fitness();

        let weights = power_rank_weights(population.len(), exponent);
        let mut cumulative = 0.0;
        let mut bounds = Vec::with_capacity(weights.len());

        for (bee, weight) in population.iter_mut().zip(weights) {
            bee.scaled_fitness = weight;
            cumulative += weight;
            bounds.push(cumulative);
        }

        Self { bounds }
    }

    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Index of the first bucket whose cumulative bound covers `pn`.
    ///
    /// Rounding can leave the last bound a hair below one; draws beyond it
    /// land on the last bucket.
    pub fn spin(&self, pn: f64) -> usize {
        self.bounds
            .partition_point(|bound| bound - pn < 0.0)
            .min(self.bounds.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bee;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const TOLERANCE: f64 = 1e-12;

    fn population(fitnesses: &[f64]) -> Population {
        Population::new(
            fitnesses
                .iter()
                .enumerate()
                .map(|(i, fitness)| Bee::new(vec![i as f64], *fitness))
                .collect(),
        )
    }

    #[test]
    fn it_normalizes_weights() {
        for (size, exponent) in [(2, 5.0), (4, 5.0), (48, 5.0), (10, 1.0), (7, 0.0), (30, 2.5)] {
            let weights = power_rank_weights(size, exponent);
            assert_eq!(weights.len(), size);
            assert!((weights.iter().sum::<f64>() - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn it_matches_the_power_rank_table() {
        let weights = power_rank_weights(4, 5.0);

        assert_eq!(weights[0], 0.0);
        assert!((weights[1] - 1.0 / 276.0).abs() < TOLERANCE);
        assert!((weights[2] - 32.0 / 276.0).abs() < TOLERANCE);
        assert!((weights[3] - 243.0 / 276.0).abs() < TOLERANCE);
    }

    #[test]
    fn it_stays_finite_for_steep_exponents() {
        let weights = power_rank_weights(48, 200.0);

        assert!(weights.iter().all(|w| w.is_finite()));
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < TOLERANCE);
        assert!(weights[47] > 0.9);

        let mut population = population(&(0..48).map(f64::from).collect::<Vec<_>>());
        let wheel = RouletteWheel::power_rank(&mut population, 200.0);

        assert_eq!(wheel.spin(0.5), 47);
        assert_eq!(wheel.spin(0.999), 47);
    }

    #[test]
    fn it_weights_a_single_rank_fully() {
        assert_eq!(power_rank_weights(1, 5.0), vec![1.0]);
    }

    #[test]
    fn it_degrades_to_uniform_with_zero_exponent() {
        let weights = power_rank_weights(5, 0.0);

        assert!(weights.iter().all(|w| (w - 0.2).abs() < TOLERANCE));
    }

    #[test]
    fn it_builds_a_monotonic_wheel_over_the_sorted_population() {
        let mut population = population(&[3.0, -1.0, 7.0, 0.0, 2.0]);

        let wheel = RouletteWheel::power_rank(&mut population, 5.0);

        let fitnesses: Vec<f64> = population.bees().iter().map(|b| b.current_fitness()).collect();
        assert_eq!(fitnesses, vec![-1.0, 0.0, 2.0, 3.0, 7.0]);

        let bounds = wheel.bounds();
        assert_eq!(bounds.len(), 5);
        assert!(bounds.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!((bounds[4] - 1.0).abs() < TOLERANCE);

        let scaled: f64 = population.bees().iter().map(|b| b.scaled_fitness()).sum();
        assert!((scaled - 1.0).abs() < TOLERANCE);
        assert!(
            population
                .bees()
                .windows(2)
                .all(|pair| pair[0].scaled_fitness() <= pair[1].scaled_fitness())
        );
    }

    #[test]
    fn it_selects_the_first_covering_bucket() {
        let wheel = RouletteWheel {
            bounds: vec![0.0, 0.1, 0.4, 1.0],
        };

        assert_eq!(wheel.spin(0.0), 0);
        assert_eq!(wheel.spin(0.05), 1);
        assert_eq!(wheel.spin(0.1), 1);
        assert_eq!(wheel.spin(0.2), 2);
        assert_eq!(wheel.spin(0.99), 3);
    }

    #[test]
    fn it_falls_back_to_the_last_bucket() {
        let wheel = RouletteWheel {
            bounds: vec![0.2, 0.5, 0.999_999_999],
        };

        assert_eq!(wheel.spin(0.999_999_999_9), 2);
    }

    #[test]
    fn it_never_selects_the_worst_bee_with_positive_exponent() {
        let mut population = population(&[1.0, 2.0, 3.0, 4.0]);
        let wheel = RouletteWheel::power_rank(&mut population, 5.0);
        let mut rng = StdRng::seed_from_u64(17);
        let mut counts = [0usize; 4];

        for _ in 0..10_000 {
            counts[wheel.spin(rng.random::<f64>())] += 1;
        }

        // pn == 0.0 is the only draw that would select rank 0
        assert!(counts[0] <= 1);
        assert!(counts[3] > counts[2] && counts[2] > counts[1]);
        assert!((counts[3] as f64 / 10_000.0 - 243.0 / 276.0).abs() < 0.03);
    }
}
