use super::ParameterSpace;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How the initial population is spread over the parameter space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distribution {
    /// Every slot draws an independent uniformly random feasible vector.
    #[default]
    Random,
    /// Each dimension is split into one stratum per slot and every stratum is used once.
    LatinHypercube,
}

impl Distribution {
    #[instrument(level = "debug", skip(space, rng), fields(dimensions = space.dimensions()))]
    pub(crate) fn sample<R: Rng>(
        &self,
        space: &ParameterSpace,
        n_samples: usize,
        rng: &mut R,
    ) -> Vec<Vec<f64>> {
        match self {
            Distribution::Random => random_distribution(space, n_samples, rng),
            Distribution::LatinHypercube => latin_hypercube(space, n_samples, rng),
        }
    }
}

fn random_distribution<R: Rng>(
    space: &ParameterSpace,
    n_samples: usize,
    rng: &mut R,
) -> Vec<Vec<f64>> {
    (0..n_samples).map(|_| space.random(rng)).collect()
}

fn latin_hypercube<R: Rng>(
    space: &ParameterSpace,
    n_samples: usize,
    rng: &mut R,
) -> Vec<Vec<f64>> {
    let mut positions = vec![Vec::with_capacity(space.dimensions()); n_samples];

    for parameter in space.parameters() {
        // Jittered sample inside each stratum
        let mut strata: Vec<f64> = (0..n_samples)
            .map(|i| (i as f64 + rng.random::<f64>()) / n_samples as f64)
            .collect();

        // Decorrelate dimensions
        strata.shuffle(rng);

        for (position, sample) in positions.iter_mut().zip(strata) {
            position.push(parameter.from_unit(sample));
        }
    }

    positions
}
