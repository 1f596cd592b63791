use super::{Distribution, MutationFactorOutOfRange, NeighborhoodMutation};
use serde::{Deserialize, Serialize};
use tracing::instrument;

pub const DEFAULT_EMPLOYED_BEES: usize = 48;
pub const DEFAULT_MUTATION_FACTOR: f64 = 0.1;
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 0.0001;
pub const DEFAULT_SCALING_EXPONENT: f64 = 5.0;

#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ConfigError {
    #[error("TooFewBees: at least 2 employed bees are required, got {employed_bees}")]
    TooFewBees { employed_bees: usize },
    #[error(
        "BudgetBelowPopulation: repetitions must cover the initial population. repetitions = {repetitions}, employed_bees = {employed_bees}"
    )]
    BudgetBelowPopulation {
        repetitions: usize,
        employed_bees: usize,
    },
    #[error("MutationFactor: {0}")]
    MutationFactor(#[from] MutationFactorOutOfRange),
    #[error("ConvergenceThreshold: must be finite and non-negative, got {0}")]
    ConvergenceThreshold(f64),
    #[error("ScalingExponent: must be finite and non-negative, got {0}")]
    ScalingExponent(f64),
    #[error("ZeroLimit: the stagnation limit must be at least 1")]
    ZeroLimit,
}

/// Settings of a single sampling run.
///
/// Built with [`RunConfig::new`] and refined with the `with_*` methods:
///
/// ```rust
/// use fscabc::models::RunConfig;
///
/// let config = RunConfig::new(5_000)
///     .with_employed_bees(24)
///     .with_mutation_factor(0.2)
///     .with_limit(12)
///     .with_seed(7);
///
/// assert_eq!(config.stagnation_limit(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Maximum number of evaluations, including the initial population.
    pub repetitions: usize,
    /// Number of employed bees, equal to the population size.
    pub employed_bees: usize,
    /// Half-width `a` of the neighbourhood factor `φ ~ U(−a, a)`.
    pub mutation_factor: f64,
    /// The run stops once the normalized population spread falls below this value.
    pub convergence_threshold: f64,
    /// Exponent of the power-rank fitness scaling. Higher is more elitist.
    pub scaling_exponent: f64,
    /// Generations without improvement before a bee turns scout.
    /// Defaults to the number of employed bees.
    pub limit: Option<usize>,
    /// Seed for reproducible runs. Unseeded runs draw from the operating system.
    pub seed: Option<u64>,
    /// How the initial population is spread over the parameter space.
    pub distribution: Distribution,
}

impl RunConfig {
    pub fn new(repetitions: usize) -> Self {
        Self {
            repetitions,
            employed_bees: DEFAULT_EMPLOYED_BEES,
            mutation_factor: DEFAULT_MUTATION_FACTOR,
            convergence_threshold: DEFAULT_CONVERGENCE_THRESHOLD,
            scaling_exponent: DEFAULT_SCALING_EXPONENT,
            limit: None,
            seed: None,
            distribution: Distribution::Random,
        }
    }

    pub fn with_employed_bees(mut self, employed_bees: usize) -> Self {
        self.employed_bees = employed_bees;
        self
    }

    pub fn with_mutation_factor(mut self, mutation_factor: f64) -> Self {
        self.mutation_factor = mutation_factor;
        self
    }

    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    pub fn with_scaling_exponent(mut self, exponent: f64) -> Self {
        self.scaling_exponent = exponent;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Effective scout threshold.
    pub fn stagnation_limit(&self) -> usize {
        self.limit.unwrap_or(self.employed_bees)
    }

    /// Checks every setting before a single evaluation is spent.
    #[instrument(level = "debug", skip(self), fields(repetitions = self.repetitions, employed_bees = self.employed_bees))]
    pub fn validate(&self) -> Result<NeighborhoodMutation, ConfigError> {
        if self.employed_bees <= 1 {
            return Err(ConfigError::TooFewBees {
                employed_bees: self.employed_bees,
            });
        }

        if self.repetitions < self.employed_bees {
            return Err(ConfigError::BudgetBelowPopulation {
                repetitions: self.repetitions,
                employed_bees: self.employed_bees,
            });
        }

        if !self.convergence_threshold.is_finite() || self.convergence_threshold < 0.0 {
            return Err(ConfigError::ConvergenceThreshold(self.convergence_threshold));
        }

        if !self.scaling_exponent.is_finite() || self.scaling_exponent < 0.0 {
            return Err(ConfigError::ScalingExponent(self.scaling_exponent));
        }

        if self.limit == Some(0) {
            return Err(ConfigError::ZeroLimit);
        }

        Ok(NeighborhoodMutation::new(self.mutation_factor)?)
    }
}
