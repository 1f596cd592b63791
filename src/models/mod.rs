mod bee;
mod chaos;
mod config;
mod distribution;
mod evaluator;
mod mutation;
mod parameter_space;
mod population;
mod record;
mod scaling;
mod status;

pub use bee::{Bee, Verdict};
pub use chaos::{ChaoticMap, is_viable, logistic};
pub use config::{
    ConfigError, DEFAULT_CONVERGENCE_THRESHOLD, DEFAULT_EMPLOYED_BEES, DEFAULT_MUTATION_FACTOR,
    DEFAULT_SCALING_EXPONENT, RunConfig,
};
pub use distribution::Distribution;
pub use evaluator::{Blocking, Model, Objective};
pub use mutation::{MutationFactorOutOfRange, NeighborhoodMutation};
pub use parameter_space::{Parameter, ParameterError, ParameterSpace};
pub use population::Population;
pub use record::{Origin, Record};
pub use scaling::{RouletteWheel, power_rank_weights};
pub use status::Status;

pub(crate) use mutation::partner;
