use super::colony::Colony;
use super::phase::Termination;
use super::{Error, EvaluationGateway, Sink};
use crate::builder::{Set, Unset};
use crate::models::{ParameterSpace, RunConfig};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub best_fitness: f64,
    pub best_parameters: Vec<f64>,
    /// Evaluation index at which the best fitness was found.
    pub best_index: Option<usize>,
    pub evaluations: usize,
    pub generations: usize,
    pub termination: Termination,
}

/// Fitness-scaled chaotic artificial bee colony optimizer.
///
/// Maximizes the fitness reported by the gateway over a bounded parameter
/// space and saves every evaluation to the sink.
pub struct Sampler<G, S> {
    space: ParameterSpace,
    gateway: G,
    sink: S,
}

impl Sampler<Unset, Unset> {
    pub fn builder(space: ParameterSpace) -> SamplerBuilder<Unset, Unset> {
        SamplerBuilder {
            space,
            gateway: Unset,
            sink: Unset,
        }
    }
}

impl<G, S> Sampler<G, S>
where
    G: EvaluationGateway,
    S: Sink,
{
    /// Runs one optimization and finalizes the sink.
    ///
    /// The configuration is validated before the first evaluation. On error
    /// the sink is left open and keeps the records saved so far.
    #[instrument(
        level = "info",
        skip(self, config),
        fields(
            dimensions = self.space.dimensions(),
            repetitions = config.repetitions,
            employed_bees = config.employed_bees
        )
    )]
    pub async fn sample(&mut self, config: &RunConfig) -> Result<Outcome, Error> {
        let outcome = {
            let mut colony = Colony::new(&self.space, &self.gateway, &mut self.sink, config)?;
            tracing::info!(seed = ?config.seed, distribution = ?config.distribution, "Optimization started");
            colony.run().await?
        };

        self.sink.finalize()?;

        tracing::info!(
            best_fitness = outcome.best_fitness,
            evaluations = outcome.evaluations,
            generations = outcome.generations,
            "Optimization completed"
        );

        Ok(outcome)
    }

    pub fn space(&self) -> &ParameterSpace {
        &self.space
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Assembles a [`Sampler`]. `build` is only available once both the gateway
/// and the sink are set.
pub struct SamplerBuilder<G, S> {
    space: ParameterSpace,
    gateway: G,
    sink: S,
}

impl<G, S> SamplerBuilder<G, S> {
    pub fn gateway<T>(self, gateway: T) -> SamplerBuilder<Set<T>, S>
    where
        T: EvaluationGateway,
    {
        SamplerBuilder {
            space: self.space,
            gateway: Set::new(gateway),
            sink: self.sink,
        }
    }

    pub fn sink<T>(self, sink: T) -> SamplerBuilder<G, Set<T>>
    where
        T: Sink,
    {
        SamplerBuilder {
            space: self.space,
            gateway: self.gateway,
            sink: Set::new(sink),
        }
    }
}

impl<G, S> SamplerBuilder<Set<G>, Set<S>>
where
    G: EvaluationGateway,
    S: Sink,
{
    pub fn build(self) -> Sampler<G, S> {
        Sampler {
            space: self.space,
            gateway: self.gateway.into_inner(),
            sink: self.sink.into_inner(),
        }
    }
}
