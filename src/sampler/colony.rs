use super::phase::{Phase, Termination};
use super::{Error, EvaluationGateway, EvaluationRequest, Outcome, Sink};
use crate::models::{
    Bee, ChaoticMap, NeighborhoodMutation, Origin, ParameterSpace, Population, Record,
    RouletteWheel, RunConfig, Status, Verdict, partner,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

/// Fitness and simulation output of one submitted position.
struct Evaluation {
    id: Uuid,
    fitness: f64,
    simulation: Vec<f64>,
}

/// Mutable state of a single run, owned by the scheduler.
pub(crate) struct Colony<'r, G, S> {
    space: &'r ParameterSpace,
    gateway: &'r G,
    sink: &'r mut S,
    config: &'r RunConfig,
    mutation: NeighborhoodMutation,
    rng: StdRng,
    chaos: ChaoticMap,
    population: Population,
    status: Status,
    evaluations: usize,
    generations: usize,
}

impl<'r, G, S> Colony<'r, G, S>
where
    G: EvaluationGateway,
    S: Sink,
{
    /// Validates the configuration and seeds the run. No evaluation is spent here.
    pub(crate) fn new(
        space: &'r ParameterSpace,
        gateway: &'r G,
        sink: &'r mut S,
        config: &'r RunConfig,
    ) -> Result<Self, Error> {
        let mutation = config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let chaos = ChaoticMap::seeded(&mut rng);

        Ok(Self {
            space,
            gateway,
            sink,
            config,
            mutation,
            rng,
            chaos,
            population: Population::new(Vec::with_capacity(config.employed_bees)),
            status: Status::new(),
            evaluations: 0,
            generations: 0,
        })
    }

    pub(crate) async fn run(&mut self) -> Result<Outcome, Error> {
        let mut phase = Phase::Initialize;

        loop {
            phase = match phase {
                Phase::Terminate(termination) => return Ok(self.conclude(termination)),
                phase => self.step(phase).await?,
            };
        }
    }

    /// Executes one phase and returns the phase that follows it.
    pub(crate) async fn step(&mut self, phase: Phase) -> Result<Phase, Error> {
        tracing::trace!(phase = phase.name(), evaluations = self.evaluations, "Entering phase");

        let next = match phase {
            Phase::Initialize => {
                self.initialize().await?;
                Phase::Employed
            }
            Phase::Employed => {
                self.employed().await?;
                Phase::Scale
            }
            Phase::Scale => Phase::Onlooker(self.scale()),
            Phase::Onlooker(wheel) => {
                self.onlooker(&wheel).await?;
                Phase::Scout
            }
            Phase::Scout => {
                self.scout().await?;
                self.generations += 1;
                Phase::ConvergenceCheck
            }
            Phase::ConvergenceCheck => match self.check_convergence() {
                Some(termination) => Phase::Terminate(termination),
                None => Phase::Employed,
            },
            Phase::Terminate(termination) => Phase::Terminate(termination),
        };

        Ok(next)
    }

    #[instrument(level = "debug", skip(self), fields(employed_bees = self.config.employed_bees))]
    async fn initialize(&mut self) -> Result<(), Error> {
        self.sink.initialize(&self.space.names())?;

        let positions =
            self.config
                .distribution
                .sample(self.space, self.config.employed_bees, &mut self.rng);
        let evaluations = self.evaluate(&positions).await?;

        let mut bees = Vec::with_capacity(positions.len());
        for (position, evaluation) in positions.into_iter().zip(evaluations) {
            bees.push(Bee::new(position.clone(), evaluation.fitness));
            self.persist(evaluation, Origin::Initial, position)?;
        }
        self.population = Population::new(bees);

        Ok(())
    }

    /// Every bee perturbs one dimension of its own food source.
    #[instrument(level = "debug", skip(self), fields(generation = self.generations))]
    async fn employed(&mut self) -> Result<(), Error> {
        let size = self.population.len();
        let dimensions = self.space.dimensions();

        for i in 0..size {
            let k = partner(&mut self.rng, i, size);
            let j = self.rng.random_range(0..dimensions);
            let value = self.mutation.perturb(
                &mut self.rng,
                self.population[i].current_position[j],
                self.population[k].current_position[j],
                self.space.parameter(j),
            );
            self.population[i].candidate_position[j] = value;
        }

        self.exploit(Origin::Employed).await
    }

    fn scale(&mut self) -> RouletteWheel {
        RouletteWheel::power_rank(&mut self.population, self.config.scaling_exponent)
    }

    /// Every bee perturbs one dimension around a guide drawn from the wheel.
    #[instrument(level = "debug", skip(self, wheel), fields(generation = self.generations))]
    async fn onlooker(&mut self, wheel: &RouletteWheel) -> Result<(), Error> {
        let size = self.population.len();
        let dimensions = self.space.dimensions();

        for i in 0..size {
            let z = wheel.spin(self.rng.random::<f64>());
            let k = partner(&mut self.rng, i, size);
            let j = self.rng.random_range(0..dimensions);
            let value = self.mutation.perturb(
                &mut self.rng,
                self.population[z].current_position[j],
                self.population[k].current_position[j],
                self.space.parameter(j),
            );
            self.population[i].candidate_position[j] = value;
        }

        self.exploit(Origin::Onlooker).await
    }

    /// Evaluates all candidates and keeps the strict improvements.
    async fn exploit(&mut self, origin: Origin) -> Result<(), Error> {
        let candidates: Vec<Vec<f64>> = self
            .population
            .bees()
            .iter()
            .map(|bee| bee.candidate_position.clone())
            .collect();
        let evaluations = self.evaluate(&candidates).await?;

        let mut accepted = 0;
        for (slot, (candidate, evaluation)) in candidates.into_iter().zip(evaluations).enumerate() {
            if self.population[slot].consider(evaluation.fitness) == Verdict::Accepted {
                accepted += 1;
            }
            self.persist(evaluation, origin, candidate)?;
        }

        tracing::debug!(?origin, accepted, "Candidates evaluated");
        Ok(())
    }

    /// Bees stagnating for `limit` generations abandon their source for a chaotic one.
    #[instrument(level = "debug", skip(self), fields(generation = self.generations))]
    async fn scout(&mut self) -> Result<(), Error> {
        let limit = self.config.stagnation_limit();
        let scouts: Vec<usize> = self
            .population
            .bees()
            .iter()
            .enumerate()
            .filter(|(_, bee)| bee.stagnation >= limit)
            .map(|(slot, _)| slot)
            .collect();

        if scouts.is_empty() {
            return Ok(());
        }

        let positions: Vec<Vec<f64>> = scouts.iter().map(|_| self.chaotic_position()).collect();
        let evaluations = self.evaluate(&positions).await?;

        for ((slot, position), evaluation) in scouts.into_iter().zip(positions).zip(evaluations) {
            self.population[slot].relocate(position.clone(), evaluation.fitness);
            self.persist(evaluation, Origin::Scout, position)?;
        }

        Ok(())
    }

    fn chaotic_position(&mut self) -> Vec<f64> {
        self.space
            .parameters()
            .iter()
            .map(|parameter| parameter.from_unit(self.chaos.advance(&mut self.rng)))
            .collect()
    }

    fn check_convergence(&self) -> Option<Termination> {
        let spread = self.population.spread(self.space);

        tracing::debug!(
            generation = self.generations,
            evaluations = self.evaluations,
            best_fitness = self.status.best_fitness(),
            spread,
            "Generation completed"
        );

        if self.evaluations >= self.config.repetitions {
            return Some(Termination::BudgetExhausted {
                evaluations: self.evaluations,
            });
        }

        if spread < self.config.convergence_threshold {
            return Some(Termination::Converged { spread });
        }

        None
    }

    /// Submits positions to the gateway and returns their evaluations in submission order.
    async fn evaluate(&self, positions: &[Vec<f64>]) -> Result<Vec<Evaluation>, Error> {
        let requests: Vec<EvaluationRequest> = positions
            .iter()
            .map(|position| EvaluationRequest::new(position.clone()))
            .collect();
        let slots: HashMap<Uuid, usize> = requests
            .iter()
            .enumerate()
            .map(|(slot, request)| (request.id, slot))
            .collect();
        let expected = requests.len();

        let results = self.gateway.evaluate_batch(requests).await?;
        let received = results.len();
        if received != expected {
            return Err(Error::MissingResults { expected, received });
        }

        let mut evaluations: Vec<Option<Evaluation>> = (0..expected).map(|_| None).collect();
        for result in results {
            let slot = *slots
                .get(&result.id)
                .ok_or(Error::UnmatchedResult { id: result.id })?;
            if evaluations[slot].is_some() {
                return Err(Error::UnmatchedResult { id: result.id });
            }
            evaluations[slot] = Some(Evaluation {
                id: result.id,
                fitness: result.fitness,
                simulation: result.simulation,
            });
        }

        evaluations
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(Error::MissingResults { expected, received })
    }

    /// Reports and saves one evaluation, then consumes it from the budget.
    fn persist(
        &mut self,
        evaluation: Evaluation,
        origin: Origin,
        parameters: Vec<f64>,
    ) -> Result<(), Error> {
        self.status
            .report(self.evaluations, evaluation.fitness, &parameters);
        self.sink.save(Record::new(
            evaluation.id,
            self.evaluations,
            origin,
            evaluation.fitness,
            parameters,
            evaluation.simulation,
        ))?;
        self.evaluations += 1;

        Ok(())
    }

    fn conclude(&self, termination: Termination) -> Outcome {
        match termination {
            Termination::BudgetExhausted { .. } => tracing::info!(
                evaluations = self.evaluations,
                repetitions = self.config.repetitions,
                "Optimization terminated: evaluation budget exhausted"
            ),
            Termination::Converged { spread } => tracing::info!(
                evaluations = self.evaluations,
                spread,
                "Optimization terminated: population converged"
            ),
        }

        Outcome {
            best_fitness: self.status.best_fitness(),
            best_parameters: self.status.best_parameters().to_vec(),
            best_index: self.status.best_index(),
            evaluations: self.evaluations,
            generations: self.generations,
            termination,
        }
    }
}
