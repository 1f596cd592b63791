use crate::models::{Model, Objective};
use futures::future::BoxFuture;
use futures::{StreamExt, TryStreamExt, stream};
use tracing::instrument;
use uuid::Uuid;

/// A parameter vector submitted for evaluation, tagged with a unique id.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRequest {
    pub id: Uuid,
    pub parameters: Vec<f64>,
}

impl EvaluationRequest {
    pub(crate) fn new(parameters: Vec<f64>) -> Self {
        Self {
            id: Uuid::now_v7(),
            parameters,
        }
    }
}

/// The scored outcome of one [`EvaluationRequest`], correlated by id.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub id: Uuid,
    pub fitness: f64,
    pub simulation: Vec<f64>,
}

/// Maps a batch of parameter vectors to their fitness and simulation output.
///
/// Implementations may evaluate in any order and on any executor, but must
/// return exactly one result per request id. A failing evaluation fails the
/// whole batch.
pub trait EvaluationGateway: Send + Sync {
    fn evaluate_batch<'a>(
        &'a self,
        requests: Vec<EvaluationRequest>,
    ) -> BoxFuture<'a, Result<Vec<EvaluationResult>, anyhow::Error>>;
}

/// Gateway that runs a [`Model`] and scores its output with an [`Objective`].
///
/// Up to `parallelism` evaluations are in flight at once and results are
/// returned in completion order. A parallelism of one evaluates sequentially.
pub struct Pipeline<M, O> {
    model: M,
    objective: O,
    parallelism: usize,
}

impl<M, O> Pipeline<M, O>
where
    M: Model,
    O: Objective,
{
    pub fn new(model: M, objective: O) -> Self {
        Self {
            model,
            objective,
            parallelism: 1,
        }
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    #[instrument(level = "trace", skip(self, request), fields(id = %request.id))]
    async fn evaluate(
        &self,
        request: EvaluationRequest,
    ) -> Result<EvaluationResult, anyhow::Error> {
        let simulation = self.model.simulate(&request.parameters).await?;
        let fitness = self.objective.fitness(&simulation)?;

        Ok(EvaluationResult {
            id: request.id,
            fitness,
            simulation,
        })
    }
}

impl<M, O> EvaluationGateway for Pipeline<M, O>
where
    M: Model,
    O: Objective,
{
    fn evaluate_batch<'a>(
        &'a self,
        requests: Vec<EvaluationRequest>,
    ) -> BoxFuture<'a, Result<Vec<EvaluationResult>, anyhow::Error>> {
        Box::pin(async move {
            stream::iter(requests)
                .map(|request| self.evaluate(request))
                .buffer_unordered(self.parallelism)
                .try_collect::<Vec<_>>()
                .await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Sleeps longer for smaller inputs so that completion order inverts submission order.
    struct SlowModel;

    impl Model for SlowModel {
        fn simulate<'a>(
            &'a self,
            parameters: &'a [f64],
        ) -> BoxFuture<'a, Result<Vec<f64>, anyhow::Error>> {
            Box::pin(async move {
                let delay = 40 - 10 * parameters[0] as u64;
                tokio::time::sleep(Duration::from_millis(delay)).await;
                Ok(parameters.to_vec())
            })
        }
    }

    fn identity(simulation: &[f64]) -> Result<f64, anyhow::Error> {
        Ok(simulation[0])
    }

    #[tokio::test]
    async fn it_pairs_results_by_id_regardless_of_order() {
        let gateway = Pipeline::new(SlowModel, identity).with_parallelism(4);
        let requests: Vec<EvaluationRequest> = (0..4)
            .map(|i| EvaluationRequest::new(vec![i as f64]))
            .collect();
        let submitted: HashMap<Uuid, f64> = requests
            .iter()
            .map(|r| (r.id, r.parameters[0]))
            .collect();

        let results = gateway.evaluate_batch(requests).await.expect("evaluates");

        assert_eq!(results.len(), 4);
        for result in &results {
            assert_eq!(submitted[&result.id], result.fitness);
            assert_eq!(result.simulation, vec![result.fitness]);
        }
        // The slowest (first submitted) request completes last
        assert_eq!(results[3].fitness, 0.0);
    }

    #[tokio::test]
    async fn it_evaluates_sequentially_by_default() {
        let gateway = Pipeline::new(SlowModel, identity);
        let requests: Vec<EvaluationRequest> = (0..3)
            .map(|i| EvaluationRequest::new(vec![i as f64]))
            .collect();

        let results = gateway.evaluate_batch(requests).await.expect("evaluates");

        let order: Vec<f64> = results.iter().map(|r| r.fitness).collect();
        assert_eq!(gateway.parallelism(), 1);
        assert_eq!(order, vec![0.0, 1.0, 2.0]);
    }

    #[tokio::test]
    async fn it_fails_the_batch_when_an_objective_fails() {
        let objective = |simulation: &[f64]| -> Result<f64, anyhow::Error> {
            if simulation[0] > 1.0 {
                anyhow::bail!("observation mismatch");
            }
            Ok(simulation[0])
        };
        let model = |parameters: &[f64]| -> Result<Vec<f64>, anyhow::Error> {
            Ok(parameters.to_vec())
        };
        let gateway = Pipeline::new(model, objective).with_parallelism(2);

        let result = gateway
            .evaluate_batch(vec![
                EvaluationRequest::new(vec![0.5]),
                EvaluationRequest::new(vec![2.0]),
            ])
            .await;

        assert_eq!(
            result.expect_err("fails").to_string(),
            "observation mismatch"
        );
    }

    #[tokio::test]
    async fn it_accepts_empty_batches() {
        let gateway = Pipeline::new(SlowModel, identity);

        let results = gateway.evaluate_batch(vec![]).await;

        assert!(results.expect("evaluates").is_empty());
    }
}
