use futures::future::{self, BoxFuture};
use std::sync::Arc;

/// Simulation model under calibration: maps a parameter vector to simulated outputs.
pub trait Model: Send + Sync {
    fn simulate<'a>(
        &'a self,
        parameters: &'a [f64],
    ) -> BoxFuture<'a, Result<Vec<f64>, anyhow::Error>>;
}

/// Objective function scoring a simulation against the observations it encloses.
/// Higher is better.
pub trait Objective: Send + Sync {
    fn fitness(&self, simulation: &[f64]) -> Result<f64, anyhow::Error>;
}

impl<F> Model for F
where
    F: Fn(&[f64]) -> Result<Vec<f64>, anyhow::Error> + Send + Sync,
{
    fn simulate<'a>(
        &'a self,
        parameters: &'a [f64],
    ) -> BoxFuture<'a, Result<Vec<f64>, anyhow::Error>> {
        Box::pin(future::ready(self(parameters)))
    }
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> Result<f64, anyhow::Error> + Send + Sync,
{
    fn fitness(&self, simulation: &[f64]) -> Result<f64, anyhow::Error> {
        self(simulation)
    }
}

/// Runs a synchronous, CPU-bound model on the blocking thread pool so that
/// concurrent evaluations use several cores.
pub struct Blocking<F> {
    model: Arc<F>,
}

impl<F> Blocking<F>
where
    F: Fn(&[f64]) -> Result<Vec<f64>, anyhow::Error> + Send + Sync + 'static,
{
    pub fn new(model: F) -> Self {
        Self {
            model: Arc::new(model),
        }
    }
}

impl<F> Model for Blocking<F>
where
    F: Fn(&[f64]) -> Result<Vec<f64>, anyhow::Error> + Send + Sync + 'static,
{
    fn simulate<'a>(
        &'a self,
        parameters: &'a [f64],
    ) -> BoxFuture<'a, Result<Vec<f64>, anyhow::Error>> {
        let model = Arc::clone(&self.model);
        let parameters = parameters.to_vec();

        Box::pin(async move { tokio::task::spawn_blocking(move || (*model)(&parameters)).await? })
    }
}
