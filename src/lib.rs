//! Fitness-scaled chaotic artificial bee colony (FSCABC) optimization.
//!
//! A [`Sampler`] maximizes the fitness of a model over a bounded
//! [`ParameterSpace`](models::ParameterSpace). Evaluations are delegated to an
//! [`EvaluationGateway`](sampler::EvaluationGateway) and every one of them is
//! handed to a [`Sink`](sampler::Sink).
//!
//! ```no_run
//! use fscabc::models::{ParameterSpace, RunConfig};
//! use fscabc::sampler::{MemorySink, Pipeline, Sampler};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let space = ParameterSpace::from_bounds([("x", 0.0, 10.0), ("y", 0.0, 10.0)])?;
//! let model = |p: &[f64]| -> Result<Vec<f64>, anyhow::Error> { Ok(p.to_vec()) };
//! let objective = |s: &[f64]| -> Result<f64, anyhow::Error> {
//!     Ok(-s.iter().map(|v| (v - 5.0).powi(2)).sum::<f64>())
//! };
//!
//! let mut sampler = Sampler::builder(space)
//!     .gateway(Pipeline::new(model, objective))
//!     .sink(MemorySink::new())
//!     .build();
//! let outcome = sampler.sample(&RunConfig::new(1000).with_employed_bees(16)).await?;
//! println!("{:?}", outcome.best_parameters);
//! # Ok(())
//! # }
//! ```
mod builder;

pub mod models;
pub mod sampler;

pub use sampler::{Outcome, Sampler};
