mod colony;
mod errors;
mod gateway;
mod phase;
mod sampler;
mod sink;

pub use errors::Error;
pub use gateway::{EvaluationGateway, EvaluationRequest, EvaluationResult, Pipeline};
pub use phase::Termination;
pub use sampler::{Outcome, Sampler, SamplerBuilder};
pub use sink::{MemorySink, Sink, SinkError};
