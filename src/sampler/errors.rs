use super::SinkError;
use crate::models::ConfigError;
use uuid::Uuid;

/// Errors that abort a sampling run.
///
/// Records saved before the failure stay in the sink.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("ConfigError: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("EvaluationError: {0}")]
    EvaluationError(#[from] anyhow::Error),
    #[error("SinkError: {0}")]
    SinkError(#[from] SinkError),
    #[error("UnmatchedResult: the gateway returned an unknown or duplicate id. id={id}")]
    UnmatchedResult { id: Uuid },
    #[error("MissingResults: expected={expected}, received={received}")]
    MissingResults { expected: usize, received: usize },
}
