use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The phase that produced an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    Initial,
    Employed,
    Onlooker,
    Scout,
}

/// One evaluated parameter vector, as handed to the persistence sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    /// Number of evaluations consumed before this one.
    pub chain: usize,
    pub origin: Origin,
    pub fitness: f64,
    pub parameters: Vec<f64>,
    pub simulation: Vec<f64>,
    pub evaluated_at: DateTime<Utc>,
}

impl Record {
    pub(crate) fn new(
        id: Uuid,
        chain: usize,
        origin: Origin,
        fitness: f64,
        parameters: Vec<f64>,
        simulation: Vec<f64>,
    ) -> Self {
        Self {
            id,
            chain,
            origin,
            fitness,
            parameters,
            simulation,
            evaluated_at: Utc::now(),
        }
    }
}
