use crate::models::Record;
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("SinkClosed: the sink was finalized and no longer accepts records")]
    Closed,
    #[error("SinkBackendError: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Destination of every evaluation performed during a run.
///
/// `initialize` and `finalize` are optional; the defaults do nothing.
pub trait Sink: Send {
    /// Called once with the parameter names, before the first record.
    fn initialize(&mut self, _names: &[String]) -> Result<(), SinkError> {
        Ok(())
    }

    fn save(&mut self, record: Record) -> Result<(), SinkError>;

    /// Flushes and closes the sink once the run has ended.
    fn finalize(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    names: Vec<String>,
    records: Vec<Record>,
    discard_simulations: bool,
    finalized: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores records with an empty simulation output.
    pub fn without_simulations(mut self) -> Self {
        self.discard_simulations = true;
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// The earliest record with the highest fitness.
    pub fn best(&self) -> Option<&Record> {
        self.records
            .iter()
            .filter(|record| !record.fitness.is_nan())
            .fold(None, |best: Option<&Record>, record| match best {
                Some(best) if best.fitness >= record.fitness => Some(best),
                _ => Some(record),
            })
    }
}

impl Sink for MemorySink {
    fn initialize(&mut self, names: &[String]) -> Result<(), SinkError> {
        self.names = names.to_vec();
        Ok(())
    }

    fn save(&mut self, mut record: Record) -> Result<(), SinkError> {
        if self.finalized {
            return Err(SinkError::Closed);
        }

        if self.discard_simulations {
            record.simulation = Vec::new();
        }
        self.records.push(record);
        Ok(())
    }

    #[instrument(level = "debug", skip(self), fields(records = self.records.len()))]
    fn finalize(&mut self) -> Result<(), SinkError> {
        self.finalized = true;
        Ok(())
    }
}
