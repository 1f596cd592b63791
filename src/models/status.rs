use tracing::instrument;

/// Best-so-far tracker of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    best_fitness: f64,
    best_parameters: Vec<f64>,
    best_index: Option<usize>,
    reported: usize,
}

impl Default for Status {
    fn default() -> Self {
        Self::new()
    }
}

impl Status {
    pub fn new() -> Self {
        Self {
            best_fitness: f64::NEG_INFINITY,
            best_parameters: Vec::new(),
            best_index: None,
            reported: 0,
        }
    }

    /// Registers an evaluation and returns the best fitness seen so far.
    #[instrument(level = "trace", skip(self, parameters))]
    pub fn report(&mut self, index: usize, fitness: f64, parameters: &[f64]) -> f64 {
        self.reported += 1;

        if fitness > self.best_fitness {
            tracing::debug!(index, fitness, previous = self.best_fitness, "New best fitness");
            self.best_fitness = fitness;
            self.best_parameters = parameters.to_vec();
            self.best_index = Some(index);
        }

        self.best_fitness
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    pub fn best_parameters(&self) -> &[f64] {
        &self.best_parameters
    }

    /// Evaluation index at which the best fitness was found.
    pub fn best_index(&self) -> Option<usize> {
        self.best_index
    }

    pub fn reported(&self) -> usize {
        self.reported
    }
}
