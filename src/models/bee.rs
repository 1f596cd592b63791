/// Outcome of comparing a bee's candidate against its current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
}

/// One population slot: a food source being exploited and the neighbour last tried.
///
/// Positions are owned vectors; accepting a candidate copies it, so mutating
/// the candidate never touches the current position.
#[derive(Debug, Clone, PartialEq)]
pub struct Bee {
    pub(crate) current_fitness: f64,
    pub(crate) current_position: Vec<f64>,
    pub(crate) candidate_fitness: f64,
    pub(crate) candidate_position: Vec<f64>,
    pub(crate) stagnation: usize,
    pub(crate) scaled_fitness: f64,
}

impl Bee {
    pub(crate) fn new(position: Vec<f64>, fitness: f64) -> Self {
        Self {
            current_fitness: fitness,
            candidate_position: position.clone(),
            current_position: position,
            candidate_fitness: fitness,
            stagnation: 0,
            scaled_fitness: 0.0,
        }
    }

    pub fn current_fitness(&self) -> f64 {
        self.current_fitness
    }

    pub fn current_position(&self) -> &[f64] {
        &self.current_position
    }

    pub fn candidate_fitness(&self) -> f64 {
        self.candidate_fitness
    }

    pub fn candidate_position(&self) -> &[f64] {
        &self.candidate_position
    }

    pub fn stagnation(&self) -> usize {
        self.stagnation
    }

    pub fn scaled_fitness(&self) -> f64 {
        self.scaled_fitness
    }

    /// Scores the candidate and keeps it only on strict improvement.
    pub(crate) fn consider(&mut self, fitness: f64) -> Verdict {
        self.candidate_fitness = fitness;

        if fitness > self.current_fitness {
            self.current_position.clone_from(&self.candidate_position);
            self.current_fitness = fitness;
            self.stagnation = 0;
            Verdict::Accepted
        } else {
            self.stagnation += 1;
            Verdict::Rejected
        }
    }

    /// Abandons the food source for a freshly scouted one, whatever its fitness.
    pub(crate) fn relocate(&mut self, position: Vec<f64>, fitness: f64) {
        self.candidate_position.clone_from(&position);
        self.candidate_fitness = fitness;
        self.current_position = position;
        self.current_fitness = fitness;
        self.stagnation = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_starts_with_matching_current_and_candidate() {
        let bee = Bee::new(vec![1.0, 2.0], -3.0);

        assert_eq!(bee.current_position(), bee.candidate_position());
        assert_eq!(bee.current_fitness(), bee.candidate_fitness());
        assert_eq!(bee.stagnation(), 0);
    }

    #[test]
    fn it_accepts_strict_improvements() {
        let mut bee = Bee::new(vec![1.0, 2.0], -3.0);
        bee.stagnation = 4;
        bee.candidate_position[1] = 2.5;

        assert_eq!(bee.consider(-1.0), Verdict::Accepted);
        assert_eq!(bee.current_position(), &[1.0, 2.5]);
        assert_eq!(bee.current_fitness(), -1.0);
        assert_eq!(bee.stagnation(), 0);
    }

    #[test]
    fn it_rejects_ties_and_regressions() {
        let mut bee = Bee::new(vec![1.0, 2.0], -3.0);
        bee.candidate_position[0] = 9.0;

        assert_eq!(bee.consider(-3.0), Verdict::Rejected);
        assert_eq!(bee.consider(-7.0), Verdict::Rejected);
        assert_eq!(bee.consider(f64::NAN), Verdict::Rejected);

        assert_eq!(bee.current_position(), &[1.0, 2.0]);
        assert_eq!(bee.current_fitness(), -3.0);
        assert_eq!(bee.candidate_position(), &[9.0, 2.0]);
        assert_eq!(bee.stagnation(), 3);
    }

    #[test]
    fn it_does_not_alias_candidate_and_current() {
        let mut bee = Bee::new(vec![0.0], 0.0);
        bee.candidate_position[0] = 1.0;
        bee.consider(1.0);

        bee.candidate_position[0] = 5.0;

        assert_eq!(bee.current_position(), &[1.0]);
    }

    #[test]
    fn it_never_decreases_fitness_when_considering() {
        let mut bee = Bee::new(vec![0.0], 0.0);
        let mut previous = bee.current_fitness();

        for fitness in [0.5, -1.0, 0.2, 0.9, 0.9, -4.0, 1.3] {
            bee.consider(fitness);
            assert!(bee.current_fitness() >= previous);
            previous = bee.current_fitness();
        }

        assert_eq!(bee.current_fitness(), 1.3);
    }

    #[test]
    fn it_relocates_unconditionally() {
        let mut bee = Bee::new(vec![1.0, 1.0], 10.0);
        bee.stagnation = 6;

        bee.relocate(vec![4.0, 2.0], -2.0);

        assert_eq!(bee.current_position(), &[4.0, 2.0]);
        assert_eq!(bee.candidate_position(), &[4.0, 2.0]);
        assert_eq!(bee.current_fitness(), -2.0);
        assert_eq!(bee.stagnation(), 0);
    }
}
