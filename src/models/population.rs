use super::{Bee, ParameterSpace};
use std::ops::{Index, IndexMut};
use tracing::instrument;

/// Fixed-size colony of bees.
///
/// The number of slots never changes after construction; phases only mutate
/// bees in place or reorder them.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    bees: Vec<Bee>,
}

impl Population {
    pub(crate) fn new(bees: Vec<Bee>) -> Self {
        Self { bees }
    }

    pub fn len(&self) -> usize {
        self.bees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bees.is_empty()
    }

    pub fn bees(&self) -> &[Bee] {
        &self.bees
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Bee> {
        self.bees.iter_mut()
    }

    /// Orders bees from worst to best current fitness.
    pub(crate) fn sort_by_fitness(&mut self) {
        self.bees
            .sort_by(|a, b| a.current_fitness.total_cmp(&b.current_fitness));
    }

    /// Normalized spread of the current positions.
    ///
    /// Widest population range over all dimensions, each divided by its
    /// parameter range. `1.0` means the bees span a whole dimension and the
    /// value only approaches `0.0` once every dimension has contracted.
    #[instrument(level = "debug", skip(self, space), fields(bees = self.len()))]
    pub fn spread(&self, space: &ParameterSpace) -> f64 {
        space
            .parameters()
            .iter()
            .enumerate()
            .map(|(dimension, parameter)| {
                let (min, max) = self.bees.iter().fold(
                    (f64::INFINITY, f64::NEG_INFINITY),
                    |(min, max), bee| {
                        let value = bee.current_position[dimension];
                        (min.min(value), max.max(value))
                    },
                );
                (max - min) / parameter.range()
            })
            .fold(0.0, f64::max)
    }
}

impl Index<usize> for Population {
    type Output = Bee;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bees[index]
    }
}

impl IndexMut<usize> for Population {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.bees[index]
    }
}
