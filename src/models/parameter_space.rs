use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ParameterError {
    #[error(
        "InvalidBounds: lower bound must be smaller than upper and the width finite. name = {name}, lower = {lower}, upper = {upper}"
    )]
    InvalidBound { name: String, lower: f64, upper: f64 },
    #[error("EmptySpace: a parameter space needs at least one parameter")]
    Empty,
}

impl ParameterError {
    pub(crate) fn invalid_bound(name: &str, lower: f64, upper: f64) -> Self {
        Self::InvalidBound {
            name: name.to_string(),
            lower,
            upper,
        }
    }
}

/// A single free model parameter and its feasible interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub(crate) name: String,
    pub(crate) lower: f64,
    pub(crate) upper: f64,
}

impl Parameter {
    #[instrument(level = "debug", fields(name = name, lower = lower, upper = upper))]
    pub fn new(name: &str, lower: f64, upper: f64) -> Result<Self, ParameterError> {
        // Rejects non-finite bounds as well, since their width is never finite
        if lower >= upper || !(upper - lower).is_finite() {
            return Err(ParameterError::invalid_bound(name, lower, upper));
        }

        Ok(Self {
            name: name.to_string(),
            lower,
            upper,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn range(&self) -> f64 {
        self.upper - self.lower
    }

    /// Maps a sample from the unit interval onto this parameter's interval.
    pub fn from_unit(&self, sample: f64) -> f64 {
        self.lower + sample * self.range()
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    pub fn random<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.lower..=self.upper)
    }
}

/// The search space of a calibration: one bounded interval per free parameter.
///
/// Immutable once built, shared read-only by every phase of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpace {
    parameters: Vec<Parameter>,
}

impl ParameterSpace {
    #[instrument(level = "debug", fields(dimensions = parameters.len()))]
    pub fn new(parameters: Vec<Parameter>) -> Result<Self, ParameterError> {
        if parameters.is_empty() {
            return Err(ParameterError::Empty);
        }

        Ok(Self { parameters })
    }

    /// Builds a space from `(name, lower, upper)` triples.
    pub fn from_bounds<'a>(
        bounds: impl IntoIterator<Item = (&'a str, f64, f64)>,
    ) -> Result<Self, ParameterError> {
        let parameters = bounds
            .into_iter()
            .map(|(name, lower, upper)| Parameter::new(name, lower, upper))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(parameters)
    }

    pub fn dimensions(&self) -> usize {
        self.parameters.len()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, dimension: usize) -> &Parameter {
        &self.parameters[dimension]
    }

    pub fn names(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.name.clone()).collect()
    }

    /// Draws a uniformly random feasible vector.
    #[instrument(level = "debug", skip(self, rng), fields(dimensions = self.dimensions()))]
    pub fn random<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.parameters.iter().map(|p| p.random(rng)).collect()
    }

    pub fn contains(&self, position: &[f64]) -> bool {
        position.len() == self.dimensions()
            && self
                .parameters
                .iter()
                .zip(position)
                .all(|(parameter, value)| parameter.contains(*value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn it_rejects_inverted_and_degenerate_bounds() {
        assert_eq!(
            Parameter::new("x", 2.0, 1.0),
            Err(ParameterError::invalid_bound("x", 2.0, 1.0))
        );
        assert!(Parameter::new("x", 1.0, 1.0).is_err());
        assert!(Parameter::new("x", f64::NEG_INFINITY, 1.0).is_err());
        assert!(Parameter::new("x", 0.0, f64::NAN).is_err());
    }

    #[test]
    fn it_rejects_bounds_wider_than_representable() {
        assert_eq!(
            ParameterSpace::from_bounds([("x", -1e308, 1e308)]),
            Err(ParameterError::invalid_bound("x", -1e308, 1e308))
        );

        let parameter = Parameter::new("x", -1e307, 1e307).expect("width is finite");
        let mut rng = StdRng::seed_from_u64(3);
        assert!(parameter.contains(parameter.random(&mut rng)));
        assert!(parameter.from_unit(0.5).is_finite());
    }

    #[test]
    fn it_rejects_an_empty_space() {
        assert_eq!(ParameterSpace::new(vec![]), Err(ParameterError::Empty));
    }

    #[test]
    fn it_draws_random_vectors_within_bounds() {
        let space =
            ParameterSpace::from_bounds([("x", -1.0, 1.0), ("y", 10.0, 20.0)]).expect("is valid");
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let position = space.random(&mut rng);
            assert_eq!(position.len(), 2);
            assert!(space.contains(&position));
        }
    }

    #[test]
    fn it_maps_unit_samples_onto_the_interval() {
        let parameter = Parameter::new("k", 2.0, 6.0).expect("is valid");

        assert_eq!(parameter.from_unit(0.0), 2.0);
        assert_eq!(parameter.from_unit(0.5), 4.0);
        assert_eq!(parameter.from_unit(1.0), 6.0);
    }

    #[test]
    fn it_clamps_to_bounds() {
        let parameter = Parameter::new("k", 0.0, 1.0).expect("is valid");

        assert_eq!(parameter.clamp(-0.2), 0.0);
        assert_eq!(parameter.clamp(0.3), 0.3);
        assert_eq!(parameter.clamp(1.7), 1.0);
    }

    #[test]
    fn it_exposes_names() {
        let space =
            ParameterSpace::from_bounds([("alpha", 0.0, 1.0), ("beta", -5.0, 5.0)]).expect("valid");

        assert_eq!(space.names(), vec!["alpha".to_string(), "beta".to_string()]);
        assert!(!space.contains(&[0.5]));
    }
}
