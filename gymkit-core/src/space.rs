//! Space descriptors and normalization

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Action, Observation};

/// Descriptor of an action or observation space.
///
/// Every simulator space maps to exactly one of three cases: an enumerated
/// set of `n` values, a per-dimension bounded range, or an unrecognized kind
/// of which only the declared shape is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Space {
    /// Enumerated space with `n` values, indexed `0..n`
    Discrete {
        /// Number of values in the space
        n: usize,
    },
    /// Bounded continuous space with per-dimension bounds
    Box {
        /// Lower bound for each dimension
        low: Vec<f64>,
        /// Upper bound for each dimension
        high: Vec<f64>,
        /// Declared shape of the space
        shape: Vec<usize>,
    },
    /// Unrecognized space kind of which only the shape is known
    Other {
        /// Declared shape of the space
        shape: Vec<usize>,
    },
}

impl Space {
    /// Create a discrete space with `n` values
    #[must_use]
    pub fn discrete(n: usize) -> Self {
        Self::Discrete { n }
    }

    /// Create a one-dimensional bounded space from per-dimension bounds.
    ///
    /// `low` and `high` must have equal length; the declared shape is the
    /// number of dimensions.
    #[must_use]
    pub fn bounded(low: Vec<f64>, high: Vec<f64>) -> Self {
        debug_assert_eq!(low.len(), high.len());
        let shape = vec![low.len()];
        Self::Box { low, high, shape }
    }

    /// Normalize the space into its canonical numeric array.
    ///
    /// Enumerated spaces become the ordered sequence `[0, 1, .., n-1]`;
    /// bounded spaces become their lower-bound vector (a shape/count source,
    /// not a usable action); anything else degrades to a zero-filled array
    /// matching the declared shape. Total: never fails for a well-formed
    /// descriptor.
    #[must_use]
    pub fn normalized(&self) -> Array1<f64> {
        match self {
            Self::Discrete { n } => Array1::from_iter((0..*n).map(|i| i as f64)),
            Self::Box { low, .. } => Array1::from_vec(low.clone()),
            Self::Other { shape } => Array1::zeros(shape.iter().product::<usize>()),
        }
    }

    /// Number of elements in the normalized array
    #[must_use]
    pub fn flat_dim(&self) -> usize {
        match self {
            Self::Discrete { n } => *n,
            Self::Box { low, .. } => low.len(),
            Self::Other { shape } => shape.iter().product(),
        }
    }

    /// Declared shape of the space
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Discrete { n } => vec![*n],
            Self::Box { shape, .. } | Self::Other { shape } => shape.clone(),
        }
    }

    /// Draw one action uniformly at random from the space.
    ///
    /// Unrecognized spaces have no sampling semantics and yield their
    /// zero-filled representative.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Action {
        match self {
            Self::Discrete { n } => Action::Discrete(rng.gen_range(0..*n)),
            Self::Box { low, high, .. } => {
                let values = low
                    .iter()
                    .zip(high)
                    .map(|(l, h)| rng.gen_range(*l..*h))
                    .collect();
                Action::Continuous(values)
            }
            Self::Other { shape } => {
                Action::Continuous(vec![0.0; shape.iter().product::<usize>()])
            }
        }
    }

    /// Check whether an action is a member of the space
    #[must_use]
    pub fn contains_action(&self, action: &Action) -> bool {
        match (self, action) {
            (Self::Discrete { n }, Action::Discrete(index)) => index < n,
            (Self::Box { low, high, .. }, Action::Continuous(values)) => {
                values.len() == low.len()
                    && values
                        .iter()
                        .zip(low)
                        .zip(high)
                        .all(|((x, l), h)| x >= l && x <= h)
            }
            (Self::Other { shape }, Action::Continuous(values)) => {
                values.len() == shape.iter().product::<usize>()
            }
            _ => false,
        }
    }

    /// Check whether an observation is a member of the space
    #[must_use]
    pub fn contains_observation(&self, observation: &Observation) -> bool {
        match self {
            Self::Discrete { n } => observation.as_index().map_or(false, |index| index < *n),
            Self::Box { low, high, .. } => {
                observation.len() == low.len()
                    && observation
                        .data
                        .iter()
                        .zip(low)
                        .zip(high)
                        .all(|((x, l), h)| x >= l && x <= h)
            }
            Self::Other { shape } => observation.len() == shape.iter().product::<usize>(),
        }
    }
}
