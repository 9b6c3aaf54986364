//! Canonical action representation

use serde::{Deserialize, Serialize};

/// An action in canonical numeric form.
///
/// Discrete simulators take an index into their enumerated action set;
/// continuous simulators take one value per action dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Index into an enumerated action set
    Discrete(usize),
    /// One value per dimension of a bounded action space
    Continuous(Vec<f64>),
}

impl Action {
    /// Convert the action to a flat vector representation
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Self::Discrete(index) => vec![*index as f64],
            Self::Continuous(values) => values.clone(),
        }
    }

    /// The action index, if this is a discrete action
    #[must_use]
    pub fn discrete(&self) -> Option<usize> {
        match self {
            Self::Discrete(index) => Some(*index),
            Self::Continuous(_) => None,
        }
    }
}

impl From<usize> for Action {
    fn from(index: usize) -> Self {
        Self::Discrete(index)
    }
}

impl From<Vec<f64>> for Action {
    fn from(values: Vec<f64>) -> Self {
        Self::Continuous(values)
    }
}
