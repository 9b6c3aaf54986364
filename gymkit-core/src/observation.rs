//! Canonical observation representation

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// An observation from a simulator in canonical numeric form.
///
/// Discrete simulators report their state index as a single-element array;
/// everything else is a feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// The observation data
    pub data: Array1<f64>,
}

impl Observation {
    /// Create an observation from a feature vector
    #[must_use]
    pub fn vector(data: Vec<f64>) -> Self {
        Self {
            data: Array1::from_vec(data),
        }
    }

    /// Create a single-element observation carrying a state index
    #[must_use]
    pub fn index(index: usize) -> Self {
        Self {
            data: Array1::from_vec(vec![index as f64]),
        }
    }

    /// The state index, if this observation is a single integral value
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        if self.data.len() != 1 {
            return None;
        }
        let value = self.data[0];
        if value >= 0.0 && value.fract() == 0.0 {
            Some(value as usize)
        } else {
            None
        }
    }

    /// Convert the observation to a flat vector
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.to_vec()
    }

    /// Number of elements in the observation
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the observation is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Shape of the observation array
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }
}

impl From<Array1<f64>> for Observation {
    fn from(data: Array1<f64>) -> Self {
        Self { data }
    }
}
