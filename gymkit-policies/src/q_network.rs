//! Q-learning with function approximation (unfinished)

use serde::{Deserialize, Serialize};

use gymkit_core::{Action, GymError, Observation, Policy, PolicyOptions, Result};

/// Configuration for the Q-network policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QNetworkConfig {
    /// Learning rate
    pub learning_rate: f64,
    /// Discount factor
    pub gamma: f64,
    /// Hidden layer widths
    pub hidden: Vec<usize>,
}

impl Default for QNetworkConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1e-3,
            gamma: 0.99,
            hidden: vec![64, 64],
        }
    }
}

/// Value-function-approximation policy.
///
/// Action selection is not implemented yet; `act` fails with
/// [`GymError::UnsupportedOperation`] instead of masking the gap with a
/// default action.
// TODO: value estimation and greedy action selection over the approximator.
pub struct QNetwork {
    config: QNetworkConfig,
}

impl QNetwork {
    /// Create a Q-network policy with the given configuration
    #[must_use]
    pub fn new(config: QNetworkConfig) -> Self {
        Self { config }
    }

    /// The policy configuration
    #[must_use]
    pub fn config(&self) -> &QNetworkConfig {
        &self.config
    }
}

impl Default for QNetwork {
    fn default() -> Self {
        Self::new(QNetworkConfig::default())
    }
}

impl Policy for QNetwork {
    fn act(&mut self, _observation: &Observation, _options: &PolicyOptions) -> Result<Action> {
        Err(GymError::UnsupportedOperation(
            "QNetwork action selection is not implemented".to_string(),
        ))
    }
}
