//! Policy contract

use crate::{Action, Observation, Result};

/// Open-ended keyword configuration forwarded to the policy on each query
pub type PolicyOptions = serde_json::Map<String, serde_json::Value>;

/// Decision function mapping observations to actions.
///
/// The core never inspects or stores policy internals; anything that can
/// answer `act` is a valid policy. Closures of the matching signature
/// satisfy the contract through a blanket implementation.
pub trait Policy: Send {
    /// Select an action for the given observation
    fn act(&mut self, observation: &Observation, options: &PolicyOptions) -> Result<Action>;
}

impl<F> Policy for F
where
    F: FnMut(&Observation, &PolicyOptions) -> Result<Action> + Send,
{
    fn act(&mut self, observation: &Observation, options: &PolicyOptions) -> Result<Action> {
        self(observation, options)
    }
}
