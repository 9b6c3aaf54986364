//! Simulator collaborator contract

use serde::{Deserialize, Serialize};

use crate::{Action, Observation, Result, Reward, Space};

/// Result of a single simulator step
#[derive(Debug, Clone)]
pub struct Step {
    /// Observation after the step
    pub observation: Observation,
    /// Reward signal
    pub reward: Reward,
    /// Whether the episode is done
    pub done: bool,
    /// Additional info from the simulator
    pub info: StepInfo,
}

/// Additional information attached to a step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepInfo {
    /// Custom fields
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Configuration for simulator construction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Random seed
    pub seed: Option<u64>,
    /// Additional parameters
    #[serde(flatten)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

impl EnvConfig {
    /// Configuration with a deterministic seed and no extra parameters
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            params: serde_json::Map::new(),
        }
    }
}

/// One possible outcome of taking an action in a state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    /// Probability of this outcome
    pub probability: f64,
    /// State reached by this outcome
    pub next_state: usize,
    /// Reward received on this outcome
    pub reward: f64,
    /// Whether this outcome ends the episode
    pub done: bool,
}

/// Dense transition table for model-based simulators.
///
/// Indexed by `[state][action]`, each entry is the ordered sequence of
/// possible outcomes whose probabilities sum to one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionModel {
    outcomes: Vec<Vec<Vec<TransitionOutcome>>>,
}

impl TransitionModel {
    /// Create an empty model for `n_states` states and `n_actions` actions
    #[must_use]
    pub fn new(n_states: usize, n_actions: usize) -> Self {
        Self {
            outcomes: vec![vec![Vec::new(); n_actions]; n_states],
        }
    }

    /// Append one outcome to a state/action entry
    pub fn push(&mut self, state: usize, action: usize, outcome: TransitionOutcome) {
        self.outcomes[state][action].push(outcome);
    }

    /// The ordered outcomes of taking `action` in `state`, if in range
    #[must_use]
    pub fn outcomes(&self, state: usize, action: usize) -> Option<&[TransitionOutcome]> {
        self.outcomes
            .get(state)
            .and_then(|actions| actions.get(action))
            .map(Vec::as_slice)
    }

    /// Number of states covered by the model
    #[must_use]
    pub fn n_states(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of actions covered by the model
    #[must_use]
    pub fn n_actions(&self) -> usize {
        self.outcomes.first().map_or(0, Vec::len)
    }
}

/// Contract every simulation backend must satisfy.
///
/// One value of this trait is one simulator session; the environment wrapper
/// owns it for its entire lifetime. All calls are blocking.
pub trait Simulator: Send {
    /// Descriptor of the action space
    fn action_space(&self) -> Space;

    /// Descriptor of the observation space
    fn observation_space(&self) -> Space;

    /// Apply a deterministic seed to the session's randomness
    fn seed(&mut self, seed: u64) -> Result<()>;

    /// Start a fresh episode and return the initial observation
    fn reset(&mut self) -> Result<Observation>;

    /// Advance the simulation by one action
    fn step(&mut self, action: &Action) -> Result<Step>;

    /// Draw one action uniformly at random from the action space
    fn sample_action(&mut self) -> Action;

    /// Render the current state (optional)
    fn render(&mut self) -> Result<()> {
        Ok(())
    }

    /// Exact transition probabilities, for model-based simulators only
    fn model(&self) -> Option<&TransitionModel> {
        None
    }
}
