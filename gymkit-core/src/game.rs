//! Environment wrapper

use chrono::{DateTime, Utc};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Action, EnvConfig, GymError, Observation, Registry, Result, Space, Step, TransitionOutcome,
};

/// Bookkeeping for one in-progress rollout.
///
/// Created on every reset, closed when the simulator reports a terminal
/// step or a new reset begins. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    /// Episode ID
    pub id: String,
    /// Running total reward
    pub total_reward: f64,
    /// Number of steps taken
    pub steps: usize,
    /// Whether the episode reached a terminal state
    pub done: bool,
    /// Start time
    pub start_time: DateTime<Utc>,
    /// End time, set on termination or the following reset
    pub end_time: Option<DateTime<Utc>>,
}

impl Episode {
    fn begin() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            total_reward: 0.0,
            steps: 0,
            done: false,
            start_time: Utc::now(),
            end_time: None,
        }
    }
}

/// Single point of interaction with one simulator session.
///
/// The wrapper owns the session for its entire lifetime, normalizes both
/// spaces at construction and tracks the current observation. Spaces never
/// change after construction.
pub struct Game {
    sim: Box<dyn crate::Simulator>,
    action_desc: Space,
    observation_desc: Space,
    actions: Array1<f64>,
    observations: Array1<f64>,
    state: Observation,
    episode: Episode,
}

impl Game {
    /// Create a wrapper for the simulator registered under `id`.
    ///
    /// Resolves the identifier through the registry, applies the optional
    /// deterministic seed, normalizes both spaces and performs the implicit
    /// first reset. Unknown identifiers and seeding faults surface as
    /// [`GymError::Initialization`].
    pub fn new(registry: &Registry, id: &str, config: &EnvConfig) -> Result<Self> {
        let sim = registry.create(id, config)?;
        Self::from_simulator(sim, config)
    }

    /// Create a wrapper around an already constructed simulator session
    pub fn from_simulator(mut sim: Box<dyn crate::Simulator>, config: &EnvConfig) -> Result<Self> {
        if let Some(seed) = config.seed {
            sim.seed(seed)
                .map_err(|err| GymError::Initialization(format!("Seeding failed: {}", err)))?;
        }

        let action_desc = sim.action_space();
        let observation_desc = sim.observation_space();
        let actions = action_desc.normalized();
        let observations = observation_desc.normalized();
        let state = sim.reset()?;

        tracing::debug!(
            n_actions = actions.len(),
            n_states = observations.len(),
            "environment initialized"
        );

        Ok(Self {
            sim,
            action_desc,
            observation_desc,
            actions,
            observations,
            state,
            episode: Episode::begin(),
        })
    }

    /// Discard the current episode and return a fresh initial observation
    pub fn reset(&mut self) -> Result<Observation> {
        let observation = self.sim.reset()?;
        self.state = observation.clone();
        if self.episode.end_time.is_none() {
            self.episode.end_time = Some(Utc::now());
        }
        self.episode = Episode::begin();
        Ok(observation)
    }

    /// Advance the simulation by one action.
    ///
    /// The action must be a member of the normalized action domain; the
    /// wrapper does not validate, matching simulator semantics. Invalid
    /// actions surface as [`GymError::Simulator`] from the underlying call.
    /// Updates the tracked state to the returned observation.
    pub fn step(&mut self, action: &Action) -> Result<Step> {
        let step = self.sim.step(action)?;
        self.state = step.observation.clone();

        self.episode.steps += 1;
        self.episode.total_reward += step.reward.value();
        if step.done {
            self.episode.done = true;
            self.episode.end_time = Some(Utc::now());
        }

        Ok(step)
    }

    /// Draw one action uniformly at random from the legal action space.
    ///
    /// Advances the session's rng but never the MDP state.
    pub fn sample(&mut self) -> Action {
        self.sim.sample_action()
    }

    /// Exact outcomes of taking `action` in `state`.
    ///
    /// Only discrete, model-based simulators expose transition
    /// probabilities; everything else fails with
    /// [`GymError::UnsupportedOperation`].
    pub fn transition(&self, state: usize, action: usize) -> Result<&[TransitionOutcome]> {
        let model = self.sim.model().ok_or_else(|| {
            GymError::UnsupportedOperation(
                "simulator does not expose a transition model".to_string(),
            )
        })?;
        model.outcomes(state, action).ok_or_else(|| {
            GymError::Simulator(format!(
                "No transition entry for state {} action {}",
                state, action
            ))
        })
    }

    /// Render the current state; a no-op when `suppress` is true
    pub fn render(&mut self, suppress: bool) -> Result<()> {
        if suppress {
            Ok(())
        } else {
            self.sim.render()
        }
    }

    /// Execute a bounded policy-driven rollout. See [`crate::runner::run`].
    pub fn run(
        &mut self,
        policy: &mut dyn crate::Policy,
        options: &crate::RunOptions,
    ) -> Result<crate::Reward> {
        crate::runner::run(self, policy, options)
    }

    /// Shape of the normalized action array
    #[must_use]
    pub fn action_space(&self) -> &[usize] {
        self.actions.shape()
    }

    /// Shape of the normalized observation array
    #[must_use]
    pub fn observation_space(&self) -> &[usize] {
        self.observations.shape()
    }

    /// Cardinality of the normalized action set
    #[must_use]
    pub fn n_actions(&self) -> usize {
        self.actions.len()
    }

    /// Cardinality of the normalized observation set
    #[must_use]
    pub fn n_states(&self) -> usize {
        self.observations.len()
    }

    /// The normalized action array
    #[must_use]
    pub fn actions(&self) -> &Array1<f64> {
        &self.actions
    }

    /// The normalized observation array
    #[must_use]
    pub fn observations(&self) -> &Array1<f64> {
        &self.observations
    }

    /// The current observation
    #[must_use]
    pub fn state(&self) -> &Observation {
        &self.state
    }

    /// Descriptor of the action space
    #[must_use]
    pub fn action_descriptor(&self) -> &Space {
        &self.action_desc
    }

    /// Descriptor of the observation space
    #[must_use]
    pub fn observation_descriptor(&self) -> &Space {
        &self.observation_desc
    }

    /// Bookkeeping for the episode begun by the latest reset
    #[must_use]
    pub fn episode(&self) -> &Episode {
        &self.episode
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("n_actions", &self.n_actions())
            .field("n_states", &self.n_states())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ChainSim, OpaqueSim};
    use crate::Simulator;

    fn chain_game() -> Game {
        let sim: Box<dyn Simulator> = Box::new(ChainSim::new(16, 4));
        Game::from_simulator(sim, &EnvConfig::seeded(0)).unwrap()
    }

    #[test]
    fn construction_normalizes_both_spaces() {
        let game = chain_game();
        assert_eq!(game.n_actions(), 4);
        assert_eq!(game.n_states(), 16);
        assert_eq!(game.actions().to_vec(), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(game.action_space(), &[4]);
        assert_eq!(game.observation_space(), &[16]);
    }

    #[test]
    fn construction_performs_an_implicit_reset() {
        let game = chain_game();
        assert_eq!(game.state().as_index(), Some(0));
        assert!(game
            .observation_descriptor()
            .contains_observation(game.state()));
        assert_eq!(game.episode().steps, 0);
    }

    #[test]
    fn reset_returns_a_member_of_the_observation_domain() {
        let mut game = chain_game();
        let observation = game.reset().unwrap();
        assert!(game
            .observation_descriptor()
            .contains_observation(&observation));
    }

    #[test]
    fn reset_is_idempotent_under_a_fixed_seed() {
        let mut game = chain_game();
        let first = game.reset().unwrap();
        let second = game.reset().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn step_updates_state_and_episode() {
        let mut game = chain_game();
        let step = game.step(&Action::Discrete(1)).unwrap();
        assert_eq!(game.state(), &step.observation);
        assert_eq!(game.episode().steps, 1);
        assert!((game.episode().total_reward - step.reward.value()).abs() < f64::EPSILON);
    }

    #[test]
    fn terminal_step_closes_the_episode() {
        let mut game = chain_game();
        // Chain of 16 states reaches the end in 5 steps of +3.
        for _ in 0..5 {
            game.step(&Action::Discrete(2)).unwrap();
        }
        assert!(game.episode().done);
        assert!(game.episode().end_time.is_some());
    }

    #[test]
    fn sample_stays_in_the_action_domain() {
        let mut game = chain_game();
        for _ in 0..50 {
            let action = game.sample();
            assert!(game.action_descriptor().contains_action(&action));
            let index = action.discrete().unwrap();
            assert!(index < game.n_actions());
        }
    }

    #[test]
    fn sample_does_not_touch_the_mdp_state() {
        let mut game = chain_game();
        let before = game.state().clone();
        game.sample();
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn transition_reports_exact_outcomes() {
        let game = chain_game();
        let outcomes = game.transition(0, 0).unwrap();
        assert!(!outcomes.is_empty());
        let mass: f64 = outcomes.iter().map(|o| o.probability).sum();
        assert!((mass - 1.0).abs() < 1e-9);
    }

    #[test]
    fn transition_fails_without_a_model() {
        let sim: Box<dyn Simulator> = Box::new(OpaqueSim::new(3));
        let game = Game::from_simulator(sim, &EnvConfig::default()).unwrap();
        let err = game.transition(0, 0).unwrap_err();
        assert!(matches!(err, GymError::UnsupportedOperation(_)));
    }

    #[test]
    fn transition_out_of_range_is_a_simulator_fault() {
        let game = chain_game();
        let err = game.transition(99, 0).unwrap_err();
        assert!(matches!(err, GymError::Simulator(_)));
    }

    #[test]
    fn suppressed_render_is_a_no_op() {
        let mut game = chain_game();
        game.render(true).unwrap();
        game.render(false).unwrap();
    }

    #[test]
    fn unknown_identifier_fails_at_construction() {
        let registry = Registry::new();
        let err = Game::new(&registry, "Missing-v0", &EnvConfig::default()).unwrap_err();
        assert!(matches!(err, GymError::Initialization(_)));
    }
}
