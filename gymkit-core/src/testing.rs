//! Minimal simulators backing the core unit tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    Action, GymError, Observation, Result, Simulator, Space, Step, StepInfo, TransitionModel,
    TransitionOutcome, Reward,
};

/// Deterministic chain MDP: action `a` advances the state by `a + 1`,
/// clamped to the final state, which is terminal. Every step pays 1.0.
/// Model-based: the full transition table is exposed.
pub(crate) struct ChainSim {
    n_states: usize,
    n_actions: usize,
    state: usize,
    model: TransitionModel,
    rng: StdRng,
}

impl ChainSim {
    pub(crate) fn new(n_states: usize, n_actions: usize) -> Self {
        assert!(n_states >= 2);
        let mut model = TransitionModel::new(n_states, n_actions);
        for state in 0..n_states {
            for action in 0..n_actions {
                let next = Self::advance(n_states, state, action);
                model.push(
                    state,
                    action,
                    TransitionOutcome {
                        probability: 1.0,
                        next_state: next,
                        reward: 1.0,
                        done: next == n_states - 1,
                    },
                );
            }
        }
        Self {
            n_states,
            n_actions,
            state: 0,
            model,
            rng: StdRng::from_entropy(),
        }
    }

    fn advance(n_states: usize, state: usize, action: usize) -> usize {
        (state + action + 1).min(n_states - 1)
    }
}

impl Simulator for ChainSim {
    fn action_space(&self) -> Space {
        Space::discrete(self.n_actions)
    }

    fn observation_space(&self) -> Space {
        Space::discrete(self.n_states)
    }

    fn seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }

    fn reset(&mut self) -> Result<Observation> {
        self.state = 0;
        Ok(Observation::index(0))
    }

    fn step(&mut self, action: &Action) -> Result<Step> {
        let action = action
            .discrete()
            .ok_or_else(|| GymError::Simulator("ChainSim expects a discrete action".to_string()))?;
        self.state = Self::advance(self.n_states, self.state, action);
        Ok(Step {
            observation: Observation::index(self.state),
            reward: Reward::new(1.0),
            done: self.state == self.n_states - 1,
            info: StepInfo::default(),
        })
    }

    fn sample_action(&mut self) -> Action {
        Action::Discrete(self.rng.gen_range(0..self.n_actions))
    }

    fn model(&self) -> Option<&TransitionModel> {
        Some(&self.model)
    }
}

/// Model-free simulator with a bounded observation space. Steps never
/// terminate and never move the observation off the origin.
pub(crate) struct OpaqueSim {
    dim: usize,
    rng: StdRng,
}

impl OpaqueSim {
    pub(crate) fn new(dim: usize) -> Self {
        Self {
            dim,
            rng: StdRng::from_entropy(),
        }
    }
}

impl Simulator for OpaqueSim {
    fn action_space(&self) -> Space {
        Space::discrete(2)
    }

    fn observation_space(&self) -> Space {
        Space::bounded(vec![-1.0; self.dim], vec![1.0; self.dim])
    }

    fn seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }

    fn reset(&mut self) -> Result<Observation> {
        Ok(Observation::vector(vec![0.0; self.dim]))
    }

    fn step(&mut self, _action: &Action) -> Result<Step> {
        Ok(Step {
            observation: Observation::vector(vec![0.0; self.dim]),
            reward: Reward::default(),
            done: false,
            info: StepInfo::default(),
        })
    }

    fn sample_action(&mut self) -> Action {
        Action::Discrete(self.rng.gen_range(0..2))
    }
}
