//! Episode runner

use serde::{Deserialize, Serialize};

use crate::{Game, Policy, PolicyOptions, Result, Reward};

/// Options controlling one rollout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOptions {
    /// Safety cap on interaction steps within the rollout.
    ///
    /// Termination on `done` is what defines the episode boundary; this cap
    /// only bounds simulators that never signal termination.
    pub episodes: usize,
    /// Whether to render on every iteration
    pub render: bool,
    /// Keyword configuration forwarded to the policy on every query
    #[serde(flatten)]
    pub policy_options: PolicyOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            episodes: 100,
            render: false,
            policy_options: PolicyOptions::new(),
        }
    }
}

impl RunOptions {
    /// Options with a step cap and everything else at its default
    #[must_use]
    pub fn with_episodes(episodes: usize) -> Self {
        Self {
            episodes,
            ..Self::default()
        }
    }
}

/// Drive one policy-driven rollout to termination or budget exhaustion.
///
/// Resets the environment, then repeatedly queries the policy and steps the
/// simulation, accumulating rewards, until the simulator reports `done` or
/// `options.episodes` iterations have run. A zero budget returns zero reward
/// with no steps taken. Failures from the policy or the simulator propagate
/// uncaught.
pub fn run(game: &mut Game, policy: &mut dyn Policy, options: &RunOptions) -> Result<Reward> {
    let mut observation = game.reset()?;
    let mut total = Reward::default();

    for _ in 0..options.episodes {
        game.render(!options.render)?;

        let action = policy.act(&observation, &options.policy_options)?;
        let step = game.step(&action)?;
        total += step.reward;
        observation = step.observation;

        if step.done {
            break;
        }
    }

    tracing::debug!(
        total_reward = total.value(),
        steps = game.episode().steps,
        done = game.episode().done,
        "rollout finished"
    );

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ChainSim;
    use crate::{Action, EnvConfig, GymError, Observation, Simulator};

    fn chain_game(n_states: usize) -> Game {
        let sim: Box<dyn Simulator> = Box::new(ChainSim::new(n_states, 2));
        Game::from_simulator(sim, &EnvConfig::seeded(0)).unwrap()
    }

    #[test]
    fn zero_budget_returns_zero_without_interaction() {
        let mut game = chain_game(4);
        let mut policy = |_: &Observation, _: &PolicyOptions| -> crate::Result<Action> {
            panic!("policy must not be queried")
        };

        let total = run(&mut game, &mut policy, &RunOptions::with_episodes(0)).unwrap();
        assert_eq!(total, Reward::default());
        assert_eq!(game.episode().steps, 0);
        assert_eq!(game.state().as_index(), Some(0));
    }

    #[test]
    fn rollout_accumulates_until_done() {
        let mut game = chain_game(4);
        let mut policy = |_: &Observation, _: &PolicyOptions| Ok(Action::Discrete(0));

        // 0 -> 1 -> 2 -> 3: terminal after three steps, one reward each.
        let total = run(&mut game, &mut policy, &RunOptions::default()).unwrap();
        assert!((total.value() - 3.0).abs() < f64::EPSILON);
        assert_eq!(game.episode().steps, 3);
        assert!(game.episode().done);
    }

    #[test]
    fn budget_caps_non_terminating_rollouts() {
        let mut game = chain_game(100);
        let mut policy = |_: &Observation, _: &PolicyOptions| Ok(Action::Discrete(0));

        let total = run(&mut game, &mut policy, &RunOptions::with_episodes(2)).unwrap();
        assert!((total.value() - 2.0).abs() < f64::EPSILON);
        assert_eq!(game.episode().steps, 2);
        assert!(!game.episode().done);
    }

    #[test]
    fn policy_failure_propagates_after_one_step() {
        let mut game = chain_game(100);
        let mut calls = 0usize;
        let mut policy = move |_: &Observation, _: &PolicyOptions| {
            calls += 1;
            if calls == 2 {
                Err(GymError::Simulator("policy gave up".to_string()))
            } else {
                Ok(Action::Discrete(0))
            }
        };

        let err = run(&mut game, &mut policy, &RunOptions::with_episodes(5)).unwrap_err();
        assert!(matches!(err, GymError::Simulator(_)));
        assert_eq!(game.episode().steps, 1);
    }

    #[test]
    fn policy_options_are_forwarded_verbatim() {
        let mut game = chain_game(4);
        let mut options = RunOptions::with_episodes(1);
        options
            .policy_options
            .insert("epsilon".to_string(), serde_json::json!(0.1));

        let mut policy = |_: &Observation, opts: &PolicyOptions| {
            assert_eq!(opts.get("epsilon"), Some(&serde_json::json!(0.1)));
            Ok(Action::Discrete(0))
        };
        run(&mut game, &mut policy, &options).unwrap();
    }

    #[test]
    fn game_run_delegates_to_the_runner() {
        let mut game = chain_game(4);
        let mut policy = |_: &Observation, _: &PolicyOptions| Ok(Action::Discrete(0));
        let total = game.run(&mut policy, &RunOptions::default()).unwrap();
        assert!((total.value() - 3.0).abs() < f64::EPSILON);
    }
}
