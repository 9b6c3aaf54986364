//! End-to-end rollout scenarios driving the builtin simulators through the
//! environment wrapper and episode runner.

use approx::assert_relative_eq;
use gymkit_core::{
    Action, EnvConfig, Game, GymError, Observation, PolicyOptions, Result, Reward, RunOptions,
};
use gymkit_envs::{default_registry, names};

fn frozen_lake(seed: u64) -> Game {
    Game::new(
        &default_registry(),
        names::toy_text::FROZEN_LAKE,
        &EnvConfig::seeded(seed),
    )
    .unwrap()
}

fn cart_pole(seed: u64) -> Game {
    Game::new(
        &default_registry(),
        names::classic_control::CART_POLE,
        &EnvConfig::seeded(seed),
    )
    .unwrap()
}

#[test]
fn grid_environment_exposes_its_cardinalities() {
    let game = frozen_lake(0);
    assert_eq!(game.n_actions(), 4);
    assert_eq!(game.n_states(), 16);
    assert_eq!(game.actions().to_vec(), vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(game.action_space(), &[4]);
    assert_eq!(game.observation_space(), &[16]);
}

#[test]
fn single_step_rollout_returns_that_steps_reward() {
    let mut game = frozen_lake(0);
    let mut policy = |_: &Observation, _: &PolicyOptions| Ok(Action::Discrete(0));

    let total = game
        .run(&mut policy, &RunOptions::with_episodes(1))
        .unwrap();
    assert_eq!(game.episode().steps, 1);
    // No move out of the start corner reaches the goal.
    assert_relative_eq!(total.value(), 0.0);
}

#[test]
fn zero_episode_budget_leaves_the_environment_reset() {
    let mut game = frozen_lake(0);
    let mut policy = |_: &Observation, _: &PolicyOptions| -> Result<Action> {
        panic!("policy must not be queried")
    };

    let total = game
        .run(&mut policy, &RunOptions::with_episodes(0))
        .unwrap();
    assert_eq!(total, Reward::default());
    assert_eq!(game.episode().steps, 0);
    assert_eq!(game.state().as_index(), Some(0));
}

#[test]
fn reset_observation_is_a_member_of_the_observation_domain() {
    let mut lake = frozen_lake(3);
    let observation = lake.reset().unwrap();
    assert!(lake
        .observation_descriptor()
        .contains_observation(&observation));

    let mut pole = cart_pole(3);
    let observation = pole.reset().unwrap();
    assert!(pole
        .observation_descriptor()
        .contains_observation(&observation));
}

#[test]
fn reset_is_idempotent_under_a_fixed_seed() {
    let mut pole = cart_pole(42);
    let first = pole.reset().unwrap();
    let second = pole.reset().unwrap();
    assert_eq!(first, second);

    let mut other = cart_pole(42);
    assert_eq!(other.reset().unwrap(), first);
}

#[test]
fn sampled_actions_stay_inside_the_action_domain() {
    let mut game = frozen_lake(1);
    for _ in 0..100 {
        let index = game.sample().discrete().unwrap();
        assert!(index < game.n_actions());
    }
}

#[test]
fn transition_probabilities_sum_to_one() {
    let game = frozen_lake(0);
    let outcomes = game.transition(0, 0).unwrap();
    assert!(!outcomes.is_empty());
    let mass: f64 = outcomes.iter().map(|o| o.probability).sum();
    assert_relative_eq!(mass, 1.0, epsilon = 1e-9);
}

#[test]
fn transition_is_unsupported_without_a_model() {
    let game = cart_pole(0);
    let err = game.transition(0, 0).unwrap_err();
    assert!(matches!(err, GymError::UnsupportedOperation(_)));
}

#[test]
fn policy_failure_propagates_after_one_successful_step() {
    let mut game = frozen_lake(0);
    let mut calls = 0usize;
    let mut policy = move |_: &Observation, _: &PolicyOptions| {
        calls += 1;
        if calls == 2 {
            Err(GymError::Simulator("policy gave up".to_string()))
        } else {
            Ok(Action::Discrete(0))
        }
    };

    let err = game
        .run(&mut policy, &RunOptions::with_episodes(5))
        .unwrap_err();
    assert!(matches!(err, GymError::Simulator(_)));
    assert_eq!(game.episode().steps, 1);
}

#[test]
fn unknown_identifier_is_an_initialization_error() {
    let registry = default_registry();
    let err = Game::new(&registry, "Atari-Pong-v0", &EnvConfig::default()).unwrap_err();
    assert!(matches!(err, GymError::Initialization(_)));
}

#[test]
fn cartpole_rollout_accumulates_survival_reward() {
    let mut game = cart_pole(0);
    let mut flip = false;
    let mut policy = move |_: &Observation, _: &PolicyOptions| {
        flip = !flip;
        Ok(Action::Discrete(usize::from(flip)))
    };

    let total = game.run(&mut policy, &RunOptions::default()).unwrap();
    assert!(total.value() >= 1.0);
    assert_eq!(game.episode().steps as f64, total.value());
}
