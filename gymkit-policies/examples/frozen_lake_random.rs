//! Example: random policy walking the frozen lake

use gymkit_core::{EnvConfig, Game, RunOptions};
use gymkit_envs::{default_registry, names};
use gymkit_policies::RandomPolicy;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let registry = default_registry();
    let mut game = Game::new(
        &registry,
        names::toy_text::FROZEN_LAKE,
        &EnvConfig::seeded(0),
    )?;
    println!("{:?}", game);

    let mut policy = RandomPolicy::seeded(game.action_descriptor().clone(), 0);

    let rollouts = 10;
    let mut rewards = Vec::new();
    for rollout in 0..rollouts {
        let total = game.run(&mut policy, &RunOptions::default())?;
        println!(
            "Rollout {}: Total Reward = {:.2}, Steps = {}",
            rollout + 1,
            total.value(),
            game.episode().steps
        );
        rewards.push(total.value());
    }

    let average: f64 = rewards.iter().sum::<f64>() / rewards.len() as f64;
    let best = rewards.iter().copied().fold(f64::MIN, f64::max);
    println!(
        "\nRandom policy over {} rollouts => Average: {:.2}\tBest: {:.2}",
        rollouts, average, best
    );

    Ok(())
}
