//! Example: random policy balancing the cart-pole

use gymkit_core::{EnvConfig, Game, RunOptions};
use gymkit_envs::{default_registry, names};
use gymkit_policies::RandomPolicy;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let registry = default_registry();
    let mut game = Game::new(
        &registry,
        names::classic_control::CART_POLE,
        &EnvConfig::seeded(0),
    )?;
    println!("{:?}", game);

    let mut policy = RandomPolicy::new(game.action_descriptor().clone());
    let options = RunOptions::with_episodes(500);

    let rollouts = 10;
    let mut rewards = Vec::new();
    for rollout in 0..rollouts {
        let total = game.run(&mut policy, &options)?;
        println!(
            "Rollout {}: Total Reward = {:.2}, Steps = {}",
            rollout + 1,
            total.value(),
            game.episode().steps
        );
        rewards.push(total.value());
    }

    let average: f64 = rewards.iter().sum::<f64>() / rewards.len() as f64;
    println!(
        "\nAverage Reward over {} rollouts: {:.2}",
        rollouts, average
    );

    Ok(())
}
