//! Random policy for baseline comparisons

use rand::rngs::StdRng;
use rand::SeedableRng;

use gymkit_core::{Action, Observation, Policy, PolicyOptions, Result, Space};

/// Policy that samples uniformly at random from the action space.
///
/// Useful as a baseline and as the default behaviour when benchmarking
/// smarter policies.
pub struct RandomPolicy {
    space: Space,
    rng: StdRng,
}

impl RandomPolicy {
    /// Create a random policy over an action space
    #[must_use]
    pub fn new(space: Space) -> Self {
        Self {
            space,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a random policy with deterministic sampling
    #[must_use]
    pub fn seeded(space: Space, seed: u64) -> Self {
        Self {
            space,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _observation: &Observation, _options: &PolicyOptions) -> Result<Action> {
        Ok(self.space.sample(&mut self.rng))
    }
}
