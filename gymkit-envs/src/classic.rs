//! Classic control environments

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gymkit_core::{
    Action, GymError, Observation, Result, Reward, Simulator, Space, Step, StepInfo,
};

/// Cart-pole balancing task.
///
/// A pole is hinged on a cart moving along a frictionless track; the agent
/// pushes the cart left or right and is paid 1.0 for every step the pole
/// stays upright. Model-free: no transition table is exposed.
pub struct CartPole {
    state: CartPoleState,
    config: CartPoleConfig,
    steps: usize,
    seed: Option<u64>,
    rng: StdRng,
}

#[derive(Debug, Clone)]
struct CartPoleState {
    x: f64,         // Cart position
    x_dot: f64,     // Cart velocity
    theta: f64,     // Pole angle
    theta_dot: f64, // Pole angular velocity
}

/// Physical constants and limits for [`CartPole`]
#[derive(Debug, Clone)]
pub struct CartPoleConfig {
    /// Gravitational acceleration
    pub gravity: f64,
    /// Mass of the cart
    pub mass_cart: f64,
    /// Mass of the pole
    pub mass_pole: f64,
    /// Half-length of the pole
    pub length: f64,
    /// Magnitude of the push force
    pub force_mag: f64,
    /// Step budget folded into termination
    pub max_steps: usize,
    /// Cart position at which the episode ends
    pub x_threshold: f64,
    /// Pole angle at which the episode ends
    pub theta_threshold: f64,
}

impl Default for CartPoleConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            mass_cart: 1.0,
            mass_pole: 0.1,
            length: 0.5,
            force_mag: 10.0,
            max_steps: 500,
            x_threshold: 2.4,
            theta_threshold: 0.209, // ~12 degrees
        }
    }
}

impl CartPole {
    /// Create a cart-pole with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CartPoleConfig::default())
    }

    /// Create a cart-pole with a custom configuration
    #[must_use]
    pub fn with_config(config: CartPoleConfig) -> Self {
        Self {
            state: CartPoleState {
                x: 0.0,
                x_dot: 0.0,
                theta: 0.0,
                theta_dot: 0.0,
            },
            config,
            steps: 0,
            seed: None,
            rng: StdRng::from_entropy(),
        }
    }

    fn observation(&self) -> Observation {
        Observation::vector(vec![
            self.state.x,
            self.state.x_dot,
            self.state.theta,
            self.state.theta_dot,
        ])
    }

    fn is_done(&self) -> bool {
        self.state.x.abs() > self.config.x_threshold
            || self.state.theta.abs() > self.config.theta_threshold
            || self.steps >= self.config.max_steps
    }
}

impl Default for CartPole {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for CartPole {
    fn action_space(&self) -> Space {
        Space::discrete(2) // 0: push left, 1: push right
    }

    fn observation_space(&self) -> Space {
        let high = vec![
            self.config.x_threshold * 2.0,
            f64::INFINITY,
            self.config.theta_threshold * 2.0,
            f64::INFINITY,
        ];
        let low = high.iter().map(|x| -x).collect();
        Space::bounded(low, high)
    }

    fn seed(&mut self, seed: u64) -> Result<()> {
        self.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }

    fn reset(&mut self) -> Result<Observation> {
        // Re-seed on reset so a fixed seed always yields the same start.
        if let Some(seed) = self.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.state = CartPoleState {
            x: self.rng.gen_range(-0.05..0.05),
            x_dot: self.rng.gen_range(-0.05..0.05),
            theta: self.rng.gen_range(-0.05..0.05),
            theta_dot: self.rng.gen_range(-0.05..0.05),
        };
        self.steps = 0;
        Ok(self.observation())
    }

    fn step(&mut self, action: &Action) -> Result<Step> {
        let index = action.discrete().ok_or_else(|| {
            GymError::Simulator("CartPole expects a discrete action".to_string())
        })?;
        let force = if index == 1 {
            self.config.force_mag
        } else {
            -self.config.force_mag
        };

        let cos_theta = self.state.theta.cos();
        let sin_theta = self.state.theta.sin();

        let total_mass = self.config.mass_cart + self.config.mass_pole;
        let pole_mass_length = self.config.mass_pole * self.config.length;

        let temp =
            (force + pole_mass_length * self.state.theta_dot.powi(2) * sin_theta) / total_mass;
        let theta_acc = (self.config.gravity * sin_theta - cos_theta * temp)
            / (self.config.length
                * (4.0 / 3.0 - self.config.mass_pole * cos_theta.powi(2) / total_mass));
        let x_acc = temp - pole_mass_length * theta_acc * cos_theta / total_mass;

        let dt = 0.02; // Time step
        self.state.x += dt * self.state.x_dot;
        self.state.x_dot += dt * x_acc;
        self.state.theta += dt * self.state.theta_dot;
        self.state.theta_dot += dt * theta_acc;

        self.steps += 1;

        Ok(Step {
            observation: self.observation(),
            reward: Reward::new(1.0), // Reward of 1 for each step survived
            done: self.is_done(),
            info: StepInfo::default(),
        })
    }

    fn sample_action(&mut self) -> Action {
        Action::Discrete(self.rng.gen_range(0..2))
    }
}

/// Mountain-car task.
///
/// An underpowered car must rock back and forth in a valley to build enough
/// momentum to reach the goal on the right hill. Every step costs 1.0 until
/// the goal is reached. Model-free.
pub struct MountainCar {
    state: MountainCarState,
    config: MountainCarConfig,
    steps: usize,
    seed: Option<u64>,
    rng: StdRng,
}

#[derive(Debug, Clone)]
struct MountainCarState {
    position: f64,
    velocity: f64,
}

/// Physical constants and limits for [`MountainCar`]
#[derive(Debug, Clone)]
pub struct MountainCarConfig {
    /// Left edge of the valley
    pub min_position: f64,
    /// Right edge of the valley
    pub max_position: f64,
    /// Speed limit in either direction
    pub max_speed: f64,
    /// Position of the goal flag
    pub goal_position: f64,
    /// Minimum velocity at the goal
    pub goal_velocity: f64,
    /// Engine force per step
    pub force: f64,
    /// Gravitational pull along the slope
    pub gravity: f64,
    /// Step budget folded into termination
    pub max_steps: usize,
}

impl Default for MountainCarConfig {
    fn default() -> Self {
        Self {
            min_position: -1.2,
            max_position: 0.6,
            max_speed: 0.07,
            goal_position: 0.5,
            goal_velocity: 0.0,
            force: 0.001,
            gravity: 0.0025,
            max_steps: 200,
        }
    }
}

impl MountainCar {
    /// Create a mountain-car with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MountainCarConfig::default())
    }

    /// Create a mountain-car with a custom configuration
    #[must_use]
    pub fn with_config(config: MountainCarConfig) -> Self {
        Self {
            state: MountainCarState {
                position: -0.5,
                velocity: 0.0,
            },
            config,
            steps: 0,
            seed: None,
            rng: StdRng::from_entropy(),
        }
    }

    fn observation(&self) -> Observation {
        Observation::vector(vec![self.state.position, self.state.velocity])
    }
}

impl Default for MountainCar {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for MountainCar {
    fn action_space(&self) -> Space {
        Space::discrete(3) // 0: push left, 1: no push, 2: push right
    }

    fn observation_space(&self) -> Space {
        Space::bounded(
            vec![self.config.min_position, -self.config.max_speed],
            vec![self.config.max_position, self.config.max_speed],
        )
    }

    fn seed(&mut self, seed: u64) -> Result<()> {
        self.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }

    fn reset(&mut self) -> Result<Observation> {
        if let Some(seed) = self.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.state = MountainCarState {
            position: self.rng.gen_range(-0.6..-0.4),
            velocity: 0.0,
        };
        self.steps = 0;
        Ok(self.observation())
    }

    fn step(&mut self, action: &Action) -> Result<Step> {
        let force = match action.discrete() {
            Some(0) => -1.0,
            Some(1) => 0.0,
            Some(2) => 1.0,
            _ => {
                return Err(GymError::Simulator(format!(
                    "Invalid action: {:?}",
                    action
                )))
            }
        };

        self.state.velocity +=
            force * self.config.force + self.state.position.cos() * (-self.config.gravity);
        self.state.velocity = self
            .state
            .velocity
            .clamp(-self.config.max_speed, self.config.max_speed);

        self.state.position += self.state.velocity;
        self.state.position = self
            .state
            .position
            .clamp(self.config.min_position, self.config.max_position);

        // Stop dead against the left wall.
        if self.state.position <= self.config.min_position {
            self.state.velocity = 0.0;
        }

        self.steps += 1;

        let at_goal = self.state.position >= self.config.goal_position
            && self.state.velocity >= self.config.goal_velocity;
        let done = at_goal || self.steps >= self.config.max_steps;
        let reward = if at_goal { 0.0 } else { -1.0 };

        Ok(Step {
            observation: self.observation(),
            reward: Reward::new(reward),
            done,
            info: StepInfo::default(),
        })
    }

    fn sample_action(&mut self) -> Action {
        Action::Discrete(self.rng.gen_range(0..3))
    }
}
