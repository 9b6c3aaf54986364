//! Toy-text environments

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gymkit_core::{
    Action, GymError, Observation, Result, Reward, Simulator, Space, Step, StepInfo,
    TransitionModel, TransitionOutcome,
};

/// Move left
pub const LEFT: usize = 0;
/// Move down
pub const DOWN: usize = 1;
/// Move right
pub const RIGHT: usize = 2;
/// Move up
pub const UP: usize = 3;

const N_ACTIONS: usize = 4;

/// Default 4x4 lake: start, frozen, holes, goal
pub const DEFAULT_MAP: [&str; 4] = ["SFFF", "FHFH", "FFFH", "HFFG"];

/// Frozen lake grid world.
///
/// The agent walks a frozen grid from the start tile to the goal tile
/// without falling into a hole. On slippery ice the chosen direction is
/// followed with probability 1/3, the two perpendicular directions with
/// 1/3 each. Discrete and model-based: the full transition table is built
/// at construction and exposed through [`Simulator::model`].
pub struct FrozenLake {
    tiles: Vec<Vec<u8>>,
    n_rows: usize,
    n_cols: usize,
    slippery: bool,
    start: usize,
    state: usize,
    model: TransitionModel,
    rng: StdRng,
}

impl FrozenLake {
    /// The default 4x4 slippery lake
    #[must_use]
    pub fn new() -> Self {
        Self::with_map(&DEFAULT_MAP, true)
    }

    /// A lake over a custom rectangular map.
    ///
    /// Tiles: `S` start, `F` frozen, `H` hole, `G` goal.
    #[must_use]
    pub fn with_map(map: &[&str], slippery: bool) -> Self {
        assert!(!map.is_empty(), "map must have at least one row");
        let tiles: Vec<Vec<u8>> = map.iter().map(|row| row.bytes().collect()).collect();
        let n_rows = tiles.len();
        let n_cols = tiles[0].len();
        debug_assert!(tiles.iter().all(|row| row.len() == n_cols));

        let start = tiles
            .iter()
            .flatten()
            .position(|tile| *tile == b'S')
            .unwrap_or(0);
        let model = Self::build_model(&tiles, n_rows, n_cols, slippery);

        Self {
            tiles,
            n_rows,
            n_cols,
            slippery,
            start,
            state: start,
            model,
            rng: StdRng::from_entropy(),
        }
    }

    /// Whether the ice is slippery
    #[must_use]
    pub fn is_slippery(&self) -> bool {
        self.slippery
    }

    fn n_states(&self) -> usize {
        self.n_rows * self.n_cols
    }

    fn destination(n_rows: usize, n_cols: usize, row: usize, col: usize, action: usize) -> (usize, usize) {
        match action {
            LEFT => (row, col.saturating_sub(1)),
            DOWN => ((row + 1).min(n_rows - 1), col),
            RIGHT => (row, (col + 1).min(n_cols - 1)),
            _ => (row.saturating_sub(1), col),
        }
    }

    fn outcome(
        tiles: &[Vec<u8>],
        n_rows: usize,
        n_cols: usize,
        row: usize,
        col: usize,
        action: usize,
        probability: f64,
    ) -> TransitionOutcome {
        let (next_row, next_col) = Self::destination(n_rows, n_cols, row, col, action);
        let next_tile = tiles[next_row][next_col];
        TransitionOutcome {
            probability,
            next_state: next_row * n_cols + next_col,
            reward: if next_tile == b'G' { 1.0 } else { 0.0 },
            done: matches!(next_tile, b'G' | b'H'),
        }
    }

    fn build_model(
        tiles: &[Vec<u8>],
        n_rows: usize,
        n_cols: usize,
        slippery: bool,
    ) -> TransitionModel {
        let mut model = TransitionModel::new(n_rows * n_cols, N_ACTIONS);
        for row in 0..n_rows {
            for col in 0..n_cols {
                let state = row * n_cols + col;
                for action in 0..N_ACTIONS {
                    if matches!(tiles[row][col], b'G' | b'H') {
                        // Terminal tiles are absorbing.
                        model.push(
                            state,
                            action,
                            TransitionOutcome {
                                probability: 1.0,
                                next_state: state,
                                reward: 0.0,
                                done: true,
                            },
                        );
                    } else if slippery {
                        for drift in [(action + 3) % 4, action, (action + 1) % 4] {
                            model.push(
                                state,
                                action,
                                Self::outcome(tiles, n_rows, n_cols, row, col, drift, 1.0 / 3.0),
                            );
                        }
                    } else {
                        model.push(
                            state,
                            action,
                            Self::outcome(tiles, n_rows, n_cols, row, col, action, 1.0),
                        );
                    }
                }
            }
        }
        model
    }
}

impl Default for FrozenLake {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for FrozenLake {
    fn action_space(&self) -> Space {
        Space::discrete(N_ACTIONS)
    }

    fn observation_space(&self) -> Space {
        Space::discrete(self.n_states())
    }

    fn seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }

    fn reset(&mut self) -> Result<Observation> {
        self.state = self.start;
        Ok(Observation::index(self.state))
    }

    fn step(&mut self, action: &Action) -> Result<Step> {
        let index = action.discrete().ok_or_else(|| {
            GymError::Simulator("FrozenLake expects a discrete action".to_string())
        })?;
        let outcomes = self
            .model
            .outcomes(self.state, index)
            .ok_or_else(|| GymError::Simulator(format!("Invalid action: {}", index)))?;

        // Weighted draw over the possible outcomes.
        let draw = self.rng.gen::<f64>();
        let mut cumulative = 0.0;
        let mut chosen = outcomes[outcomes.len() - 1].clone();
        for outcome in outcomes {
            cumulative += outcome.probability;
            if draw < cumulative {
                chosen = outcome.clone();
                break;
            }
        }

        self.state = chosen.next_state;
        Ok(Step {
            observation: Observation::index(self.state),
            reward: Reward::new(chosen.reward),
            done: chosen.done,
            info: StepInfo::default(),
        })
    }

    fn sample_action(&mut self) -> Action {
        Action::Discrete(self.rng.gen_range(0..N_ACTIONS))
    }

    fn render(&mut self) -> Result<()> {
        let row = self.state / self.n_cols;
        let col = self.state % self.n_cols;
        let mut out = String::new();
        for (r, tiles) in self.tiles.iter().enumerate() {
            for (c, tile) in tiles.iter().enumerate() {
                if (r, c) == (row, col) {
                    out.push('(');
                    out.push(*tile as char);
                    out.push(')');
                } else {
                    out.push(' ');
                    out.push(*tile as char);
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        println!("{}", out);
        Ok(())
    }

    fn model(&self) -> Option<&TransitionModel> {
        Some(&self.model)
    }
}
