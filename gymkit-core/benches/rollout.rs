//! Benchmarks for space normalization and rollout throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gymkit_core::{
    Action, EnvConfig, Game, Observation, PolicyOptions, Result, Reward, RunOptions, Simulator,
    Space, Step, StepInfo,
};

/// Counter simulator that never terminates: the rollout always runs to the
/// step budget.
struct CounterSim {
    n_states: usize,
    state: usize,
}

impl CounterSim {
    fn new(n_states: usize) -> Self {
        Self { n_states, state: 0 }
    }
}

impl Simulator for CounterSim {
    fn action_space(&self) -> Space {
        Space::discrete(2)
    }

    fn observation_space(&self) -> Space {
        Space::discrete(self.n_states)
    }

    fn seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }

    fn reset(&mut self) -> Result<Observation> {
        self.state = 0;
        Ok(Observation::index(0))
    }

    fn step(&mut self, _action: &Action) -> Result<Step> {
        self.state = (self.state + 1) % self.n_states;
        Ok(Step {
            observation: Observation::index(self.state),
            reward: Reward::new(1.0),
            done: false,
            info: StepInfo::default(),
        })
    }

    fn sample_action(&mut self) -> Action {
        Action::Discrete(0)
    }
}

fn bench_normalization(c: &mut Criterion) {
    let discrete = Space::discrete(1024);
    let bounded = Space::bounded(vec![-1.0; 1024], vec![1.0; 1024]);

    c.bench_function("normalize_discrete_1024", |b| {
        b.iter(|| black_box(&discrete).normalized());
    });
    c.bench_function("normalize_bounded_1024", |b| {
        b.iter(|| black_box(&bounded).normalized());
    });
}

fn bench_rollout(c: &mut Criterion) {
    let sim: Box<dyn Simulator> = Box::new(CounterSim::new(64));
    let mut game = Game::from_simulator(sim, &EnvConfig::default()).unwrap();
    let mut policy = |_: &Observation, _: &PolicyOptions| Ok(Action::Discrete(0));
    let options = RunOptions::with_episodes(500);

    c.bench_function("rollout_500_steps", |b| {
        b.iter(|| game.run(&mut policy, &options).unwrap());
    });
}

criterion_group!(benches, bench_normalization, bench_rollout);
criterion_main!(benches);
