use log::{debug, info, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    env::{Action, MazeEnv, State, Transition},
    error::{ConfigError, ReplayError},
    exploration::EpsilonGreedy,
    maze::GridOracle,
    observer::Observer,
    stop::StopSignal,
    util::ensure_interval,
};

use super::{
    convergence::ConvergenceCounter,
    replay::{self, ReplayConfig, ReplayOutcome},
    QTable,
};

/// Configuration for the [`QLearner`]
#[derive(Debug, Clone, PartialEq)]
pub struct QLearnerConfig {
    /// Number of training episodes
    ///
    /// **Default**: `500`
    pub trials: u32,
    /// Step bound for a single episode
    ///
    /// **Default**: `100`
    pub max_steps: u32,
    /// Learning rate, in `[0,1]`
    ///
    /// **Default**: `0.5`
    pub alpha: f64,
    /// Discount factor, in `[0,1]`
    ///
    /// **Default**: `0.5`
    pub gamma: f64,
    /// Probability of taking the greedy action while training, in `[0,1]`
    ///
    /// **Default**: `0.5`
    pub epsilon: f64,
    /// An update that changes a Q-value by less than this counts as small
    ///
    /// **Default**: `1e-3`
    pub convergence_threshold: f64,
    /// Consecutive small updates that end an episode early
    ///
    /// **Default**: `3`
    pub convergence_patience: u32,
}

impl Default for QLearnerConfig {
    fn default() -> Self {
        Self {
            trials: 500,
            max_steps: 100,
            alpha: 0.5,
            gamma: 0.5,
            epsilon: 0.5,
            convergence_threshold: 1e-3,
            convergence_patience: 3,
        }
    }
}

impl QLearnerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let &Self {
            trials,
            max_steps,
            alpha,
            gamma,
            epsilon,
            convergence_threshold,
            convergence_patience,
        } = self;

        ensure_interval!(alpha, 0.0, 1.0);
        ensure_interval!(gamma, 0.0, 1.0);
        ensure_interval!(epsilon, 0.0, 1.0);
        ensure_interval!(convergence_threshold, 0.0, f64::MAX);
        if trials == 0 {
            return Err(ConfigError::Zero("trials"));
        }
        if max_steps == 0 {
            return Err(ConfigError::Zero("max_steps"));
        }
        if convergence_patience == 0 {
            return Err(ConfigError::Zero("convergence_patience"));
        }
        Ok(())
    }
}

/// What happened during one training episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeReport {
    pub episode: u32,
    pub steps: u32,
    pub total_reward: f64,
    /// The episode ended on the convergence counter rather than the step bound
    pub converged: bool,
    /// The agent stood on the goal at least once
    pub reached_goal: bool,
}

/// Result of [`QLearner::train`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSummary {
    pub episodes: Vec<EpisodeReport>,
    /// Training ended on the stop signal before all trials ran
    pub stopped: bool,
}

impl TrainingSummary {
    pub fn total_steps(&self) -> u64 {
        self.episodes.iter().map(|e| u64::from(e.steps)).sum()
    }

    pub fn converged_episodes(&self) -> usize {
        self.episodes.iter().filter(|e| e.converged).count()
    }

    pub fn goal_episodes(&self) -> usize {
        self.episodes.iter().filter(|e| e.reached_goal).count()
    }
}

/// Off-policy tabular Q-learning over a [`MazeEnv`]
///
/// The learner owns its [`QTable`] and is the only thing that writes to it. The table
/// persists across episodes and is the whole of what gets learned.
///
/// ### Generics
/// - `R` - The random source behind exploration. Seed it for reproducible training.
pub struct QLearner<R = StdRng> {
    q_table: QTable,
    exploration: EpsilonGreedy,
    config: QLearnerConfig,
    rng: R,
    episode: u32,
}

impl QLearner<StdRng> {
    /// Initialize a learner for `num_states` states with an entropy-seeded generator
    ///
    /// **Errors** if the configuration is invalid
    pub fn new(num_states: usize, config: QLearnerConfig) -> Result<Self, ConfigError> {
        Self::with_rng(num_states, config, StdRng::from_entropy())
    }

    /// Initialize a learner whose exploration is reproducible from `seed`
    pub fn seeded(
        num_states: usize,
        config: QLearnerConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(num_states, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QLearner<R> {
    pub fn with_rng(num_states: usize, config: QLearnerConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            q_table: QTable::new(num_states),
            exploration: EpsilonGreedy::new(config.epsilon)?,
            config,
            rng,
            episode: 0,
        })
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn config(&self) -> &QLearnerConfig {
        &self.config
    }

    /// Number of episodes run so far
    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Choose an action for `state` with the epsilon greedy policy
    pub fn act(&mut self, state: State) -> Action {
        self.exploration.select(&self.q_table, state, &mut self.rng)
    }

    /// Apply the temporal-difference update for one transition
    ///
    /// **Returns** `(old, new)` values of the updated entry
    pub fn learn(&mut self, transition: &Transition) -> (f64, f64) {
        let Transition {
            state,
            action,
            next_state,
            reward,
        } = *transition;

        self.q_table.update(
            state,
            action,
            next_state,
            reward,
            self.config.alpha,
            self.config.gamma,
        )
    }

    /// Run one episode from the start cell
    ///
    /// **Panics** if `env` and the Q-table disagree on the number of states
    pub fn run_episode<G: GridOracle>(&mut self, env: &mut MazeEnv<G>) -> EpisodeReport {
        self.check_env(env);

        let mut counter = ConvergenceCounter::new(
            self.config.convergence_threshold,
            self.config.convergence_patience,
        );
        let mut report = EpisodeReport {
            episode: self.episode,
            steps: 0,
            total_reward: 0.0,
            converged: false,
            reached_goal: false,
        };

        let mut visited = vec![false; env.num_states()];
        let mut state = env.reset();
        visited[state] = true;

        while report.steps < self.config.max_steps {
            let action = self.act(state);
            let transition = env.step(action);
            let (old, new) = self.learn(&transition);

            report.steps += 1;
            report.total_reward += transition.reward;
            report.reached_goal |= env.is_at_goal();
            state = transition.next_state;
            let fresh = !std::mem::replace(&mut visited[state], true);

            if counter.observe(old, new, fresh) {
                report.converged = true;
                break;
            }
        }

        debug!(
            "episode {}: {} steps, reward {:.2}{}{}",
            report.episode,
            report.steps,
            report.total_reward,
            if report.reached_goal { ", reached goal" } else { "" },
            if report.converged { ", converged" } else { "" },
        );

        self.episode += 1;
        report
    }

    /// Run the configured number of episodes, checking `stop` before each one
    pub fn train<G: GridOracle>(
        &mut self,
        env: &mut MazeEnv<G>,
        stop: &StopSignal,
    ) -> TrainingSummary {
        let mut summary = TrainingSummary {
            episodes: Vec::with_capacity(self.config.trials as usize),
            stopped: false,
        };

        for _ in 0..self.config.trials {
            if stop.is_stopped() {
                summary.stopped = true;
                break;
            }
            summary.episodes.push(self.run_episode(env));
        }

        info!(
            "trained {} episodes ({} steps, {} reached goal, {} converged){}",
            summary.episodes.len(),
            summary.total_steps(),
            summary.goal_episodes(),
            summary.converged_episodes(),
            if summary.stopped { ", stopped early" } else { "" },
        );
        trace!("q-table:\n{}", self.q_table);

        summary
    }

    /// Walk the greedy policy from the start cell, see [`replay::replay`]
    pub fn replay<G: GridOracle>(
        &self,
        env: &mut MazeEnv<G>,
        config: &ReplayConfig,
        observer: &mut impl Observer,
        stop: &StopSignal,
    ) -> Result<ReplayOutcome, ReplayError> {
        replay::replay(&self.q_table, env, config, observer, stop)
    }

    fn check_env<G: GridOracle>(&self, env: &MazeEnv<G>) {
        assert_eq!(
            env.num_states(),
            self.q_table.num_states(),
            "Environment and Q-table disagree on the number of states"
        );
    }
}
