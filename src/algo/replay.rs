use std::{thread, time::Duration};

use log::info;

use crate::{
    env::MazeEnv,
    error::ReplayError,
    maze::{GridOracle, Pos},
    observer::Observer,
    stop::StopSignal,
};

use super::QTable;

/// Configuration for a greedy replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Moves allowed before giving up on reaching the goal
    ///
    /// **Default**: `1000`
    pub max_steps: usize,
    /// Pause after every move, for watching the agent
    ///
    /// **Default**: `None`
    pub delay: Option<Duration>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            delay: None,
        }
    }
}

/// A successful walk to the goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// Moves taken
    pub steps: usize,
    /// Every position visited, from the start cell to the goal
    pub path: Vec<Pos>,
}

/// Drive the agent from the start cell by always taking the greedy action
///
/// `observer` sees the position after each move. The walk ends when the agent stands on a goal
/// cell, or fails after `config.max_steps` moves or when `stop` is raised.
///
/// **Panics** if `env` and `table` disagree on the number of states
pub fn replay<G: GridOracle>(
    table: &QTable,
    env: &mut MazeEnv<G>,
    config: &ReplayConfig,
    observer: &mut impl Observer,
    stop: &StopSignal,
) -> Result<ReplayOutcome, ReplayError> {
    assert_eq!(
        env.num_states(),
        table.num_states(),
        "Environment and Q-table disagree on the number of states"
    );

    env.reset();
    let mut path = vec![env.pos()];
    let mut steps = 0;

    while !env.is_at_goal() {
        if stop.is_stopped() {
            return Err(ReplayError::Stopped {
                steps,
                pos: env.pos(),
            });
        }
        if steps >= config.max_steps {
            return Err(ReplayError::StepLimit {
                steps,
                pos: env.pos(),
            });
        }

        env.step(table.greedy(env.state()));
        steps += 1;
        path.push(env.pos());
        observer.observe(steps, env.pos());

        if let Some(delay) = config.delay {
            thread::sleep(delay);
        }
    }

    info!("replay reached goal {:?} in {steps} steps", env.pos());
    Ok(ReplayOutcome { steps, path })
}
