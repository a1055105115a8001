/// Learning algorithms: the Q-table, Q-learning and greedy replay
pub mod algo;

/// The agent's view of a maze: actions, states and rewards
pub mod env;

/// Error types
pub mod error;

/// Exploration policies
pub mod exploration;

/// Maze grids
pub mod maze;

/// Replay notifications
pub mod observer;

/// Cooperative cancellation
pub mod stop;

/// Terminal rendering of replays
#[cfg(feature = "viz")]
pub mod viz;

mod util;

pub use algo::{QLearner, QLearnerConfig, QTable, ReplayConfig};
pub use env::{Action, MazeEnv, Reward};
pub use error::Error;
pub use maze::{Cell, GridOracle, Maze, Pos};
pub use observer::Observer;
pub use stop::StopSignal;
