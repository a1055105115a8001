use thiserror::Error;

use crate::maze::Pos;

/// Problems found while building a [`Maze`](crate::maze::Maze)
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("Maze has no cells")]
    Empty,

    #[error("Row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Cell count {found} does not match {width}x{height}")]
    CellCount {
        width: usize,
        height: usize,
        found: usize,
    },

    #[error("Unknown cell character {ch:?} at ({x}, {y})")]
    UnknownCell { ch: char, x: usize, y: usize },

    #[error("Maze has no start cell")]
    MissingStart,

    #[error("Maze has no goal cell")]
    MissingGoal,

    #[error("Maze has more than one start cell, second at {0:?}")]
    DuplicateStart(Pos),

    #[error("Maze has more than one goal cell, second at {0:?}")]
    DuplicateGoal(Pos),

    #[error("Position {pos:?} is outside the {width}x{height} maze")]
    OutOfBounds { pos: Pos, width: usize, height: usize },

    #[error("Start {0:?} is a wall")]
    StartOnWall(Pos),

    #[error("Goal {0:?} is not a goal cell")]
    GoalNotGoal(Pos),

    #[error("Goal {goal:?} cannot be reached from start {start:?}")]
    Unreachable { start: Pos, goal: Pos },

    #[error("Failed to read maze file")]
    Io(#[from] std::io::Error),
}

/// Invalid learner, replay or reward settings
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value {value} for `{name}`. Must be in the interval [{lo}, {hi}].")]
    OutOfInterval {
        name: &'static str,
        value: f64,
        lo: f64,
        hi: f64,
    },

    #[error("`{0}` must be greater than zero")]
    Zero(&'static str),

    #[error("Rewards must satisfy goal > shaping > 0 > wall (got goal {goal}, shaping {shaping}, wall {wall})")]
    RewardOrdering { goal: f64, shaping: f64, wall: f64 },
}

/// Ways a greedy replay can end without reaching the goal
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("Policy did not reach the goal within {steps} steps, stuck at {pos:?}")]
    StepLimit { steps: usize, pos: Pos },

    #[error("Replay stopped after {steps} steps at {pos:?}")]
    Stopped { steps: usize, pos: Pos },
}

/// Any error produced by this crate
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Maze(#[from] MazeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Replay(#[from] ReplayError),
}
