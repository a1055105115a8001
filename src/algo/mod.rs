pub mod convergence;
pub mod q_learning;
pub mod q_table;
pub mod replay;

pub use q_learning::{EpisodeReport, QLearner, QLearnerConfig, TrainingSummary};
pub use q_table::QTable;
pub use replay::{ReplayConfig, ReplayOutcome};
