use crate::{
    error::ConfigError,
    maze::{Cell, GridOracle, Pos},
};

/// Reward for arriving at a cell
///
/// - wall: fixed penalty
/// - goal: fixed bonus
/// - free: `shaping / (floor(dist(pos, goal)) + 1)`, a dense pull toward the goal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reward {
    wall: f64,
    goal: f64,
    shaping: f64,
}

impl Default for Reward {
    fn default() -> Self {
        Self {
            wall: -100.0,
            goal: 100.0,
            shaping: 10.0,
        }
    }
}

impl Reward {
    /// **Errors** unless `goal > shaping > 0 > wall`
    pub fn new(wall: f64, goal: f64, shaping: f64) -> Result<Self, ConfigError> {
        if !(goal > shaping && shaping > 0.0 && wall < 0.0) {
            return Err(ConfigError::RewardOrdering {
                goal,
                shaping,
                wall,
            });
        }
        Ok(Self {
            wall,
            goal,
            shaping,
        })
    }

    pub fn evaluate(&self, grid: &impl GridOracle, pos: Pos) -> f64 {
        match grid.classify(pos) {
            Cell::Wall => self.wall,
            Cell::Goal => self.goal,
            Cell::Free => self.shaping / (distance(pos, grid.goal()).floor() + 1.0),
        }
    }
}

fn distance((x, y): Pos, (gx, gy): Pos) -> f64 {
    let dx = gx.abs_diff(x) as f64;
    let dy = gy.abs_diff(y) as f64;
    (dx * dx + dy * dy).sqrt()
}
