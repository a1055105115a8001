mod action;
mod reward;
mod state;

pub use action::Action;
pub use reward::Reward;
pub use state::{State, StateEncoder};

use crate::maze::{Cell, GridOracle, Pos};

/// A single observed transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// The state before taking the action
    pub state: State,
    /// The action taken in `state`
    pub action: Action,
    /// The state after the action
    pub next_state: State,
    /// The reward for arriving at `next_state`
    pub reward: f64,
}

/// The agent's view of a maze: it owns the agent position and turns actions into
/// [transitions](Transition)
///
/// Moves that would leave the grid are absorbed as no-ops. By default walls are solid
/// and absorb moves the same way; with [`with_solid_walls(false)`](Self::with_solid_walls)
/// the agent can step onto a wall and collects the wall penalty there.
pub struct MazeEnv<G: GridOracle> {
    grid: G,
    encoder: StateEncoder,
    reward: Reward,
    solid_walls: bool,
    pos: Pos,
}

impl<G: GridOracle> MazeEnv<G> {
    pub fn new(grid: G) -> Self {
        let encoder = StateEncoder::for_grid(&grid);
        let pos = grid.start();
        Self {
            grid,
            encoder,
            reward: Reward::default(),
            solid_walls: true,
            pos,
        }
    }

    pub fn with_reward(mut self, reward: Reward) -> Self {
        self.reward = reward;
        self
    }

    pub fn with_solid_walls(mut self, solid: bool) -> Self {
        self.solid_walls = solid;
        self
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn encoder(&self) -> StateEncoder {
        self.encoder
    }

    /// Number of states, the row count a Q-table for this maze needs
    pub fn num_states(&self) -> usize {
        self.encoder.len()
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn state(&self) -> State {
        self.encoder.encode(self.pos)
    }

    pub fn is_at_goal(&self) -> bool {
        self.grid.classify(self.pos) == Cell::Goal
    }

    /// Reward for arriving at `pos`
    pub fn reward(&self, pos: Pos) -> f64 {
        self.reward.evaluate(&self.grid, pos)
    }

    /// Put the agent back on the start cell
    ///
    /// **Returns** the start state
    pub fn reset(&mut self) -> State {
        self.pos = self.grid.start();
        self.state()
    }

    /// Where `action` would take the agent from `pos`, without moving it
    pub fn target(&self, action: Action, pos: Pos) -> Pos {
        let next = action.apply(pos, self.grid.width(), self.grid.height());
        if self.solid_walls && self.grid.classify(next) == Cell::Wall {
            pos
        } else {
            next
        }
    }

    /// Move the agent and observe the resulting state and reward
    pub fn step(&mut self, action: Action) -> Transition {
        let state = self.state();
        self.pos = self.target(action, self.pos);
        Transition {
            state,
            action,
            next_state: self.state(),
            reward: self.reward(self.pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Maze;

    fn corridor() -> Maze {
        "S..\n##.\nG..".parse().unwrap()
    }

    #[test]
    fn step_reports_transition() {
        let maze = corridor();
        let mut env = MazeEnv::new(&maze);
        assert_eq!(env.reset(), 0);

        let t = env.step(Action::Right);
        assert_eq!(env.pos(), (1, 0));
        assert_eq!(
            t,
            Transition {
                state: 0,
                action: Action::Right,
                next_state: 1,
                reward: env.reward((1, 0)),
            }
        );
    }

    #[test]
    fn solid_walls_absorb_moves() {
        let maze = corridor();
        let mut env = MazeEnv::new(&maze);
        env.reset();

        let t = env.step(Action::Down);
        assert_eq!(env.pos(), (0, 0), "Wall below start blocks the move");
        assert_eq!(t.state, t.next_state);
        assert!(t.reward > 0.0);

        env.step(Action::Up);
        env.step(Action::Left);
        assert_eq!(env.pos(), (0, 0), "Boundary moves are no-ops");
    }

    #[test]
    fn open_walls_are_penalized() {
        let maze = corridor();
        let mut env = MazeEnv::new(&maze).with_solid_walls(false);
        env.reset();

        let t = env.step(Action::Down);
        assert_eq!(env.pos(), (0, 1));
        assert_eq!(t.reward, -100.0);
    }

    #[test]
    fn reaches_goal() {
        let maze = corridor();
        let mut env = MazeEnv::new(&maze);
        env.reset();
        for action in [
            Action::Right,
            Action::Right,
            Action::Down,
            Action::Down,
            Action::Left,
        ] {
            assert!(!env.is_at_goal());
            env.step(action);
        }
        assert!(!env.is_at_goal());
        let t = env.step(Action::Left);
        assert!(env.is_at_goal());
        assert_eq!(t.reward, 100.0);
        assert_eq!(t.next_state, env.encoder().encode(maze.goal()));
    }
}
