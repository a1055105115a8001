use crate::maze::Pos;

/// Receives the agent position after every replay step
pub trait Observer {
    /// Called after the agent made its `step`-th move (starting at 1) and now stands on `pos`
    fn observe(&mut self, step: usize, pos: Pos);
}

impl<F: FnMut(usize, Pos)> Observer for F {
    fn observe(&mut self, step: usize, pos: Pos) {
        self(step, pos)
    }
}

/// An observer that ignores every notification, for headless replays
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl Observer for Headless {
    fn observe(&mut self, _step: usize, _pos: Pos) {}
}
