/// Early-stop heuristic for an episode
///
/// Counts consecutive updates whose change is below `threshold`. Only updates on a move into a
/// cell not yet visited in the episode count; a larger change or a revisit (absorbed moves
/// included) resets the streak, so a self-loop can't end an episode on its own. Once `patience`
/// small updates happen in a row the episode is considered converged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvergenceCounter {
    threshold: f64,
    patience: u32,
    streak: u32,
}

impl ConvergenceCounter {
    pub fn new(threshold: f64, patience: u32) -> Self {
        Self {
            threshold,
            patience,
            streak: 0,
        }
    }

    /// Record an update from `old` to `new`, made on a move to a `fresh` (unvisited) cell or not
    ///
    /// **Returns** `true` once the streak reaches `patience`
    pub fn observe(&mut self, old: f64, new: f64, fresh: bool) -> bool {
        if fresh && (new - old).abs() < self.threshold {
            self.streak += 1;
        } else {
            self.streak = 0;
        }
        self.is_converged()
    }

    pub fn is_converged(&self) -> bool {
        self.streak >= self.patience
    }

    pub fn reset(&mut self) {
        self.streak = 0;
    }
}
