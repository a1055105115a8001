use std::fmt;

use strum::{EnumCount, VariantArray};

use crate::env::{Action, State};

/// Dense table of action values, one row per state and one column per [`Action`]
///
/// Every entry starts at `0.0`. Only the learner that owns the table mutates it, everyone
/// else gets a shared reference.
#[derive(Clone, Debug, PartialEq)]
pub struct QTable {
    values: Vec<f64>,
    states: usize,
}

impl QTable {
    pub fn new(states: usize) -> Self {
        Self {
            values: vec![0.0; states * Action::COUNT],
            states,
        }
    }

    pub fn num_states(&self) -> usize {
        self.states
    }

    /// Flat index of `(state, action)`
    ///
    /// **Panics** if `state` is outside the table. Such a state means the encoder and the
    /// table disagree on the grid size, and continuing would corrupt the table.
    fn index(&self, state: State, action: Action) -> usize {
        assert!(
            state < self.states,
            "State index {state} out of bounds for a Q-table with {} states",
            self.states
        );
        state * Action::COUNT + action.index()
    }

    pub fn get(&self, state: State, action: Action) -> f64 {
        self.values[self.index(state, action)]
    }

    pub(crate) fn set(&mut self, state: State, action: Action, value: f64) {
        let i = self.index(state, action);
        self.values[i] = value;
    }

    /// All action values for `state`, indexed by [`Action::index`]
    pub fn row(&self, state: State) -> &[f64] {
        let start = self.index(state, Action::Up);
        &self.values[start..start + Action::COUNT]
    }

    /// The action with the highest value in `state`
    ///
    /// Ties go to the lowest action index: a later action only wins if it is strictly greater.
    pub fn greedy(&self, state: State) -> Action {
        let row = self.row(state);
        let mut best = 0;
        for (i, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = i;
            }
        }
        Action::VARIANTS[best]
    }

    /// Value of the greedy action in `state`
    pub fn max(&self, state: State) -> f64 {
        self.get(state, self.greedy(state))
    }

    /// Temporal-difference (Q-learning) update
    ///
    /// `Q(s,a) <- Q(s,a) + alpha * (reward + gamma * Q(s', greedy(s')) - Q(s,a))`
    ///
    /// **Returns** `(old, new)` values of `Q(s,a)`
    pub(crate) fn update(
        &mut self,
        state: State,
        action: Action,
        next_state: State,
        reward: f64,
        alpha: f64,
        gamma: f64,
    ) -> (f64, f64) {
        let old = self.get(state, action);
        let target = reward + gamma * self.max(next_state);
        let new = old + alpha * (target - old);
        self.set(state, action, new);
        (old, new)
    }
}

impl fmt::Display for QTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state")?;
        for action in Action::VARIANTS {
            write!(f, "\t{action:?}")?;
        }
        for (state, row) in self.values.chunks(Action::COUNT).enumerate() {
            write!(f, "\n{state}")?;
            for value in row {
                write!(f, "\t{value:.3}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let table = QTable::new(9);
        assert_eq!(table.num_states(), 9);
        assert!((0..9).all(|s| table.row(s) == [0.0; 4]));
    }

    #[test]
    fn greedy_prefers_lowest_index_on_ties() {
        let mut table = QTable::new(3);
        assert_eq!(table.greedy(0), Action::Up, "All zero row picks first action");

        table.set(1, Action::Right, 2.0);
        table.set(1, Action::Left, 2.0);
        assert_eq!(table.greedy(1), Action::Right);

        table.set(2, Action::Down, -1.0);
        table.set(2, Action::Up, -1.0);
        table.set(2, Action::Right, -3.0);
        table.set(2, Action::Left, -1.0);
        assert_eq!(table.greedy(2), Action::Up);

        table.set(2, Action::Left, -0.5);
        assert_eq!(table.greedy(2), Action::Left);
        assert_eq!(table.max(2), -0.5);
    }

    #[test]
    fn update_with_full_learning_rate_and_no_discount_stores_reward() {
        let mut table = QTable::new(4);
        table.set(1, Action::Up, 50.0);
        table.set(0, Action::Down, 7.0);

        let (old, new) = table.update(0, Action::Down, 1, 3.5, 1.0, 0.0);
        assert_eq!(old, 7.0);
        assert_eq!(new, 3.5);
        assert_eq!(table.get(0, Action::Down), 3.5);
    }

    #[test]
    fn update_bootstraps_from_greedy_next_value() {
        let mut table = QTable::new(2);
        table.set(1, Action::Left, 4.0);
        table.set(1, Action::Down, 1.0);

        // 0 + 0.5 * (2 + 0.5 * 4 - 0)
        let (_, new) = table.update(0, Action::Right, 1, 2.0, 0.5, 0.5);
        assert_eq!(new, 2.0);

        // 2 + 0.5 * (2 + 0.5 * 4 - 2)
        let (old, new) = table.update(0, Action::Right, 1, 2.0, 0.5, 0.5);
        assert_eq!((old, new), (2.0, 3.0));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn rejects_unknown_state() {
        let table = QTable::new(4);
        table.get(4, Action::Up);
    }

    #[test]
    fn display_lists_every_state() {
        let mut table = QTable::new(2);
        table.set(1, Action::Left, 1.25);
        let text = table.to_string();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().last().unwrap().ends_with("1.250"));
    }
}
