use rand::Rng;

use crate::{
    algo::QTable,
    env::{Action, State},
    error::ConfigError,
    util::ensure_interval,
};

use super::Choice;

/// Epsilon greedy exploration policy
///
/// `epsilon` is the probability of exploiting: with probability `epsilon` the greedy action
/// is taken, otherwise a uniformly random one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    /// **Errors** if `epsilon` is not in the interval `[0,1]`
    pub fn new(epsilon: f64) -> Result<Self, ConfigError> {
        ensure_interval!(epsilon, 0.0, 1.0);
        Ok(Self { epsilon })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Draw `u` uniformly from `[0, 1)` and exploit if `u < epsilon`
    pub fn choose(&self, rng: &mut impl Rng) -> Choice {
        if rng.gen::<f64>() < self.epsilon {
            Choice::Exploit
        } else {
            Choice::Explore
        }
    }

    /// Pick an action for `state` from `table`
    pub fn select(&self, table: &QTable, state: State, rng: &mut impl Rng) -> Action {
        match self.choose(rng) {
            Choice::Exploit => table.greedy(state),
            Choice::Explore => Action::random(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn rejects_out_of_range_epsilon() {
        assert!(EpsilonGreedy::new(-0.1).is_err());
        assert!(EpsilonGreedy::new(1.1).is_err());
        assert!(EpsilonGreedy::new(1.0).is_ok());
    }

    #[test]
    fn extremes_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(0);
        let always = EpsilonGreedy::new(1.0).unwrap();
        let never = EpsilonGreedy::new(0.0).unwrap();
        for _ in 0..100 {
            assert_eq!(always.choose(&mut rng), Choice::Exploit);
            assert_eq!(never.choose(&mut rng), Choice::Explore);
        }
    }

    #[test]
    fn exploits_greedy_action() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut table = QTable::new(1);
        table.set(0, Action::Left, 1.0);
        let policy = EpsilonGreedy::new(1.0).unwrap();
        assert!((0..50).all(|_| policy.select(&table, 0, &mut rng) == Action::Left));
    }

    #[test]
    fn exploit_rate_tracks_epsilon() {
        let mut rng = StdRng::seed_from_u64(2);
        let policy = EpsilonGreedy::new(0.3).unwrap();
        let exploits = (0..10_000)
            .filter(|_| policy.choose(&mut rng) == Choice::Exploit)
            .count();
        assert!((2_500..3_500).contains(&exploits), "{exploits}");
    }
}
