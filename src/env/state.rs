use crate::maze::{GridOracle, Pos};

/// Dense integer index of a grid cell, in `[0, width * height)`
pub type State = usize;

/// Row-major bijection between grid positions and [`State`] indices
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateEncoder {
    width: usize,
    height: usize,
}

impl StateEncoder {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn for_grid(grid: &impl GridOracle) -> Self {
        Self::new(grid.width(), grid.height())
    }

    /// Number of distinct states
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `y * width + x`. Only defined for in-bounds positions.
    pub fn encode(&self, (x, y): Pos) -> State {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn decode(&self, state: State) -> Pos {
        debug_assert!(state < self.len());
        (state % self.width, state / self.width)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn encode_row_major() {
        let enc = StateEncoder::new(4, 3);
        assert_eq!(enc.len(), 12);
        assert_eq!(enc.encode((0, 0)), 0);
        assert_eq!(enc.encode((3, 0)), 3);
        assert_eq!(enc.encode((0, 1)), 4);
        assert_eq!(enc.encode((3, 2)), 11);
        assert_eq!(enc.decode(6), (2, 1));
    }

    proptest! {
        #[test]
        fn encoding_is_a_bijection(width in 1usize..40, height in 1usize..40, x in 0usize..40, y in 0usize..40) {
            let enc = StateEncoder::new(width, height);
            let pos = (x % width, y % height);
            let state = enc.encode(pos);
            prop_assert!(state < enc.len());
            prop_assert_eq!(enc.decode(state), pos);
        }
    }

    #[test]
    fn every_state_decodes_to_a_distinct_position() {
        let enc = StateEncoder::new(5, 7);
        let decoded = (0..enc.len())
            .map(|s| enc.decode(s))
            .collect::<std::collections::HashSet<_>>();
        assert_eq!(decoded.len(), enc.len());
        assert!((0..enc.len()).all(|s| enc.encode(enc.decode(s)) == s));
    }
}
