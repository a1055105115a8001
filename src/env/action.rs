use rand::{seq::SliceRandom, Rng};
use strum::{EnumCount, FromRepr, VariantArray};

use crate::maze::Pos;

/// One of the four directional moves
///
/// The discriminants are the Q-table column indices and the order in which greedy
/// selection scans for ties.
#[derive(EnumCount, VariantArray, FromRepr, Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[repr(usize)]
pub enum Action {
    Up = 0,
    Down = 1,
    Right = 2,
    Left = 3,
}

impl Action {
    /// Column index of this action in a Q-table row
    pub fn index(self) -> usize {
        self as usize
    }

    /// A uniformly random action
    pub fn random(rng: &mut impl Rng) -> Self {
        *Self::VARIANTS
            .choose(rng)
            .expect("Action has variants")
    }

    /// Unit offset `(dx, dy)`, with `y` growing downward
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (0, -1),
            Action::Down => (0, 1),
            Action::Right => (1, 0),
            Action::Left => (-1, 0),
        }
    }

    /// Move `pos` one cell in this direction within a `width` x `height` grid
    ///
    /// A move that would leave the grid is absorbed and `pos` is returned unchanged.
    pub fn apply(self, (x, y): Pos, width: usize, height: usize) -> Pos {
        let (dx, dy) = self.delta();
        match (x.checked_add_signed(dx), y.checked_add_signed(dy)) {
            (Some(nx), Some(ny)) if nx < width && ny < height => (nx, ny),
            _ => (x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn encoding_is_fixed() {
        assert_eq!(Action::COUNT, 4);
        assert_eq!(Action::Up.index(), 0);
        assert_eq!(Action::Down.index(), 1);
        assert_eq!(Action::Right.index(), 2);
        assert_eq!(Action::Left.index(), 3);
        for a in Action::VARIANTS {
            assert_eq!(Action::from_repr(a.index()), Some(*a));
        }
        assert_eq!(Action::from_repr(4), None);
    }

    #[test]
    fn moves_one_cell() {
        assert_eq!(Action::Up.apply((1, 1), 3, 3), (1, 0), "Up action works");
        assert_eq!(Action::Down.apply((1, 1), 3, 3), (1, 2), "Down action works");
        assert_eq!(Action::Right.apply((1, 1), 3, 3), (2, 1), "Right action works");
        assert_eq!(Action::Left.apply((1, 1), 3, 3), (0, 1), "Left action works");
    }

    #[test]
    fn corners_absorb_outward_moves() {
        assert_eq!(Action::Up.apply((0, 0), 3, 3), (0, 0));
        assert_eq!(Action::Left.apply((0, 0), 3, 3), (0, 0));
        assert_eq!(Action::Down.apply((2, 2), 3, 3), (2, 2));
        assert_eq!(Action::Right.apply((2, 2), 3, 3), (2, 2));
    }

    #[test]
    fn random_covers_all_actions() {
        let mut rng = StdRng::seed_from_u64(7);
        let seen = (0..200)
            .map(|_| Action::random(&mut rng))
            .collect::<std::collections::HashSet<_>>();
        assert_eq!(seen.len(), Action::COUNT);
    }

    proptest! {
        #[test]
        fn boundary_moves_never_change_position(width in 1usize..12, height in 1usize..12, t in 0usize..1000) {
            // walk the perimeter
            let perimeter = (0..width)
                .flat_map(|x| [(x, 0), (x, height - 1)])
                .chain((0..height).flat_map(|y| [(0, y), (width - 1, y)]))
                .collect::<Vec<_>>();
            let pos = perimeter[t % perimeter.len()];

            for action in Action::VARIANTS {
                let next = action.apply(pos, width, height);
                let (dx, dy) = action.delta();
                let leaves = (pos.0 == 0 && dx < 0)
                    || (pos.1 == 0 && dy < 0)
                    || (pos.0 == width - 1 && dx > 0)
                    || (pos.1 == height - 1 && dy > 0);
                if leaves {
                    prop_assert_eq!(next, pos);
                } else {
                    prop_assert!(next.0 < width && next.1 < height);
                    prop_assert_ne!(next, pos);
                }
            }
        }
    }
}
