use std::{
    collections::{HashSet, VecDeque},
    fmt, fs,
    path::Path,
    str::FromStr,
};

use crate::error::MazeError;

/// Grid coordinates `(x, y)`, with `(0, 0)` at the top-left corner
pub type Pos = (usize, usize);

/// Classification of a single maze cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Free,
    Wall,
    Goal,
}

/// Read-only view of a rectangular maze
///
/// Implementors only have to answer questions about in-bounds positions. Callers clamp
/// before asking, and an out-of-range `classify` may panic.
pub trait GridOracle {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Classify the cell at `pos`, which must be within `[0, width) x [0, height)`
    fn classify(&self, pos: Pos) -> Cell;

    fn start(&self) -> Pos;

    fn goal(&self) -> Pos;

    fn contains(&self, pos: Pos) -> bool {
        pos.0 < self.width() && pos.1 < self.height()
    }
}

impl<G: GridOracle + ?Sized> GridOracle for &G {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn classify(&self, pos: Pos) -> Cell {
        (**self).classify(pos)
    }

    fn start(&self) -> Pos {
        (**self).start()
    }

    fn goal(&self) -> Pos {
        (**self).goal()
    }
}

/// A validated maze with one start and one reachable goal
///
/// Text form, one row per line: `#` wall, `.` or space free, `S` start, `G` goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
    start: Pos,
    goal: Pos,
}

impl Maze {
    /// Build a maze from row-major cells
    ///
    /// **Errors** if the dimensions don't match the cell count, the start is a wall, the goal
    /// isn't a [`Cell::Goal`], or the goal can't be reached from the start
    pub fn new(
        width: usize,
        height: usize,
        cells: Vec<Cell>,
        start: Pos,
        goal: Pos,
    ) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::Empty);
        }
        if cells.len() != width * height {
            return Err(MazeError::CellCount {
                width,
                height,
                found: cells.len(),
            });
        }

        let maze = Self {
            cells,
            width,
            height,
            start,
            goal,
        };

        for pos in [start, goal] {
            if !maze.contains(pos) {
                return Err(MazeError::OutOfBounds { pos, width, height });
            }
        }
        if maze.classify(start) == Cell::Wall {
            return Err(MazeError::StartOnWall(start));
        }
        if maze.classify(goal) != Cell::Goal {
            return Err(MazeError::GoalNotGoal(goal));
        }
        if !maze.is_reachable(start, goal) {
            return Err(MazeError::Unreachable { start, goal });
        }

        Ok(maze)
    }

    /// Read and parse a maze file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MazeError> {
        fs::read_to_string(path)?.parse()
    }

    /// Breadth-first search over 4-connected non-wall cells
    fn is_reachable(&self, from: Pos, to: Pos) -> bool {
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);

        while let Some(pos) = queue.pop_front() {
            if pos == to {
                return true;
            }
            for next in self.neighbors(pos) {
                if self.classify(next) != Cell::Wall && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        false
    }

    fn neighbors(&self, (x, y): Pos) -> impl Iterator<Item = Pos> + '_ {
        [
            y.checked_sub(1).map(|y| (x, y)),
            Some((x, y + 1)),
            Some((x + 1, y)),
            x.checked_sub(1).map(|x| (x, y)),
        ]
        .into_iter()
        .flatten()
        .filter(|&pos| self.contains(pos))
    }
}

impl GridOracle for Maze {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn classify(&self, pos: Pos) -> Cell {
        assert!(
            self.contains(pos),
            "Position {pos:?} is outside the {}x{} maze",
            self.width,
            self.height
        );
        self.cells[pos.1 * self.width + pos.0]
    }

    fn start(&self) -> Pos {
        self.start
    }

    fn goal(&self) -> Pos {
        self.goal
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s.trim_end_matches(['\n', '\r']).lines().collect::<Vec<_>>();
        let width = rows.first().map_or(0, |row| row.chars().count());

        let mut cells = Vec::with_capacity(width * rows.len());
        let mut start = None;
        let mut goal = None;

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MazeError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Wall,
                    '.' | ' ' => Cell::Free,
                    'S' => {
                        if start.replace((x, y)).is_some() {
                            return Err(MazeError::DuplicateStart((x, y)));
                        }
                        Cell::Free
                    }
                    'G' => {
                        if goal.replace((x, y)).is_some() {
                            return Err(MazeError::DuplicateGoal((x, y)));
                        }
                        Cell::Goal
                    }
                    ch => return Err(MazeError::UnknownCell { ch, x, y }),
                };
                cells.push(cell);
            }
        }

        if cells.is_empty() {
            return Err(MazeError::Empty);
        }
        let start = start.ok_or(MazeError::MissingStart)?;
        let goal = goal.ok_or(MazeError::MissingGoal)?;

        Self::new(width, rows.len(), cells, start, goal)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let ch = match self.classify((x, y)) {
                    _ if (x, y) == self.start => 'S',
                    Cell::Free => '.',
                    Cell::Wall => '#',
                    Cell::Goal => 'G',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = "\
S..
##.
G..
";

    #[test]
    fn parse_corridor() {
        let maze: Maze = CORRIDOR.parse().unwrap();
        assert_eq!((maze.width(), maze.height()), (3, 3));
        assert_eq!(maze.start(), (0, 0));
        assert_eq!(maze.goal(), (0, 2));
        assert_eq!(maze.classify((0, 1)), Cell::Wall);
        assert_eq!(maze.classify((2, 1)), Cell::Free);
        assert_eq!(maze.classify((0, 2)), Cell::Goal);
        assert_eq!(maze.to_string(), CORRIDOR);
    }

    #[test]
    fn parse_rejects_bad_mazes() {
        assert!(matches!("".parse::<Maze>(), Err(MazeError::Empty)));
        assert!(matches!(
            "S..\n.G".parse::<Maze>(),
            Err(MazeError::Ragged { row: 1, .. })
        ));
        assert!(matches!(
            "S.x\n..G".parse::<Maze>(),
            Err(MazeError::UnknownCell { ch: 'x', x: 2, y: 0 })
        ));
        assert!(matches!("...\n..G".parse::<Maze>(), Err(MazeError::MissingStart)));
        assert!(matches!("S..\n...".parse::<Maze>(), Err(MazeError::MissingGoal)));
        assert!(matches!(
            "S.S\n..G".parse::<Maze>(),
            Err(MazeError::DuplicateStart((2, 0)))
        ));
        assert!(matches!(
            "S#G\n.#.".parse::<Maze>(),
            Err(MazeError::Unreachable { .. })
        ));
    }

    #[test]
    fn new_validates_designated_cells() {
        let cells = vec![Cell::Wall, Cell::Free, Cell::Free, Cell::Goal];
        assert!(matches!(
            Maze::new(2, 2, cells.clone(), (0, 0), (1, 1)),
            Err(MazeError::StartOnWall((0, 0)))
        ));
        assert!(matches!(
            Maze::new(2, 2, cells.clone(), (1, 0), (0, 1)),
            Err(MazeError::GoalNotGoal((0, 1)))
        ));
        assert!(matches!(
            Maze::new(2, 2, cells.clone(), (1, 0), (2, 1)),
            Err(MazeError::OutOfBounds { .. })
        ));
        assert!(matches!(
            Maze::new(3, 2, cells.clone(), (1, 0), (1, 1)),
            Err(MazeError::CellCount { found: 4, .. })
        ));
        assert!(Maze::new(2, 2, cells, (1, 0), (1, 1)).is_ok());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn classify_out_of_bounds_panics() {
        let maze: Maze = CORRIDOR.parse().unwrap();
        maze.classify((3, 0));
    }
}
