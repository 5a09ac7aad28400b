use core::fmt;
use std::ops::Add;

/// A cell on the grid, addressed by column and row. Row 0 is the top row, so moving [Direction::Up]
/// decrements the row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub const fn new(col: i32, row: i32) -> Position {
        Position { col, row }
    }

    /// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry), the exact move count
    /// on an empty 4-connected grid.
    pub fn manhattan_distance(&self, other: &Position) -> i32 {
        (self.col - other.col).abs() + (self.row - other.row).abs()
    }

    /// The cell one step away in the given direction. Not bounds checked.
    pub fn step(&self, direction: Direction) -> Position {
        *self + direction
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl From<(i32, i32)> for Position {
    fn from((col, row): (i32, i32)) -> Position {
        Position::new(col, row)
    }
}

/// One of the four orthogonal moves an agent can make.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Column and row delta of a single move.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The direction leading from `from` to `to`, or [None] if the two cells are not orthogonal
    /// neighbours.
    pub fn between(from: &Position, to: &Position) -> Option<Direction> {
        match (to.col - from.col, to.row - from.row) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        f.write_str(name)
    }
}

impl Add<Direction> for Position {
    type Output = Position;

    fn add(self, direction: Direction) -> Position {
        let (dc, dr) = direction.delta();
        Position::new(self.col + dc, self.row + dr)
    }
}
