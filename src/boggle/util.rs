use std::slice::Iter;

use serde::{Deserialize, Serialize};

/// Number of letters that can form trie edges.
pub const ALPHABET_SIZE: usize = 26;

/// Placeholder held by border cells and by interior cells that were never set.
pub const SENTINEL: char = '*';

/// Maps `a..=z` to `0..26`. Every other character is structurally insignificant.
pub fn letter_index(c: char) -> Option<usize> {
    if c.is_ascii_lowercase() {
        Some(c as usize - 'a' as usize)
    } else {
        None
    }
}

/// The eight compass directions a path may step in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Directions in the order the search visits neighbours.
    pub fn iter() -> Iter<'static, Direction> {
        static DIRS: [Direction; 8] = [
            Direction::North,
            Direction::NorthEast,
            Direction::East,
            Direction::SouthEast,
            Direction::South,
            Direction::SouthWest,
            Direction::West,
            Direction::NorthWest,
        ];
        DIRS.iter()
    }

    /// Coordinate delta `(dx, dy)`; `y` grows downwards.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }
}

/// A cell coordinate. Interior cells are `1..=width` by `1..=height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The neighbouring position in the given direction, or `None` if it
    /// would fall below coordinate zero.
    pub fn step(&self, dir: Direction) -> Option<Position> {
        let (dx, dy) = dir.delta();
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// All neighbours that exist in coordinate space, in search order.
    pub fn adjacent(&self) -> impl Iterator<Item = Position> + '_ {
        Direction::iter().filter_map(move |&d| self.step(d))
    }

    pub fn is_adjacent(&self, other: &Position) -> bool {
        self != other && self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}
