//! Core domain types for the block-pushing puzzle.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell coordinate on the grid.
///
/// Coordinates are signed so that any integer pair can be asked about,
/// including the [`Coord::SENTINEL`] that marks a removed obstacle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({x}, {y})")]
pub struct Coord {
    /// Column, growing to the right.
    pub x: i32,
    /// Row, growing downwards.
    pub y: i32,
}

impl Coord {
    /// Off-grid position of an obstacle that has been removed from play.
    pub const SENTINEL: Coord = Coord { x: -1, y: -1 };

    /// Creates a coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true if this is the removed-from-play sentinel.
    pub fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }

    /// Returns the neighbouring coordinate one step in `direction`.
    ///
    /// [`Direction::Stay`] returns the coordinate unchanged.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A decoded button press.
///
/// `Stay` is what the input side reports when no direction button is held.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
    /// No direction pressed.
    #[default]
    Stay,
}

impl Direction {
    /// The four directions that actually move something.
    pub const MOVES: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit delta `(dx, dy)` for this direction.
    ///
    /// At most one component is nonzero, so diagonal motion cannot be
    /// expressed.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Stay => (0, 0),
        }
    }

    /// Returns the direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Stay => Direction::Stay,
        }
    }

    /// Decodes one character of move-script notation.
    ///
    /// `U`, `D`, `L`, `R` (either case) and `.` for no move.
    #[instrument]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            '.' => Some(Direction::Stay),
            _ => None,
        }
    }

    /// Encodes this direction in move-script notation.
    pub fn to_char(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Stay => '.',
        }
    }
}
