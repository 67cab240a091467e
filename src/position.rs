use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul};

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{from} and {to} are not on the same row or column")]
pub struct NotAxisAligned {
    pub from: Position,
    pub to: Position,
}

/// A cell on the board, addressed by row and column from the top-left corner.
///
/// Coordinates are plain values: a `Position` may lie outside the board, and it is up to the
/// board to decide whether it can be occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    #[inline]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// The cell reached by walking `steps` cells from `self` towards `direction`.
    ///
    /// No bounds check is made here.
    #[inline]
    pub fn projected(self, direction: Direction, steps: i32) -> Position {
        self + direction.as_offset() * steps
    }

    /// The cardinal direction leading from `self` to `to`.
    ///
    /// Returns [`Direction::None`] when both positions are equal and fails when the positions
    /// differ along both axes.
    pub fn direction_to(self, to: Position) -> Result<Direction, NotAxisAligned> {
        match (to.row.cmp(&self.row), to.column.cmp(&self.column)) {
            (Ordering::Equal, Ordering::Equal) => Ok(Direction::None),
            (Ordering::Less, Ordering::Equal) => Ok(Direction::Up),
            (Ordering::Greater, Ordering::Equal) => Ok(Direction::Down),
            (Ordering::Equal, Ordering::Less) => Ok(Direction::Left),
            (Ordering::Equal, Ordering::Greater) => Ok(Direction::Right),
            _ => Err(NotAxisAligned { from: self, to }),
        }
    }
}

impl Add for Position {
    type Output = Position;

    #[inline]
    fn add(self, rhs: Position) -> Self::Output {
        Position::new(self.row + rhs.row, self.column + rhs.column)
    }
}

impl Mul<i32> for Position {
    type Output = Position;

    #[inline]
    fn mul(self, rhs: i32) -> Self::Output {
        Position::new(self.row * rhs, self.column * rhs)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
    /// The figure has not moved in the current round.
    #[default]
    None,
}

impl Direction {
    /// Every direction a figure can actually travel in.
    pub const MOVABLE: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn as_offset(&self) -> Position {
        match self {
            Direction::Up => Position::new(-1, 0),
            Direction::Right => Position::new(0, 1),
            Direction::Down => Position::new(1, 0),
            Direction::Left => Position::new(0, -1),
            Direction::None => Position::new(0, 0),
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// The directions a figure may take after the other figure moved in `self`.
    pub fn perpendicular(&self) -> &'static [Direction] {
        if self.is_vertical() {
            &[Direction::Left, Direction::Right]
        } else if self.is_horizontal() {
            &[Direction::Up, Direction::Down]
        } else {
            &Direction::MOVABLE
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Direction::Up => "Up",
            Direction::Right => "Right",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::None => "None",
        };
        write!(f, "{}", s)
    }
}
