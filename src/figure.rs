use std::fmt;

use crate::position::{Direction, Position};

/// One of the two tokens on the board, together with the direction it moved in during the
/// current round ([`Direction::None`] if it has not moved yet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Figure {
    pub position: Position,
    pub last_move: Direction,
}

impl Figure {
    pub const fn new(position: Position, last_move: Direction) -> Self {
        Self {
            position,
            last_move,
        }
    }

    /// A figure may only leave its cell if it has not moved yet this round.
    #[inline]
    pub fn can_move(&self) -> bool {
        self.last_move == Direction::None
    }

    #[must_use]
    pub fn moved_to(self, position: Position, direction: Direction) -> Self {
        Self::new(position, direction)
    }

    #[must_use]
    pub fn rested(self) -> Self {
        Self::new(self.position, Direction::None)
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.position, self.last_move)
    }
}
