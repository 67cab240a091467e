use std::fmt;
use std::hash::{Hash, Hasher};

use fxhash::FxHashSet;
use log::debug;
use thiserror::Error;

use crate::board::{Board, GOAL};
use crate::figure::Figure;
use crate::position::{Direction, NotAxisAligned, Position};
use crate::two_phase::{TwoPhaseMove, TwoPhaseMoveState};

pub type Move = TwoPhaseMove<Position>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("No figure stands on {0}")]
    NoFigureAt(Position),
    #[error("Illegal move: {0}")]
    IllegalMove(Move),
    #[error(transparent)]
    NotAxisAligned(#[from] NotAxisAligned),
}

/// Two figures on a shared rule table.
///
/// Figures take turns within a round: once a figure has moved it has to wait until the other
/// one has moved too, and the second mover must travel perpendicular to the first. When both
/// have moved, the round closes and both may move again.
///
/// States are values. [`make_move`](Self::make_move) returns a new state and never touches the
/// receiver, which is what lets the solver keep states as hash keys.
#[derive(Clone, Copy)]
pub struct BoardState<'b> {
    board: &'b Board,
    figures: [Figure; 2],
}

impl<'b> BoardState<'b> {
    /// The starting state: both figures in the top-left corner, neither has moved.
    pub fn new(board: &'b Board) -> Self {
        Self::with_figures(board, Figure::default(), Figure::default())
    }

    pub fn with_figures(board: &'b Board, first: Figure, second: Figure) -> Self {
        Self {
            board,
            figures: [first, second],
        }
    }

    pub fn board(&self) -> &'b Board {
        self.board
    }

    pub fn figures(&self) -> &[Figure; 2] {
        &self.figures
    }

    pub fn first(&self) -> Figure {
        self.figures[0]
    }

    pub fn second(&self) -> Figure {
        self.figures[1]
    }

    /// Index of the figure that would move from `from`.
    ///
    /// A figure that is still allowed to move wins over one that has already moved. When both
    /// figures share the cell and both are allowed to move, the first one is picked.
    fn mover_index(&self, from: Position) -> Option<usize> {
        let standing = |figure: &Figure| figure.position == from;
        self.figures
            .iter()
            .position(|figure| standing(figure) && figure.can_move())
            .or_else(|| self.figures.iter().position(standing))
    }

    pub fn is_legal_to_move_from(&self, position: Position) -> bool {
        self.figures
            .iter()
            .any(|figure| figure.position == position && figure.can_move())
    }

    /// Last move of the figure that is not the one leaving `from`.
    pub fn other_figures_last_move(&self, from: Position) -> Result<Direction, StateError> {
        let index = self.mover_index(from).ok_or(StateError::NoFigureAt(from))?;
        Ok(self.figures[1 - index].last_move)
    }

    /// Directions available to the figure on `from`, which depend on how the other figure moved
    /// in this round.
    pub fn legal_directions(&self, from: Position) -> Result<&'static [Direction], StateError> {
        Ok(self.other_figures_last_move(from)?.perpendicular())
    }

    /// Where `figure` may go from its current cell, legal or not with respect to the board edges.
    fn candidate_moves(&self, figure: &Figure) -> impl Iterator<Item = Move> {
        let from = figure.position;
        let steps = self.board.step_count(from).map_or(0, i32::from);
        Direction::MOVABLE
            .into_iter()
            .map(move |direction| Move::new(from, from.projected(direction, steps)))
    }

    pub fn is_legal_move(&self, mv: &Move) -> bool {
        if !Board::is_valid_position(mv.to) || mv.from == mv.to {
            return false;
        }
        if !self.is_legal_to_move_from(mv.from) {
            return false;
        }
        let Some(steps) = self.board.step_count(mv.from) else {
            return false;
        };
        let Ok(directions) = self.legal_directions(mv.from) else {
            return false;
        };

        directions
            .iter()
            .any(|&direction| mv.from.projected(direction, i32::from(steps)) == mv.to)
    }

    pub fn legal_moves(&self) -> FxHashSet<Move> {
        self.figures
            .iter()
            .flat_map(|figure| self.candidate_moves(figure))
            .filter(|mv| self.is_legal_move(mv))
            .collect()
    }

    /// Applies a legal move, returning the resulting state.
    ///
    /// The figure leaving `mv.from` records the direction it travelled in. If that completes a
    /// round, both figures are reset to [`Direction::None`].
    pub fn make_move(&self, mv: &Move) -> Result<Self, StateError> {
        if !self.is_legal_move(mv) {
            return Err(StateError::IllegalMove(*mv));
        }
        let index = self
            .mover_index(mv.from)
            .ok_or(StateError::NoFigureAt(mv.from))?;
        let direction = mv.from.direction_to(mv.to)?;

        let mut next = *self;
        next.figures[index] = next.figures[index].moved_to(mv.to, direction);
        if next.figures.iter().all(|figure| !figure.can_move()) {
            next.figures = next.figures.map(Figure::rested);
        }

        debug!("Figure {} moved {}: {}", index + 1, direction, mv);
        Ok(next)
    }

    pub fn is_solved(&self) -> bool {
        self.figures.iter().all(|figure| figure.position == GOAL)
    }

    /// A figure is stuck on a zero cell away from the goal, so the game can no longer be won.
    pub fn is_stranded(&self) -> bool {
        !self.is_solved()
            && self.figures.iter().any(|figure| {
                figure.position != GOAL && self.board.step_count(figure.position) == Some(0)
            })
    }

    /// No legal move is left and the puzzle is not solved.
    pub fn is_stuck(&self) -> bool {
        !self.is_solved() && self.legal_moves().is_empty()
    }
}

impl PartialEq for BoardState<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.figures == other.figures
            && (std::ptr::eq(self.board, other.board) || self.board == other.board)
    }
}

impl Eq for BoardState<'_> {}

impl Hash for BoardState<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.figures.hash(state);
    }
}

impl fmt::Debug for BoardState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardState")
            .field("first", &self.figures[0])
            .field("second", &self.figures[1])
            .finish()
    }
}

impl fmt::Display for BoardState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, steps) in self.board.rows().enumerate() {
            for (column, &val) in steps.iter().enumerate() {
                let here = Position::new(row as i32, column as i32);
                let marker = match (
                    self.figures[0].position == here,
                    self.figures[1].position == here,
                ) {
                    (true, true) => "AB".to_owned(),
                    (true, false) => "A".to_owned(),
                    (false, true) => "B".to_owned(),
                    (false, false) => val.to_string(),
                };
                write!(f, "{:>3}", marker)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl TwoPhaseMoveState for BoardState<'_> {
    type Position = Position;
    type Error = StateError;

    fn legal_moves(&self) -> FxHashSet<Move> {
        BoardState::legal_moves(self)
    }

    fn is_legal_move(&self, mv: &Move) -> bool {
        BoardState::is_legal_move(self, mv)
    }

    fn apply_move(&self, mv: &Move) -> Result<Self, StateError> {
        self.make_move(mv)
    }

    fn is_solved(&self) -> bool {
        BoardState::is_solved(self)
    }
}
