//! A puzzle-agnostic view of states whose moves are given by an origin and a destination.
//!
//! Anything implementing [`TwoPhaseMoveState`] can be handed to
//! [`BreadthFirstSolver`](crate::solver::BreadthFirstSolver).

use std::fmt;
use std::hash::Hash;

use fxhash::FxHashSet;

/// A move described only by the cell it starts from and the cell it ends on. Which piece moves
/// is left to the state to decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TwoPhaseMove<P> {
    pub from: P,
    pub to: P,
}

impl<P> TwoPhaseMove<P> {
    pub const fn new(from: P, to: P) -> Self {
        Self { from, to }
    }
}

impl<P: fmt::Display> fmt::Display for TwoPhaseMove<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

pub trait TwoPhaseMoveState: Clone + Eq + Hash {
    /// How a cell is addressed in this puzzle.
    type Position: Copy + Eq + Hash + Ord + fmt::Debug;
    /// Returned when a move that is not legal is applied.
    type Error: std::error::Error + 'static;

    /// Every legal move from this state.
    fn legal_moves(&self) -> FxHashSet<TwoPhaseMove<Self::Position>>;

    fn is_legal_move(&self, mv: &TwoPhaseMove<Self::Position>) -> bool;

    /// The state after `mv`. `self` is left untouched.
    fn apply_move(&self, mv: &TwoPhaseMove<Self::Position>) -> Result<Self, Self::Error>;

    fn is_solved(&self) -> bool;

    /// [`legal_moves`](Self::legal_moves) in ascending order, so that callers iterating over
    /// moves see the same sequence on every run.
    fn sorted_legal_moves(&self) -> Vec<TwoPhaseMove<Self::Position>> {
        let mut moves: Vec<_> = self.legal_moves().into_iter().collect();
        moves.sort_unstable();
        moves
    }
}
