//! Two figures race across an 8x8 table of step counts towards the bottom-right corner, taking
//! turns on perpendicular axes. The crate models the puzzle state and ships a breadth-first
//! solver that works for any state implementing [`two_phase::TwoPhaseMoveState`].

pub mod board;
pub mod figure;
pub mod playout;
pub mod position;
pub mod render;
pub mod solver;
pub mod state;
pub mod two_phase;

pub use board::{Board, BOARD_SIZE, GOAL};
pub use figure::Figure;
pub use position::{Direction, NotAxisAligned, Position};
pub use solver::{solve, BreadthFirstSolver, SolveError};
pub use state::{BoardState, Move, StateError};
pub use two_phase::{TwoPhaseMove, TwoPhaseMoveState};
