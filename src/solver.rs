//! Breadth-first search over any [`TwoPhaseMoveState`].

use std::collections::VecDeque;
use std::time::Instant;

use fxhash::FxHashSet;
use log::{info, trace};
use thiserror::Error;

use crate::two_phase::{TwoPhaseMove, TwoPhaseMoveState};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SolveError<E: std::error::Error + 'static> {
    #[error("No solved state is reachable ({explored} states explored)")]
    Unsolvable { explored: usize },
    #[error("Gave up after discovering {explored} states (limit {limit})")]
    BudgetExceeded { limit: usize, explored: usize },
    #[error("A listed legal move was rejected by the state: {0}")]
    Rejected(#[source] E),
}

/// The edge that first reached a discovered state, indexed by discovery order.
type Parent<P> = Option<(usize, TwoPhaseMove<P>)>;

/// Finds a shortest move sequence from a start state to a solved state.
///
/// Every state is expanded at most once, so the search terminates on any finite state space.
/// Moves out of a state are tried in ascending order, which makes the returned solution
/// deterministic when several shortest ones exist.
#[derive(Debug, Clone, Default)]
pub struct BreadthFirstSolver {
    max_states: Option<usize>,
}

impl BreadthFirstSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the search with [`SolveError::BudgetExceeded`] when an unsolved state would push the
    /// number of discovered states past `max_states`. A solved state is always accepted.
    #[must_use]
    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = Some(max_states);
        self
    }

    pub fn max_states(&self) -> Option<usize> {
        self.max_states
    }

    pub fn solve<S: TwoPhaseMoveState>(
        &self,
        start: &S,
    ) -> Result<Vec<TwoPhaseMove<S::Position>>, SolveError<S::Error>> {
        let started = Instant::now();
        info!("Starting breadth-first search");

        if start.is_solved() {
            info!("Start state is already solved");
            return Ok(Vec::new());
        }

        // States live in `visited`; the frontier only holds the ones not expanded yet.
        let mut parents: Vec<Parent<S::Position>> = vec![None];
        let mut visited: FxHashSet<S> = FxHashSet::default();
        visited.insert(start.clone());
        let mut frontier: VecDeque<(usize, S)> = VecDeque::from([(0, start.clone())]);
        let mut depth_marker = (0, 0);

        while let Some((id, state)) = frontier.pop_front() {
            // Frontier ids are handed out in discovery order, so a new layer starts with the
            // first id past the previous layer's last one.
            if id >= depth_marker.1 {
                trace!("Layer {} holds {} states", depth_marker.0, parents.len() - id);
                depth_marker = (depth_marker.0 + 1, parents.len());
            }

            for mv in state.sorted_legal_moves() {
                let next = state.apply_move(&mv).map_err(SolveError::Rejected)?;
                if visited.contains(&next) {
                    continue;
                }

                // Discovery order is breadth-first, so the first solved state seen is a
                // shallowest one. It is accepted even when the budget is used up.
                if next.is_solved() {
                    parents.push(Some((id, mv)));
                    let path = reconstruct(&parents, parents.len() - 1);
                    info!(
                        "Found a {} move solution after discovering {} states in {:.3}s",
                        path.len(),
                        parents.len(),
                        started.elapsed().as_secs_f64()
                    );
                    return Ok(path);
                }

                if let Some(limit) = self.max_states {
                    if parents.len() >= limit {
                        info!("State budget of {limit} exhausted");
                        return Err(SolveError::BudgetExceeded {
                            limit,
                            explored: parents.len(),
                        });
                    }
                }

                let next_id = parents.len();
                parents.push(Some((id, mv)));
                visited.insert(next.clone());
                frontier.push_back((next_id, next));
            }
        }

        info!(
            "Exhausted {} states in {:.3}s without reaching a solved state",
            parents.len(),
            started.elapsed().as_secs_f64()
        );
        Err(SolveError::Unsolvable {
            explored: parents.len(),
        })
    }
}

/// Solves `start` without a state budget.
pub fn solve<S: TwoPhaseMoveState>(
    start: &S,
) -> Result<Vec<TwoPhaseMove<S::Position>>, SolveError<S::Error>> {
    BreadthFirstSolver::new().solve(start)
}

/// Walks parent links from `id` back to the root and returns the moves in playing order.
fn reconstruct<P: Copy>(parents: &[Parent<P>], mut id: usize) -> Vec<TwoPhaseMove<P>> {
    let mut path = Vec::new();
    while let Some((parent, mv)) = parents[id] {
        path.push(mv);
        id = parent;
    }
    path.reverse();
    path
}
