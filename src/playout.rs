use rand::{seq::SliceRandom, Rng};

use crate::two_phase::{TwoPhaseMove, TwoPhaseMoveState};

/// The states and moves of a random game.
#[derive(Debug, Clone)]
pub struct Playout<S: TwoPhaseMoveState> {
    /// Every state visited, starting with the initial one.
    pub states: Vec<S>,
    pub moves: Vec<TwoPhaseMove<S::Position>>,
}

impl<S: TwoPhaseMoveState> Playout<S> {
    pub fn last(&self) -> &S {
        // `states` always holds the start state.
        &self.states[self.states.len() - 1]
    }
}

/// Plays up to `max_moves` uniformly random legal moves from `start`, stopping early on a solved
/// state or one without legal moves.
pub fn random_walk<S, R>(start: &S, max_moves: usize, rng: &mut R) -> Result<Playout<S>, S::Error>
where
    S: TwoPhaseMoveState,
    R: Rng + ?Sized,
{
    let mut playout = Playout {
        states: vec![start.clone()],
        moves: Vec::new(),
    };

    while playout.moves.len() < max_moves {
        let current = playout.last();
        if current.is_solved() {
            break;
        }
        let Some(&mv) = current.sorted_legal_moves().choose(rng) else {
            break;
        };
        let next = current.apply_move(&mv)?;
        playout.moves.push(mv);
        playout.states.push(next);
    }

    log::debug!("Random walk played {} moves", playout.moves.len());
    Ok(playout)
}
