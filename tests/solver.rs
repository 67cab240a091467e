use fxhash::FxHashSet;
use log::info;
use twin_figures::{
    solve, Board, BoardState, BreadthFirstSolver, Direction, Figure, Position, SolveError,
    TwoPhaseMoveState, GOAL,
};

/// Number of move layers a plain frontier expansion needs before it touches a solved
/// state, computed without the solver.
fn depth_of_first_solution(start: &BoardState<'_>) -> Option<usize> {
    let mut seen: FxHashSet<BoardState<'_>> = [*start].into_iter().collect();
    let mut layer = vec![*start];
    let mut depth = 0;

    while !layer.is_empty() {
        if layer.iter().any(|state| state.is_solved()) {
            return Some(depth);
        }
        let mut next_layer = Vec::new();
        for state in &layer {
            for mv in state.legal_moves() {
                let next = state.make_move(&mv).unwrap();
                if seen.insert(next) {
                    next_layer.push(next);
                }
            }
        }
        layer = next_layer;
        depth += 1;
    }
    None
}

fn reachable(start: &BoardState<'_>) -> usize {
    let mut seen: FxHashSet<BoardState<'_>> = [*start].into_iter().collect();
    let mut stack = vec![*start];
    while let Some(state) = stack.pop() {
        for mv in state.legal_moves() {
            let next = state.make_move(&mv).unwrap();
            if seen.insert(next) {
                stack.push(next);
            }
        }
    }
    seen.len()
}

#[test_log::test]
fn standard_board_is_solved_by_replaying_the_solution() {
    let start = BoardState::new(&Board::STANDARD);
    let solution = solve(&start).unwrap();
    info!("Solution: {solution:?}");

    assert!(!solution.is_empty());
    assert_eq!(solution.len(), 14);

    let mut state = start;
    for mv in &solution {
        assert!(state.is_legal_move(mv), "{mv} is not legal in {state:?}");
        state = state.make_move(mv).unwrap();
    }
    assert!(state.is_solved());
    assert_eq!(state.first().position, GOAL);
    assert_eq!(state.second().position, GOAL);
    assert_eq!(start, BoardState::new(&Board::STANDARD));
}

#[test_log::test]
fn solution_is_as_short_as_any() {
    let start = BoardState::new(&Board::STANDARD);
    let solution = solve(&start).unwrap();
    assert_eq!(depth_of_first_solution(&start), Some(solution.len()));
}

#[test_log::test]
fn solving_is_deterministic() {
    let start = BoardState::new(&Board::STANDARD);
    assert_eq!(solve(&start).unwrap(), solve(&start).unwrap());
}

#[test_log::test]
fn standard_reachable_state_count() {
    let start = BoardState::new(&Board::STANDARD);
    assert_eq!(reachable(&start), 8392);
}

#[test_log::test]
fn isolated_start_is_unsolvable() {
    let mut steps = [[1; 8]; 8];
    steps[0][0] = 0;
    let board = Board::new(steps);
    let start = BoardState::new(&board);

    assert!(start.legal_moves().is_empty());
    assert_eq!(solve(&start), Err(SolveError::Unsolvable { explored: 1 }));
}

#[test_log::test]
fn walled_off_goal_is_unsolvable() {
    // Outside the top-left quadrant every cell throws a figure off the board, and two-cell hops
    // from inside the quadrant never get close to the goal.
    let mut steps = [[8; 8]; 8];
    for row in steps.iter_mut().take(4) {
        for cell in row.iter_mut().take(4) {
            *cell = 2;
        }
    }
    let board = Board::new(steps);
    let start = BoardState::new(&board);

    match solve(&start) {
        Err(SolveError::Unsolvable { explored }) => assert!(explored > 1),
        other => panic!("expected an unsolvable board, got {other:?}"),
    }
}

#[test_log::test]
fn budget_exhaustion_is_not_unsolvability() {
    let start = BoardState::new(&Board::STANDARD);
    let solver = BreadthFirstSolver::new().with_max_states(100);
    assert_eq!(
        solver.solve(&start),
        Err(SolveError::BudgetExceeded {
            limit: 100,
            explored: 100
        })
    );

    let generous = BreadthFirstSolver::new().with_max_states(100_000);
    assert_eq!(generous.solve(&start).unwrap().len(), 14);
}

#[test_log::test]
fn budget_covering_the_goal_still_solves() {
    // The goal is the 2157th state discovered on the standard board, well before the layer
    // holding it has been expanded.
    let start = BoardState::new(&Board::STANDARD);
    let solver = BreadthFirstSolver::new().with_max_states(2157);
    assert_eq!(solver.solve(&start).unwrap().len(), 14);
}

#[test_log::test]
fn solving_from_the_middle_of_a_round() {
    // One figure has already moved right; the other must answer vertically.
    let start = BoardState::with_figures(
        &Board::STANDARD,
        Figure::new(Position::new(0, 3), Direction::Right),
        Figure::default(),
    );
    let solution = solve(&start).unwrap();
    assert_eq!(solution[0].from, Position::new(0, 0));
    assert_eq!(solution[0].to, Position::new(3, 0));

    let end = solution
        .iter()
        .try_fold(start, |state, mv| state.apply_move(mv))
        .unwrap();
    assert!(end.is_solved());
}
