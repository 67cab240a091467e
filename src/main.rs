mod record;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::TimestampPrecision;
use log::{error, info, warn, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use record::{append_record, GameRecord, RecordError};
use twin_figures::board::BoardError;
use twin_figures::playout::random_walk;
use twin_figures::render::colored;
use twin_figures::{Board, BoardState, BreadthFirstSolver, Move, Position, SolveError, StateError};

/// Two figures, one 8x8 table of step counts, one goal in the bottom-right corner
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// A custom rule table in TOML format (`steps = [[...], ...]`). Defaults to the standard table.
    #[arg(long, short = 'b', value_name = "BOARD")]
    board: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a shortest solution from the start position and replay it.
    Solve {
        /// Give up after discovering this many states.
        #[arg(long)]
        max_states: Option<usize>,
    },
    /// Play interactively by entering `row column row column` for each move.
    Play {
        /// Name stored alongside the outcome.
        #[arg(long, short = 'p', default_value = "player")]
        player: String,
        /// Append the outcome of the game to this JSON file.
        #[arg(long, short = 's', value_name = "FILE")]
        save: Option<PathBuf>,
    },
    /// Play random legal moves from the start position.
    Walk {
        /// Maximum number of moves to play.
        #[arg(long, short = 'n', default_value_t = 20)]
        moves: usize,
        /// Seed for a reproducible walk.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Solve(#[from] SolveError<StateError>),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let board = match &cli.board {
        Some(path) => Board::load(path)?,
        None => Board::STANDARD,
    };
    let start = BoardState::new(&board);

    match cli.command {
        Commands::Solve { max_states } => run_solve(&start, max_states),
        Commands::Play { player, save } => run_play(&start, player, save),
        Commands::Walk { moves, seed } => run_walk(&start, moves, seed),
    }
}

fn run_solve(start: &BoardState<'_>, max_states: Option<usize>) -> Result<(), CliError> {
    let mut solver = BreadthFirstSolver::new();
    if let Some(limit) = max_states {
        solver = solver.with_max_states(limit);
    }

    println!("Initial board:\n{}", colored(start));
    let solution = solver.solve(start)?;
    println!("Found optimal solution with {} moves", solution.len());

    let mut state = *start;
    for (index, mv) in solution.iter().enumerate() {
        state = state.make_move(mv)?;
        println!("{}. {}\n{}", index + 1, mv, colored(&state));
    }
    Ok(())
}

fn run_walk(start: &BoardState<'_>, moves: usize, seed: Option<u64>) -> Result<(), CliError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let playout = random_walk(start, moves, &mut rng)?;
    for (index, (mv, state)) in playout.moves.iter().zip(&playout.states[1..]).enumerate() {
        println!("{}. {}\n{}", index + 1, mv, colored(state));
    }

    let last = playout.last();
    if last.is_solved() {
        println!("Solved after {} moves", playout.moves.len());
    } else if last.is_stuck() {
        println!("No legal move left after {} moves", playout.moves.len());
    }
    Ok(())
}

/// Parses `row column row column` into a move.
fn parse_move(line: &str) -> Option<Move> {
    let numbers = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse::<i32>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    match numbers[..] {
        [from_row, from_column, to_row, to_column] => Some(Move::new(
            Position::new(from_row, from_column),
            Position::new(to_row, to_column),
        )),
        _ => None,
    }
}

fn run_play(
    start: &BoardState<'_>,
    player: String,
    save: Option<PathBuf>,
) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut state = *start;
    let mut move_count = 0;

    println!("{}", colored(&state));
    loop {
        print!("move ('row col row col', 'hint' or 'quit')> ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "q" => break,
            "hint" => {
                match BreadthFirstSolver::new().solve(&state) {
                    Ok(solution) => match solution.first() {
                        Some(mv) => println!("Try {mv} ({} moves to go)", solution.len()),
                        None => println!("Already solved"),
                    },
                    Err(SolveError::Unsolvable { .. }) => println!("The goal is out of reach"),
                    Err(e) => return Err(e.into()),
                }
                continue;
            }
            _ => {}
        }

        let Some(mv) = parse_move(line) else {
            warn!("Could not read a move from {line:?}");
            continue;
        };
        if !state.is_legal_to_move_from(mv.from) {
            println!("No figure can move from {}", mv.from);
            continue;
        }
        if !state.is_legal_move(&mv) {
            println!("Illegal move: {mv}");
            continue;
        }

        state = state.make_move(&mv)?;
        move_count += 1;
        info!("Move {move_count}: {mv}");
        println!("{}", colored(&state));

        if state.is_solved() {
            println!("Congratulations {player}, you solved the puzzle in {move_count} moves!");
            break;
        }
        if state.is_stranded() || state.is_stuck() {
            println!("Game over: a figure can no longer move.");
            break;
        }
    }

    if let Some(path) = save {
        match finished_record(&state, player, move_count) {
            Some(record) => append_record(&path, record)?,
            None => info!("Game left unfinished, nothing saved"),
        }
    }
    Ok(())
}

/// The record of a game that ended on its own: solved, or with a figure unable to move.
///
/// Abandoned games yield `None`.
fn finished_record(
    state: &BoardState<'_>,
    player_name: String,
    move_count: usize,
) -> Option<GameRecord> {
    let solved = state.is_solved();
    (solved || state.is_stranded() || state.is_stuck()).then_some(GameRecord {
        player_name,
        move_count,
        solved,
    })
}
