//! 3x3x3 Cube Solver
//!
//! Command-line front end: generates scrambles, applies move strings to a
//! solved cube, and solves scrambled cubes with a bounded search.

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use env_logger::TimestampPrecision;
use log::{warn, LevelFilter};

use cube_solver::catalog::{format_sequence, random_scramble, random_scramble_with};
use cube_solver::{PuzzleState, SearchMoves, Solution, Solver, SolverConfig};

/// Scrambles and solves a 3x3x3 cube.
#[derive(Parser)]
#[command(name = "cube-solver")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log verbosity. Repeat for more detail.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a random scramble.
    Scramble {
        /// Number of moves.
        #[arg(short, long, default_value_t = 15)]
        length: usize,
        /// Seed for a reproducible scramble.
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Apply moves to a solved cube and print the result.
    Apply {
        /// Space-separated moves, e.g. "R U R' U'".
        moves: String,
    },
    /// Scramble a solved cube with the given moves, then solve it.
    Solve {
        /// Space-separated moves, e.g. "R U R' U'".
        moves: String,
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Maximum node expansions in the search phase.
    #[arg(long, default_value_t = cube_solver::solver::DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,
    /// Maximum solution length in the search phase.
    #[arg(long, default_value_t = cube_solver::solver::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Expand the search with half turns too.
    #[arg(long)]
    double_turns: bool,
    /// Give up waiting for the solver after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl SearchArgs {
    fn config(&self) -> SolverConfig {
        let search_moves = if self.double_turns {
            SearchMoves::AllTurns
        } else {
            SearchMoves::QuarterTurns
        };
        SolverConfig::default()
            .with_max_iterations(self.max_iterations)
            .with_max_depth(self.max_depth)
            .with_search_moves(search_moves)
    }
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

    match cli.command {
        Some(Command::Scramble { length, seed }) => {
            let scramble = match seed {
                Some(seed) => random_scramble_with(&mut fastrand::Rng::with_seed(seed), length),
                None => random_scramble(length),
            };
            println!("{}", format_sequence(&scramble));
            ExitCode::SUCCESS
        }
        Some(Command::Apply { moves }) => run_apply(&moves),
        Some(Command::Solve { moves, search }) => run_solve(&moves, &search),
        None => {
            // default: solve a fresh random scramble
            let scramble = format_sequence(&random_scramble(15));
            println!("Scramble: {}", scramble);
            run_solve(
                &scramble,
                &SearchArgs {
                    max_iterations: cube_solver::solver::DEFAULT_MAX_ITERATIONS,
                    max_depth: cube_solver::solver::DEFAULT_MAX_DEPTH,
                    double_turns: false,
                    timeout_secs: None,
                },
            )
        }
    }
}

/// Applies `moves` to a solved cube. Returns `None` after reporting a bad token.
fn scrambled(moves: &str) -> Option<PuzzleState> {
    let mut state = PuzzleState::solved();
    match state.scramble(moves) {
        Ok(()) => Some(state),
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}

fn run_apply(moves: &str) -> ExitCode {
    let Some(state) = scrambled(moves) else {
        return ExitCode::FAILURE;
    };

    print!("{}", state);
    println!("Fingerprint: {}", state.fingerprint());
    println!("Solved: {}", state.is_solved());
    ExitCode::SUCCESS
}

fn run_solve(moves: &str, search: &SearchArgs) -> ExitCode {
    let Some(state) = scrambled(moves) else {
        return ExitCode::FAILURE;
    };

    let solver = Solver::new(search.config());
    let solution = match search.timeout_secs {
        Some(secs) => match solve_with_timeout(solver, state, Duration::from_secs(secs)) {
            Some(solution) => solution,
            None => {
                eprintln!("Solver did not finish within {} seconds", secs);
                return ExitCode::FAILURE;
            }
        },
        None => solver.solve(&state),
    };

    println!("Solution: {}", format_sequence(&solution.moves));
    println!(
        "Status: {:?} via {:?} ({} moves, {} expansions)",
        solution.status,
        solution.phase,
        solution.moves.len(),
        solution.stats.nodes_expanded
    );
    ExitCode::SUCCESS
}

/// Runs the solver on a worker thread and stops waiting after `timeout`.
///
/// The solver cannot be cancelled; a late result is dropped when the worker
/// finishes.
fn solve_with_timeout(solver: Solver, state: PuzzleState, timeout: Duration) -> Option<Solution> {
    let (sender, receiver) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        // the receiver is gone if we already timed out
        let _ = sender.send(solver.solve(&state));
    });

    match receiver.recv_timeout(timeout) {
        Ok(solution) => Some(solution),
        Err(e) => {
            warn!("abandoning solver: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_solve_args_map_to_config() {
        let cli = Cli::parse_from([
            "cube-solver",
            "solve",
            "R U",
            "--max-iterations",
            "50",
            "--max-depth",
            "4",
            "--double-turns",
        ]);
        let Some(Command::Solve { moves, search }) = cli.command else {
            panic!("expected the solve subcommand");
        };
        assert_eq!(moves, "R U");
        assert_eq!(
            search.config(),
            SolverConfig::default()
                .with_max_iterations(50)
                .with_max_depth(4)
                .with_search_moves(SearchMoves::AllTurns)
        );
    }

    #[test]
    fn test_solve_with_timeout_returns_result() {
        let mut state = PuzzleState::solved();
        state.scramble("R U").unwrap();
        let solution =
            solve_with_timeout(Solver::default(), state, Duration::from_secs(30)).unwrap();
        assert_eq!(format_sequence(&solution.moves), "U' R'");
    }

    #[test]
    fn test_scrambled_rejects_bad_token() {
        assert!(scrambled("R U5").is_none());
        assert!(scrambled("R U").is_some());
    }
}
