//! 3x3x3 Cube Solver Library
//!
//! Models the cube as 54 colored stickers, applies the 18 face turns, and
//! searches for a move sequence back to the solved state with a bounded
//! breadth-first search plus a canned-algorithm fallback.
//!
//! Callers own their [`PuzzleState`] values and thread them through calls;
//! the library keeps no global cube.

pub mod catalog;
pub mod moves;
pub mod solver;
pub mod state;

pub use catalog::{all_moves, random_scramble, ALL_MOVES, QUARTER_TURNS};
pub use moves::{InvalidMoveError, Move, Turn};
pub use solver::{
    AlgorithmList, FallbackStrategy, NamedAlgorithm, SearchMoves, Solution, SolvePhase,
    SolveStatus, Solver, SolverConfig,
};
pub use state::{Color, Face, Fingerprint, PuzzleState};

/// Solves `state` with the default budgets and canned fallback.
pub fn solve(state: &PuzzleState) -> Solution {
    Solver::default().solve(state)
}
