//! Bounded breadth-first solver with a canned-algorithm fallback.
//!
//! Two phases:
//! - A breadth-first search over states, deduplicated by fingerprint, capped
//!   by an expansion budget and a path-length bound.
//! - If that finds nothing, a [`FallbackStrategy`] runs on a working copy and
//!   whatever it produced is returned.
//!
//! The result is best effort. Check [`Solution::status`] (or re-check the
//! state) before treating the moves as a solution.

use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, info, trace};
use rustc_hash::FxHashSet;

use crate::catalog::{format_sequence, ALL_MOVES, QUARTER_TURNS};
use crate::moves::{Move, Turn};
use crate::state::Face::{F, L, R, U};
use crate::state::{Face, Fingerprint, PuzzleState};

/// Default cap on node expansions in the search phase.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Default path-length bound in the search phase.
pub const DEFAULT_MAX_DEPTH: usize = 12;

/// Moves used to expand search nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMoves {
    /// The 12 quarter turns. Smaller branching factor, shallower reach.
    #[default]
    QuarterTurns,
    /// The full 18-move catalog, half turns included.
    AllTurns,
}

impl SearchMoves {
    pub fn moves(self) -> &'static [Move] {
        match self {
            SearchMoves::QuarterTurns => &QUARTER_TURNS,
            SearchMoves::AllTurns => &ALL_MOVES,
        }
    }
}

/// Search budgets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximum number of frontier nodes dequeued.
    pub max_iterations: usize,
    /// Nodes whose path is this long are never expanded.
    pub max_depth: usize,
    pub search_moves: SearchMoves,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_depth: DEFAULT_MAX_DEPTH,
            search_moves: SearchMoves::default(),
        }
    }
}

impl SolverConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_search_moves(mut self, search_moves: SearchMoves) -> Self {
        self.search_moves = search_moves;
        self
    }
}

/// Whether the returned moves actually solve the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    Solved,
    /// Neither phase reached the solved state; the moves are partial progress.
    Exhausted,
}

/// Which phase produced the returned moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolvePhase {
    AlreadySolved,
    Search,
    Fallback,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Frontier nodes dequeued.
    pub nodes_expanded: usize,
    /// Distinct fingerprints recorded, the input included.
    pub states_seen: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub moves: Vec<Move>,
    pub status: SolveStatus,
    pub phase: SolvePhase,
    pub stats: SearchStats,
}

impl Solution {
    pub fn is_solved(&self) -> bool {
        self.status == SolveStatus::Solved
    }
}

/// A strategy run on a working copy once the search phase fails.
pub trait FallbackStrategy {
    fn name(&self) -> &str;

    /// Applies moves to `state`, pushing every applied move onto `moves`.
    ///
    /// Returns true iff `state` ends up solved. Must stop as soon as it is.
    fn attempt(&self, state: &mut PuzzleState, moves: &mut Vec<Move>) -> bool;
}

/// A fixed, named move sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedAlgorithm {
    pub name: &'static str,
    pub moves: Vec<Move>,
}

impl NamedAlgorithm {
    pub fn new(name: &'static str, moves: &[Move]) -> Self {
        Self {
            name,
            moves: moves.to_vec(),
        }
    }
}

const fn cw(face: Face) -> Move {
    Move::new(face, Turn::Clockwise)
}

const fn ccw(face: Face) -> Move {
    Move::new(face, Turn::CounterClockwise)
}

const fn double(face: Face) -> Move {
    Move::new(face, Turn::Double)
}

/// `R U R' U R U2 R'`
const RIGHT_HAND: &[Move] = &[cw(R), cw(U), ccw(R), cw(U), cw(R), double(U), ccw(R)];

/// `L' U' L U' L' U2 L`
const LEFT_HAND: &[Move] = &[ccw(L), ccw(U), cw(L), ccw(U), ccw(L), double(U), cw(L)];

/// `F R U' R' U' R U R' F'`
const ORIENTATION: &[Move] = &[
    cw(F),
    cw(R),
    ccw(U),
    ccw(R),
    ccw(U),
    cw(R),
    cw(U),
    ccw(R),
    ccw(F),
];

/// `R U R' F' R U R' U' R' F R2 U' R'`
const PERMUTATION: &[Move] = &[
    cw(R),
    cw(U),
    ccw(R),
    ccw(F),
    cw(R),
    cw(U),
    ccw(R),
    ccw(U),
    ccw(R),
    cw(F),
    double(R),
    ccw(U),
    ccw(R),
];

/// Ordered list of algorithms applied back to back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlgorithmList {
    algorithms: Vec<NamedAlgorithm>,
}

impl AlgorithmList {
    pub fn new(algorithms: Vec<NamedAlgorithm>) -> Self {
        Self { algorithms }
    }

    /// Right-hand, left-hand, orientation and permutation triggers.
    pub fn canned() -> Self {
        Self::new(vec![
            NamedAlgorithm::new("right-hand", RIGHT_HAND),
            NamedAlgorithm::new("left-hand", LEFT_HAND),
            NamedAlgorithm::new("orientation", ORIENTATION),
            NamedAlgorithm::new("permutation", PERMUTATION),
        ])
    }

    pub fn algorithms(&self) -> &[NamedAlgorithm] {
        &self.algorithms
    }
}

impl Default for AlgorithmList {
    fn default() -> Self {
        Self::canned()
    }
}

impl FallbackStrategy for AlgorithmList {
    fn name(&self) -> &str {
        "algorithm-list"
    }

    fn attempt(&self, state: &mut PuzzleState, moves: &mut Vec<Move>) -> bool {
        for algorithm in &self.algorithms {
            if state.is_solved() {
                return true;
            }
            trace!("fallback: applying {}", algorithm.name);

            for &mv in &algorithm.moves {
                state.apply(mv);
                moves.push(mv);
                if state.is_solved() {
                    return true;
                }
            }
        }

        state.is_solved()
    }
}

/// A search-tree node: a state snapshot and the path that reached it.
struct SearchNode {
    state: PuzzleState,
    path: Vec<Move>,
}

/// Stateless between calls: every `solve` starts from scratch and is
/// deterministic for a given input, config and fallback.
pub struct Solver {
    config: SolverConfig,
    fallback: Box<dyn FallbackStrategy + Send + Sync>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            fallback: Box::new(AlgorithmList::canned()),
        }
    }

    /// Replaces the fallback phase; the search phase is unchanged.
    pub fn with_fallback(mut self, fallback: Box<dyn FallbackStrategy + Send + Sync>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Searches for moves returning `state` to solved. `state` is not mutated.
    pub fn solve(&self, state: &PuzzleState) -> Solution {
        if state.is_solved() {
            return Solution {
                moves: Vec::new(),
                status: SolveStatus::Solved,
                phase: SolvePhase::AlreadySolved,
                stats: SearchStats::default(),
            };
        }

        let start_time = Instant::now();
        let (found, stats) = self.breadth_first(state);

        let solution = match found {
            Some(moves) => Solution {
                moves,
                status: SolveStatus::Solved,
                phase: SolvePhase::Search,
                stats,
            },
            None => {
                debug!(
                    "search exhausted after {} expansions, running fallback `{}`",
                    stats.nodes_expanded,
                    self.fallback.name()
                );
                let mut working = state.clone();
                let mut moves = Vec::new();
                let solved = self.fallback.attempt(&mut working, &mut moves);
                Solution {
                    moves,
                    status: if solved {
                        SolveStatus::Solved
                    } else {
                        SolveStatus::Exhausted
                    },
                    phase: SolvePhase::Fallback,
                    stats,
                }
            }
        };

        info!(
            "{:?} via {:?} in {:.2?}: {} moves, {} expansions, {} states [{}]",
            solution.status,
            solution.phase,
            start_time.elapsed(),
            solution.moves.len(),
            solution.stats.nodes_expanded,
            solution.stats.states_seen,
            format_sequence(&solution.moves)
        );
        solution
    }

    /// Bounded breadth-first search. Returns the first solving path found in
    /// FIFO order, checking children as they are generated.
    fn breadth_first(&self, start: &PuzzleState) -> (Option<Vec<Move>>, SearchStats) {
        let SolverConfig {
            max_iterations,
            max_depth,
            search_moves,
        } = self.config;
        let moves = search_moves.moves();
        debug!(
            "search: {} moves, budget {} expansions, depth bound {}",
            moves.len(),
            max_iterations,
            max_depth
        );

        let mut visited: FxHashSet<Fingerprint> = FxHashSet::default();
        visited.insert(start.fingerprint());

        let mut frontier = VecDeque::from([SearchNode {
            state: start.clone(),
            path: Vec::new(),
        }]);
        let mut nodes_expanded = 0;

        while nodes_expanded < max_iterations {
            let Some(node) = frontier.pop_front() else {
                break;
            };
            nodes_expanded += 1;

            if node.path.len() >= max_depth {
                continue;
            }

            for &mv in moves {
                let child = node.state.after(mv);
                let child_depth = node.path.len() + 1;

                if child.is_solved() {
                    let mut path = node.path.clone();
                    path.push(mv);
                    let stats = SearchStats {
                        nodes_expanded,
                        states_seen: visited.len(),
                    };
                    return (Some(path), stats);
                }

                // only queue children that may still be expanded
                if child_depth < max_depth && visited.insert(child.fingerprint()) {
                    let mut path = node.path.clone();
                    path.push(mv);
                    frontier.push_back(SearchNode { state: child, path });
                }
            }
        }

        let stats = SearchStats {
            nodes_expanded,
            states_seen: visited.len(),
        };
        (None, stats)
    }
}
