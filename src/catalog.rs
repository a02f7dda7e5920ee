//! The legal move set and move-sequence helpers.

use crate::moves::{InvalidMoveError, Move, Turn};
use crate::state::Face;

const fn moves_for(face: Face) -> [Move; 3] {
    [
        Move::new(face, Turn::Clockwise),
        Move::new(face, Turn::CounterClockwise),
        Move::new(face, Turn::Double),
    ]
}

const fn flatten(per_face: [[Move; 3]; 6]) -> [Move; 18] {
    let mut all = [Move::new(Face::U, Turn::Clockwise); 18];
    let mut i = 0;
    while i < 18 {
        all[i] = per_face[i / 3][i % 3];
        i += 1;
    }
    all
}

/// All 18 tokens: each face in `U D L R F B` order with no modifier, `'`, `2`.
///
/// The order is part of the contract: searches expanding with this list
/// return the first path found in this order among equal-length paths.
pub const ALL_MOVES: [Move; 18] = flatten([
    moves_for(Face::U),
    moves_for(Face::D),
    moves_for(Face::L),
    moves_for(Face::R),
    moves_for(Face::F),
    moves_for(Face::B),
]);

/// The 12 quarter turns: all clockwise turns, then all counter-clockwise.
pub const QUARTER_TURNS: [Move; 12] = [
    Move::new(Face::U, Turn::Clockwise),
    Move::new(Face::D, Turn::Clockwise),
    Move::new(Face::L, Turn::Clockwise),
    Move::new(Face::R, Turn::Clockwise),
    Move::new(Face::F, Turn::Clockwise),
    Move::new(Face::B, Turn::Clockwise),
    Move::new(Face::U, Turn::CounterClockwise),
    Move::new(Face::D, Turn::CounterClockwise),
    Move::new(Face::L, Turn::CounterClockwise),
    Move::new(Face::R, Turn::CounterClockwise),
    Move::new(Face::F, Turn::CounterClockwise),
    Move::new(Face::B, Turn::CounterClockwise),
];

/// Modifier pool for scrambles. Plain turns get a quarter of the weight.
const SCRAMBLE_TURNS: [Turn; 4] = [
    Turn::Clockwise,
    Turn::CounterClockwise,
    Turn::CounterClockwise,
    Turn::Double,
];

pub fn all_moves() -> &'static [Move] {
    &ALL_MOVES
}

/// Random scramble using the thread-local generator.
pub fn random_scramble(length: usize) -> Vec<Move> {
    random_scramble_with(&mut fastrand::Rng::new(), length)
}

/// Random scramble of `length` moves where no two consecutive moves share a
/// face. Deterministic for a seeded `rng`.
pub fn random_scramble_with(rng: &mut fastrand::Rng, length: usize) -> Vec<Move> {
    let mut scramble: Vec<Move> = Vec::with_capacity(length);

    for _ in 0..length {
        let last_face = scramble.last().map(|mv| mv.face);
        let candidates: Vec<Face> = Face::ALL
            .into_iter()
            .filter(|&face| Some(face) != last_face)
            .collect();

        let face = candidates[rng.usize(..candidates.len())];
        let turn = SCRAMBLE_TURNS[rng.usize(..SCRAMBLE_TURNS.len())];
        scramble.push(Move::new(face, turn));
    }

    scramble
}

/// Parses a whitespace-separated sequence, failing on the first bad token.
///
/// Nothing is applied anywhere, so a caller can validate a whole string
/// before touching a state.
pub fn parse_sequence(tokens: &str) -> Result<Vec<Move>, InvalidMoveError> {
    let mut moves = Vec::new();
    for token in tokens.split_whitespace() {
        if let Some(mv) = Move::parse(token)? {
            moves.push(mv);
        }
    }
    Ok(moves)
}

/// Space-separated tokens, e.g. `R U R' U'`.
pub fn format_sequence(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The sequence that undoes `moves`.
pub fn invert_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}
