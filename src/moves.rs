//! Move tokens and the face-turn permutations.
//!
//! A quarter turn rotates the turned face's own grid and then cycles four
//! 3-sticker edge strips on the neighboring faces. The neighbor cycles are
//! fixed tables, one per face; a half turn is two quarter turns.

use std::fmt;

use thiserror::Error;

use crate::state::{Color, Face, PuzzleState, FACE_DIM};

/// Turn amount encoded by a token's modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Turn {
    /// No modifier.
    Clockwise,
    /// `'` modifier.
    CounterClockwise,
    /// `2` modifier.
    Double,
}

impl Turn {
    pub const ALL: [Turn; 3] = [Turn::Clockwise, Turn::CounterClockwise, Turn::Double];

    pub const fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Double => "2",
        }
    }

    pub const fn inverse(self) -> Turn {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Double => Turn::Double,
        }
    }

    /// Direction and count of the quarter turns this amounts to.
    const fn quarter_turns(self) -> (bool, usize) {
        match self {
            Turn::Clockwise => (true, 1),
            Turn::CounterClockwise => (false, 1),
            Turn::Double => (true, 2),
        }
    }
}

/// A single move token: a face plus a turn amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

/// A token that does not follow the `<face>[' | 2]` grammar.
///
/// Both variants carry the trimmed token and the offending character.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidMoveError {
    #[error("invalid face `{face}` in move `{token}`")]
    InvalidFace { token: String, face: char },
    #[error("invalid modifier `{modifier}` in move `{token}`")]
    InvalidModifier { token: String, modifier: char },
}

impl Move {
    pub const fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    pub const fn inverse(self) -> Self {
        Self::new(self.face, self.turn.inverse())
    }

    /// Parses one token. Case-insensitive, surrounding whitespace ignored.
    ///
    /// An empty token parses to `None`.
    pub fn parse(token: &str) -> Result<Option<Move>, InvalidMoveError> {
        let token = token.trim();
        let mut chars = token.chars();

        let Some(letter) = chars.next() else {
            return Ok(None);
        };
        let face = Face::from_letter(letter).ok_or_else(|| InvalidMoveError::InvalidFace {
            token: token.to_string(),
            face: letter,
        })?;

        let turn = match chars.next() {
            None => Turn::Clockwise,
            Some('\'') => Turn::CounterClockwise,
            Some('2') => Turn::Double,
            Some(modifier) => {
                return Err(InvalidMoveError::InvalidModifier {
                    token: token.to_string(),
                    modifier,
                })
            }
        };

        // at most one modifier character
        if let Some(modifier) = chars.next() {
            return Err(InvalidMoveError::InvalidModifier {
                token: token.to_string(),
                modifier,
            });
        }

        Ok(Some(Move::new(face, turn)))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.turn.suffix())
    }
}

#[derive(Clone, Copy, Debug)]
enum Line {
    Row(usize),
    Col(usize),
}

/// Three stickers along one row or column of a neighboring face.
#[derive(Clone, Copy, Debug)]
struct Strip {
    face: Face,
    line: Line,
    /// Walk the line from its far end.
    reversed: bool,
}

impl Strip {
    const fn row(face: Face, row: usize) -> Self {
        Self {
            face,
            line: Line::Row(row),
            reversed: false,
        }
    }

    const fn col(face: Face, col: usize) -> Self {
        Self {
            face,
            line: Line::Col(col),
            reversed: false,
        }
    }

    const fn rev(self) -> Self {
        Self {
            reversed: true,
            ..self
        }
    }

    /// `(row, col)` of the strip's `i`-th sticker.
    #[inline(always)]
    fn cell(self, i: usize) -> (usize, usize) {
        let along = if self.reversed { FACE_DIM - 1 - i } else { i };
        match self.line {
            Line::Row(row) => (row, along),
            Line::Col(col) => (along, col),
        }
    }
}

/// Edge strips moved by a clockwise quarter turn, indexed by `Face::index`.
///
/// Clockwise, strip `k` receives the stickers of strip `k + 1` (mod 4),
/// position by position. Counter-clockwise runs the cycle backwards.
const EDGE_CYCLES: [[Strip; 4]; 6] = [
    // U
    [
        Strip::row(Face::F, 0),
        Strip::row(Face::R, 0),
        Strip::row(Face::B, 0),
        Strip::row(Face::L, 0),
    ],
    // D
    [
        Strip::row(Face::F, 2),
        Strip::row(Face::L, 2),
        Strip::row(Face::B, 2),
        Strip::row(Face::R, 2),
    ],
    // L
    [
        Strip::col(Face::F, 0),
        Strip::col(Face::D, 0),
        Strip::col(Face::B, 2).rev(),
        Strip::col(Face::U, 0),
    ],
    // R
    [
        Strip::col(Face::F, 2),
        Strip::col(Face::U, 2),
        Strip::col(Face::B, 0).rev(),
        Strip::col(Face::D, 2),
    ],
    // F: the neighbors meet this face along mixed rows and columns
    [
        Strip::row(Face::U, 2),
        Strip::col(Face::L, 2).rev(),
        Strip::row(Face::D, 0).rev(),
        Strip::col(Face::R, 0),
    ],
    // B
    [
        Strip::row(Face::U, 0),
        Strip::col(Face::R, 2),
        Strip::row(Face::D, 2).rev(),
        Strip::col(Face::L, 0).rev(),
    ],
];

impl PuzzleState {
    /// Applies a typed move in place.
    pub fn apply(&mut self, mv: Move) {
        let (clockwise, repetitions) = mv.turn.quarter_turns();
        for _ in 0..repetitions {
            self.quarter_turn(mv.face, clockwise);
        }
    }

    /// Returns an independent copy with `mv` applied; `self` is untouched.
    pub fn after(&self, mv: Move) -> Self {
        let mut child = self.clone();
        child.apply(mv);
        child
    }

    pub fn apply_sequence(&mut self, moves: &[Move]) {
        for &mv in moves {
            self.apply(mv);
        }
    }

    /// Parses and applies one token. An empty token is a no-op.
    ///
    /// The token is fully validated before anything is mutated, so on error
    /// the state is unchanged.
    pub fn apply_move(&mut self, token: &str) -> Result<(), InvalidMoveError> {
        if let Some(mv) = Move::parse(token)? {
            self.apply(mv);
        }
        Ok(())
    }

    /// Applies whitespace-separated tokens in order.
    ///
    /// Not atomic: tokens before a malformed one stay applied. Use
    /// [`crate::catalog::parse_sequence`] first when that matters.
    pub fn scramble(&mut self, tokens: &str) -> Result<(), InvalidMoveError> {
        for token in tokens.split_whitespace() {
            self.apply_move(token)?;
        }
        Ok(())
    }

    fn quarter_turn(&mut self, face: Face, clockwise: bool) {
        self.rotate_face_grid(face, clockwise);

        let strips = EDGE_CYCLES[face.index()];
        let contents = strips.map(|strip| self.read_strip(strip));
        for (k, &strip) in strips.iter().enumerate() {
            let source = if clockwise { (k + 1) % 4 } else { (k + 3) % 4 };
            self.write_strip(strip, contents[source]);
        }
    }

    #[inline(always)]
    fn read_strip(&self, strip: Strip) -> [Color; FACE_DIM] {
        let grid = self.face(strip.face);
        std::array::from_fn(|i| {
            let (row, col) = strip.cell(i);
            grid[row][col]
        })
    }

    #[inline(always)]
    fn write_strip(&mut self, strip: Strip, colors: [Color; FACE_DIM]) {
        let grid = self.face_mut(strip.face);
        for (i, color) in colors.into_iter().enumerate() {
            let (row, col) = strip.cell(i);
            grid[row][col] = color;
        }
    }
}
