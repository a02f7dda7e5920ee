//! Facelet representation of a 3x3x3 cube.
//!
//! The state is six 3x3 grids of sticker colors, one per face. Nothing tracks
//! which physical piece a sticker belongs to: two states are the same iff all
//! 54 stickers match, which is exactly what [`Fingerprint`] captures.

use std::fmt;

use thiserror::Error;

/// Stickers along one edge of a face.
pub const FACE_DIM: usize = 3;

/// Stickers on one face.
pub const FACE_SIZE: usize = FACE_DIM * FACE_DIM;

/// Number of faces.
pub const NUM_FACES: usize = 6;

/// Total number of stickers. Never changes across any operation.
pub const FACELET_COUNT: usize = NUM_FACES * FACE_SIZE;

/// One of the six faces, named by its position relative to the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

impl Face {
    /// All faces in fingerprint order.
    pub const ALL: [Face; NUM_FACES] = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
        }
    }

    /// Parses a face letter, ignoring case.
    pub fn from_letter(letter: char) -> Option<Face> {
        match letter.to_ascii_uppercase() {
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    /// The color that fills this face when the cube is solved.
    pub const fn home_color(self) -> Color {
        match self {
            Face::U => Color::White,
            Face::D => Color::Yellow,
            Face::L => Color::Orange,
            Face::R => Color::Red,
            Face::F => Color::Green,
            Face::B => Color::Blue,
        }
    }

    /// The face a turn of `self` never touches.
    pub const fn opposite(self) -> Face {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::L => Face::R,
            Face::R => Face::L,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Sticker color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Yellow,
    Orange,
    Red,
    Green,
    Blue,
}

impl Color {
    /// Colors in the order of their home faces.
    pub const ALL: [Color; NUM_FACES] = [
        Color::White,
        Color::Yellow,
        Color::Orange,
        Color::Red,
        Color::Green,
        Color::Blue,
    ];

    /// Single-letter code used in fingerprints and the printed net.
    pub const fn code(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Orange => 'O',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
        }
    }

    pub fn from_code(code: char) -> Option<Color> {
        Color::ALL.into_iter().find(|color| color.code() == code)
    }
}

/// One face: `grid[row][col]`, rows top to bottom.
pub type FaceGrid = [[Color; FACE_DIM]; FACE_DIM];

/// Canonical serialization of all 54 stickers.
///
/// Faces in `U D L R F B` order, each row-major. Stable across runs, so it
/// works as a hash key, a comparison oracle, or a persistence key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; FACELET_COUNT]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; FACELET_COUNT] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &code in &self.0 {
            write!(f, "{}", code as char)?;
        }
        Ok(())
    }
}

/// Failure to rebuild a state from fingerprint text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseStateError {
    #[error("expected {FACELET_COUNT} facelets, found {len}")]
    WrongLength { len: usize },
    #[error("invalid color code `{code}` at facelet {index}")]
    InvalidColor { index: usize, code: char },
}

/// The full sticker state of the cube.
///
/// `Clone` is a deep copy: every search branch owns its own state and never
/// observes another branch's mutations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    faces: [FaceGrid; NUM_FACES],
}

impl Default for PuzzleState {
    fn default() -> Self {
        Self::solved()
    }
}

impl PuzzleState {
    /// A cube with every face filled by its home color.
    pub fn solved() -> Self {
        Self {
            faces: Face::ALL.map(|face| [[face.home_color(); FACE_DIM]; FACE_DIM]),
        }
    }

    pub fn face(&self, face: Face) -> &FaceGrid {
        &self.faces[face.index()]
    }

    pub(crate) fn face_mut(&mut self, face: Face) -> &mut FaceGrid {
        &mut self.faces[face.index()]
    }

    /// Returns true iff every sticker sits on its home face.
    pub fn is_solved(&self) -> bool {
        Face::ALL.iter().all(|&face| {
            let home = face.home_color();
            self.face(face).iter().flatten().all(|&color| color == home)
        })
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let mut bytes = [0u8; FACELET_COUNT];
        let stickers = self.faces.iter().flatten().flatten();
        for (slot, color) in bytes.iter_mut().zip(stickers) {
            *slot = color.code() as u8;
        }
        Fingerprint(bytes)
    }

    /// Rebuilds a state from the text form of a [`Fingerprint`].
    ///
    /// No reachability check is done; see [`PuzzleState::has_balanced_colors`].
    pub fn from_fingerprint(text: &str) -> Result<Self, ParseStateError> {
        let codes: Vec<char> = text.trim().chars().collect();
        if codes.len() != FACELET_COUNT {
            return Err(ParseStateError::WrongLength { len: codes.len() });
        }

        let mut state = Self::solved();
        for (index, &code) in codes.iter().enumerate() {
            let color =
                Color::from_code(code).ok_or(ParseStateError::InvalidColor { index, code })?;
            let face = index / FACE_SIZE;
            let row = (index % FACE_SIZE) / FACE_DIM;
            let col = index % FACE_DIM;
            state.faces[face][row][col] = color;
        }
        Ok(state)
    }

    /// Sticker count per color, indexed like [`Color::ALL`].
    pub fn color_counts(&self) -> [usize; NUM_FACES] {
        let mut counts = [0; NUM_FACES];
        for &color in self.faces.iter().flatten().flatten() {
            counts[color as usize] += 1;
        }
        counts
    }

    /// Every reachable state has exactly nine stickers of each color.
    pub fn has_balanced_colors(&self) -> bool {
        self.color_counts().iter().all(|&count| count == FACE_SIZE)
    }

    /// Rotates one face's own grid by 90 degrees. No other face is touched.
    pub fn rotate_face_grid(&mut self, face: Face, clockwise: bool) {
        let grid = self.face_mut(face);
        if clockwise {
            grid.reverse();
            *grid = transpose(grid);
        } else {
            *grid = transpose(grid);
            grid.reverse();
        }
    }
}

fn transpose(grid: &FaceGrid) -> FaceGrid {
    let mut transposed = *grid;
    for (row, cells) in grid.iter().enumerate() {
        for (col, &color) in cells.iter().enumerate() {
            transposed[col][row] = color;
        }
    }
    transposed
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &[Color; FACE_DIM]) -> fmt::Result {
    for color in row {
        write!(f, "{}", color.code())?;
    }
    Ok(())
}

/// Renders the unfolded net: U on top, `L F R B` across, D below.
impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad = " ".repeat(FACE_DIM + 1);

        for row in self.face(Face::U) {
            write!(f, "{pad}")?;
            write_row(f, row)?;
            writeln!(f)?;
        }
        for row in 0..FACE_DIM {
            for (i, face) in [Face::L, Face::F, Face::R, Face::B].into_iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write_row(f, &self.face(face)[row])?;
            }
            writeln!(f)?;
        }
        for row in self.face(Face::D) {
            write!(f, "{pad}")?;
            write_row(f, row)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
