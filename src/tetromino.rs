//! Tetromino definitions and shapes
//!
//! All 7 standard tetrominoes. Each shape lives in a 4x4 bounding box and owns
//! four fixed offset tables, one per rotation index.

use rand::Rng;

/// Number of rotation states every shape cycles through
pub const ROTATIONS: u8 = 4;

/// (row, col) offsets inside the 4x4 box, row 0 at the top
pub type Shape = [(i32, i32); 4];

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TetrominoType {
    I, // long bar
    O, // square
    T,
    S,
    Z,
    J,
    L,
}

const I_SHAPES: [Shape; 4] = [
    [(1, 0), (1, 1), (1, 2), (1, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 1), (1, 1), (2, 1), (3, 1)],
];

// O never changes shape, but still carries four tables so rotation stays uniform
const O_SHAPES: [Shape; 4] = [[(1, 1), (1, 2), (2, 1), (2, 2)]; 4];

const T_SHAPES: [Shape; 4] = [
    [(1, 0), (1, 1), (1, 2), (2, 1)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (1, 1), (1, 2), (0, 1)],
    [(0, 1), (1, 0), (1, 1), (2, 1)],
];

// .SS    S.    ...    .S.
// SS.    SS    .SS    .SS
//        .S    SS.    ..S
const S_SHAPES: [Shape; 4] = [
    [(0, 1), (0, 2), (1, 0), (1, 1)],
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(1, 1), (1, 2), (2, 0), (2, 1)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
];

// ZZ.    .Z    ...    ..Z
// .ZZ    ZZ    ZZ.    .ZZ
//        Z.    .ZZ    .Z.
const Z_SHAPES: [Shape; 4] = [
    [(0, 0), (0, 1), (1, 1), (1, 2)],
    [(0, 1), (1, 0), (1, 1), (2, 0)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(0, 2), (1, 1), (1, 2), (2, 1)],
];

const J_SHAPES: [Shape; 4] = [
    [(0, 2), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (1, 2), (2, 0)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
];

const L_SHAPES: [Shape; 4] = [
    [(0, 0), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (0, 2), (1, 1), (2, 1)],
    [(0, 0), (0, 1), (0, 2), (1, 2)],
    [(0, 1), (1, 1), (2, 0), (2, 1)],
];

impl TetrominoType {
    /// All tetromino types, in table order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::J,
            TetrominoType::L,
        ]
    }

    /// Pick a type uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> TetrominoType {
        let all = Self::all();
        all[rng.gen_range(0..all.len())]
    }

    /// Get the shape offsets for this tetromino at a rotation index
    /// The index is taken modulo 4
    pub fn shape(&self, rotation: u8) -> &'static Shape {
        let tables = match self {
            TetrominoType::I => &I_SHAPES,
            TetrominoType::O => &O_SHAPES,
            TetrominoType::T => &T_SHAPES,
            TetrominoType::S => &S_SHAPES,
            TetrominoType::Z => &Z_SHAPES,
            TetrominoType::J => &J_SHAPES,
            TetrominoType::L => &L_SHAPES,
        };
        &tables[(rotation % ROTATIONS) as usize]
    }

    /// Single-letter name, used in logs
    pub fn as_char(&self) -> char {
        match self {
            TetrominoType::I => 'I',
            TetrominoType::O => 'O',
            TetrominoType::T => 'T',
            TetrominoType::S => 'S',
            TetrominoType::Z => 'Z',
            TetrominoType::J => 'J',
            TetrominoType::L => 'L',
        }
    }
}
