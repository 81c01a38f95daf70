//! Active falling piece

use crate::coord::Coord;
use crate::tetromino::{ROTATIONS, TetrominoType};
use rand::Rng;

/// A falling piece. Every operation returns a new value; validity against the
/// board is checked by the engine, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: TetrominoType,
    /// Top-left corner of the 4x4 bounding box
    position: Coord,
    /// Rotation index in 0..4
    rotation: u8,
}

impl Piece {
    /// Create a piece at rotation 0
    pub fn new(kind: TetrominoType, position: Coord) -> Self {
        Self {
            kind,
            position,
            rotation: 0,
        }
    }

    /// Create a piece with an explicit rotation index (taken modulo 4)
    pub fn with_rotation(kind: TetrominoType, position: Coord, rotation: u8) -> Self {
        Self {
            kind,
            position,
            rotation: rotation % ROTATIONS,
        }
    }

    /// Spawn a piece of uniformly random type at rotation 0
    pub fn spawn_random<R: Rng + ?Sized>(at: Coord, rng: &mut R) -> Self {
        Self::new(TetrominoType::random(rng), at)
    }

    pub fn kind(&self) -> TetrominoType {
        self.kind
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Absolute positions of all 4 blocks
    pub fn occupied_cells(&self) -> [Coord; 4] {
        self.kind
            .shape(self.rotation)
            .map(|(dr, dc)| self.position.translate(dr, dc))
    }

    pub fn move_to(&self, position: Coord) -> Self {
        Self { position, ..*self }
    }

    pub fn translate(&self, d_row: i32, d_col: i32) -> Self {
        self.move_to(self.position.translate(d_row, d_col))
    }

    /// Advance the rotation index by one step
    pub fn rotate_clockwise(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % ROTATIONS,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_occupied_cells_are_translated() {
        let piece = Piece::new(TetrominoType::I, Coord::new(5, 2));
        assert_eq!(
            piece.occupied_cells(),
            [
                Coord::new(6, 2),
                Coord::new(6, 3),
                Coord::new(6, 4),
                Coord::new(6, 5)
            ]
        );
    }

    #[test]
    fn test_four_rotations_is_identity() {
        for kind in TetrominoType::all() {
            for rotation in 0..ROTATIONS {
                let piece = Piece::with_rotation(kind, Coord::new(3, 4), rotation);
                let spun = piece
                    .rotate_clockwise()
                    .rotate_clockwise()
                    .rotate_clockwise()
                    .rotate_clockwise();
                assert_eq!(spun, piece);
                assert_eq!(spun.occupied_cells(), piece.occupied_cells());
            }
        }
    }

    #[test]
    fn test_rotate_only_changes_rotation() {
        let piece = Piece::new(TetrominoType::T, Coord::new(2, 2));
        let rotated = piece.rotate_clockwise();
        assert_eq!(rotated.rotation(), 1);
        assert_eq!(rotated.position(), piece.position());
        assert_eq!(rotated.kind(), piece.kind());
    }

    #[test]
    fn test_move_keeps_rotation() {
        let piece = Piece::with_rotation(TetrominoType::L, Coord::new(0, 0), 3);
        let moved = piece.move_to(Coord::new(4, 1));
        assert_eq!(moved.rotation(), 3);
        assert_eq!(moved.position(), Coord::new(4, 1));
        assert_eq!(piece.translate(1, -1).position(), Coord::new(1, -1));
    }

    #[test]
    fn test_spawn_random_is_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            let pa = Piece::spawn_random(Coord::new(0, 3), &mut a);
            let pb = Piece::spawn_random(Coord::new(0, 3), &mut b);
            assert_eq!(pa, pb);
            assert_eq!(pa.rotation(), 0);
        }
    }
}
