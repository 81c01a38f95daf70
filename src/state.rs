//! Immutable game snapshot

use crate::board::Board;
use crate::coord::Coord;
use crate::difficulty::Difficulty;
use crate::piece::Piece;
use crate::score::LineClear;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Where every new piece's bounding box is placed (top row, centred on a 10-wide board)
pub const SPAWN_POSITION: Coord = Coord::new(0, 3);

/// Coarse phase derived from the pause / game-over flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Paused,
    GameOver,
}

/// Everything a renderer or persistence layer needs to know about a game.
///
/// A snapshot is never edited in place: [`crate::engine::tick`] reads one and
/// returns the next. The random generator travels with the snapshot so piece
/// spawning stays a function of the previous state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) current_piece: Piece,
    pub(crate) next_piece: Option<Piece>,
    pub(crate) score: u64,
    pub(crate) lines_cleared: u64,
    pub(crate) tick_count: u64,
    pub(crate) game_over: bool,
    pub(crate) paused: bool,
    pub(crate) difficulty: Difficulty,
    pub(crate) pieces_locked: u64,
    /// Set only on the tick whose lock cleared rows
    pub(crate) last_clear: Option<LineClear>,
    pub(crate) rng: ChaCha8Rng,
}

impl GameState {
    /// Start a session on an empty board
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let current_piece = Piece::spawn_random(SPAWN_POSITION, &mut rng);
        let next_piece = Piece::spawn_random(SPAWN_POSITION, &mut rng);
        Self {
            board: Board::new(),
            current_piece,
            next_piece: Some(next_piece),
            score: 0,
            lines_cleared: 0,
            tick_count: 0,
            game_over: false,
            paused: false,
            difficulty,
            pieces_locked: 0,
            last_clear: None,
            rng,
        }
    }

    /// Replace the board, re-checking whether the current piece still fits
    pub fn with_board(self, board: Board) -> Self {
        let game_over = self.game_over || !board.can_place(&self.current_piece.occupied_cells());
        Self {
            board,
            game_over,
            ..self
        }
    }

    /// Replace the falling piece, re-checking whether it fits
    pub fn with_current_piece(self, current_piece: Piece) -> Self {
        let game_over = self.game_over || !self.board.can_place(&current_piece.occupied_cells());
        Self {
            current_piece,
            game_over,
            ..self
        }
    }

    pub fn with_next_piece(self, next_piece: Option<Piece>) -> Self {
        Self { next_piece, ..self }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current_piece
    }

    pub fn next_piece(&self) -> Option<&Piece> {
        self.next_piece.as_ref()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lines_cleared(&self) -> u64 {
        self.lines_cleared
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Number of pieces locked into the board so far
    pub fn pieces_locked(&self) -> u64 {
        self.pieces_locked
    }

    pub fn last_clear(&self) -> Option<LineClear> {
        self.last_clear
    }

    pub fn status(&self) -> Status {
        if self.game_over {
            Status::GameOver
        } else if self.paused {
            Status::Paused
        } else {
            Status::Playing
        }
    }

    /// Where the current piece would come to rest if dropped now
    pub fn ghost_piece(&self) -> Piece {
        crate::engine::landing(&self.board, &self.current_piece)
    }
}
