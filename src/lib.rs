//! BLOCKFALL - rules engine for a falling-block puzzle game
//!
//! The core is [`engine::tick`]: a pure function from one [`GameState`]
//! snapshot and one [`GameAction`] to the next snapshot. Everything else in
//! this crate either feeds it (pieces, board, difficulty, scoring) or sits
//! around it (statistics, settings, the session loop).
//!
//! ```
//! use blockfall::{Difficulty, GameAction, GameState, engine};
//!
//! let state = GameState::new(Difficulty::Normal, 42);
//! let next = engine::tick(&state, GameAction::Drop);
//! assert_eq!(next.board().len(), 4);
//! assert_eq!(state.board().len(), 0);
//! ```

pub mod action;
pub mod board;
pub mod coord;
pub mod difficulty;
pub mod engine;
pub mod piece;
pub mod score;
pub mod session;
pub mod settings;
pub mod state;
pub mod stats;
pub mod tetromino;

pub use action::GameAction;
pub use board::{BOARD_HEIGHT, BOARD_WIDTH, Board};
pub use coord::Coord;
pub use difficulty::Difficulty;
pub use piece::Piece;
pub use state::{GameState, SPAWN_POSITION, Status};
pub use stats::{GameStatistics, HighScore};
pub use tetromino::TetrominoType;
