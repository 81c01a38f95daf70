//! The rules step
//!
//! [`tick`] is the only way a game advances. It never fails: moves into walls,
//! the floor, or locked cells are silently ignored, and topping out is reported
//! through the `game_over` flag on the returned snapshot.

use crate::action::GameAction;
use crate::board::Board;
use crate::piece::Piece;
use crate::score::{self, LineClear};
use crate::state::{GameState, SPAWN_POSITION};
use tracing::{debug, info};

/// Horizontal shifts tried, in order, when a rotation does not fit in place
const WALL_KICKS: [i32; 3] = [0, 1, -1];

/// Advance the game by one logical step.
///
/// 1. A finished game is returned unchanged.
/// 2. `Pause` flips the pause flag and does nothing else.
/// 3. While paused every other action is ignored, tick counter included.
/// 4. Otherwise the action is applied, gravity runs every
///    `difficulty.gravity_period()` ticks unless the action already locked the
///    piece, and the tick counter advances.
pub fn tick(state: &GameState, action: GameAction) -> GameState {
    if state.game_over {
        return state.clone();
    }

    if action == GameAction::Pause {
        debug!(paused = !state.paused, tick = state.tick_count, "pause toggled");
        return GameState {
            paused: !state.paused,
            ..state.clone()
        };
    }

    if state.paused {
        return state.clone();
    }

    let fresh = GameState {
        last_clear: None,
        ..state.clone()
    };
    let (after_action, locked) = apply_action(fresh, action);

    let gravity_due = state.tick_count % state.difficulty.gravity_period() == 0;
    let after_gravity = if !locked && gravity_due {
        apply_gravity(after_action)
    } else {
        after_action
    };

    GameState {
        tick_count: state.tick_count + 1,
        ..after_gravity
    }
}

/// Lowest position the piece can fall to from where it is
pub fn landing(board: &Board, piece: &Piece) -> Piece {
    let mut resting = *piece;
    // Each step moves one row down, so this ends within the board height
    loop {
        let below = resting.translate(1, 0);
        if !board.can_place(&below.occupied_cells()) {
            return resting;
        }
        resting = below;
    }
}

/// Returns the new state and whether the piece was locked
fn apply_action(state: GameState, action: GameAction) -> (GameState, bool) {
    let current = state.current_piece;
    match action {
        GameAction::Left => (try_shift(state, current.translate(0, -1)), false),
        GameAction::Right => (try_shift(state, current.translate(0, 1)), false),
        GameAction::Down => {
            let moved = current.translate(1, 0);
            if state.board.can_place(&moved.occupied_cells()) {
                (with_piece(state, moved), false)
            } else {
                (lock_and_spawn(state, current), true)
            }
        }
        GameAction::Rotate => (rotate(state), false),
        GameAction::Drop => {
            let resting = landing(&state.board, &current);
            (lock_and_spawn(state, resting), true)
        }
        GameAction::Pause | GameAction::Quit | GameAction::None => (state, false),
    }
}

fn with_piece(state: GameState, current_piece: Piece) -> GameState {
    GameState {
        current_piece,
        ..state
    }
}

/// Accept the candidate if it fits, otherwise keep the piece where it was
fn try_shift(state: GameState, candidate: Piece) -> GameState {
    if state.board.can_place(&candidate.occupied_cells()) {
        with_piece(state, candidate)
    } else {
        state
    }
}

/// Rotate clockwise, trying in place, one column right, then one column left
fn rotate(state: GameState) -> GameState {
    let rotated = state.current_piece.rotate_clockwise();
    let fitted = WALL_KICKS
        .iter()
        .map(|&shift| rotated.translate(0, shift))
        .find(|candidate| state.board.can_place(&candidate.occupied_cells()));

    match fitted {
        Some(piece) => with_piece(state, piece),
        None => state,
    }
}

/// One forced row of descent; a blocked piece locks
fn apply_gravity(state: GameState) -> GameState {
    let current = state.current_piece;
    let fallen = current.translate(1, 0);
    if state.board.can_place(&fallen.occupied_cells()) {
        with_piece(state, fallen)
    } else {
        lock_and_spawn(state, current)
    }
}

/// Lock `piece` into the board, clear rows, score, and bring in the next piece
fn lock_and_spawn(state: GameState, piece: Piece) -> GameState {
    let merged = state.board.with_piece(&piece.occupied_cells());
    let rows = merged.completed_rows();
    let board = merged.clear_rows(&rows);

    let lines = rows.len();
    let points = score::line_clear_points(lines, state.difficulty);
    let last_clear = (lines > 0).then_some(LineClear {
        lines: lines as u32,
        points,
    });

    let mut rng = state.rng.clone();
    let (current_piece, next_piece) = match state.next_piece {
        Some(next) => (
            Piece::new(next.kind(), SPAWN_POSITION),
            Some(Piece::spawn_random(SPAWN_POSITION, &mut rng)),
        ),
        None => (Piece::spawn_random(SPAWN_POSITION, &mut rng), None),
    };

    let game_over = !board.can_place(&current_piece.occupied_cells());

    debug!(
        kind = %piece.kind().as_char(),
        at = %piece.position(),
        lines,
        points,
        next = %current_piece.kind().as_char(),
        "piece locked"
    );
    if game_over {
        info!(
            score = state.score + points,
            lines = state.lines_cleared + lines as u64,
            pieces = state.pieces_locked + 1,
            "spawn blocked, game over"
        );
    }

    GameState {
        board,
        current_piece,
        next_piece,
        score: state.score + points,
        lines_cleared: state.lines_cleared + lines as u64,
        pieces_locked: state.pieces_locked + 1,
        game_over,
        last_clear,
        rng,
        ..state
    }
}
