//! Session loop: the single owner of the game state
//!
//! Input producers send [`GameAction`]s over an mpsc channel; this loop is the
//! only caller of [`tick`] and publishes every new snapshot on a watch channel
//! for renderers and other readers.

use crate::action::GameAction;
use crate::engine::tick;
use crate::state::GameState;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

/// Pacing and shutdown behaviour for a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Wall-clock length of one engine tick
    pub tick_interval: Duration,
    /// End the session once the action channel is closed and drained
    pub stop_when_idle: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(50),
            stop_when_idle: true,
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    GameOver,
    Quit,
    InputClosed,
}

/// Final snapshot plus how and when the session ended
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub state: GameState,
    pub reason: EndReason,
    pub elapsed: Duration,
}

/// Drive `initial` until the game ends, the player quits, or input runs out.
///
/// One interval tick is one engine tick, consuming at most one pending action.
pub async fn run(
    initial: GameState,
    config: SessionConfig,
    mut actions: mpsc::Receiver<GameAction>,
    snapshots: watch::Sender<GameState>,
) -> SessionOutcome {
    let started = Instant::now();
    let mut state = initial;
    let mut input_open = true;
    let mut ticker = interval(config.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Readers see the starting position before the first tick
    snapshots.send_replace(state.clone());

    let reason = loop {
        if state.is_game_over() {
            break EndReason::GameOver;
        }

        ticker.tick().await;

        let action = if input_open {
            match actions.try_recv() {
                Ok(action) => action,
                Err(mpsc::error::TryRecvError::Empty) => GameAction::None,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    debug!("action channel closed");
                    input_open = false;
                    GameAction::None
                }
            }
        } else {
            GameAction::None
        };

        if action == GameAction::Quit {
            break EndReason::Quit;
        }
        if !input_open && config.stop_when_idle {
            break EndReason::InputClosed;
        }
        // Nothing can unpause once input is gone, so resume before playing out
        let action = if !input_open && state.is_paused() {
            debug!("input closed while paused, resuming");
            GameAction::Pause
        } else {
            action
        };

        state = tick(&state, action);
        // No receivers is fine; the session still owns the state
        snapshots.send_replace(state.clone());
    };

    let elapsed = started.elapsed();
    info!(
        ?reason,
        score = state.score(),
        lines = state.lines_cleared(),
        ticks = state.tick_count(),
        "session ended after {:.1}s",
        elapsed.as_secs_f64()
    );

    SessionOutcome {
        state,
        reason,
        elapsed,
    }
}
