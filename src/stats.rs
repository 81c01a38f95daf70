//! End-of-game statistics and high score entries

use crate::difficulty::Difficulty;
use crate::state::GameState;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Summary of a finished (or abandoned) session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameStatistics {
    pub final_score: u64,
    pub lines_cleared: u64,
    pub total_ticks: u64,
    pub pieces_placed: u64,
    pub difficulty: Difficulty,
    pub play_duration: Duration,
}

impl GameStatistics {
    pub fn from_state(state: &GameState, play_duration: Duration) -> Self {
        Self {
            final_score: state.score(),
            lines_cleared: state.lines_cleared(),
            total_ticks: state.tick_count(),
            pieces_placed: state.pieces_locked(),
            difficulty: state.difficulty(),
            play_duration,
        }
    }

    /// Average points per cleared line, 0 when nothing was cleared
    pub fn score_per_line(&self) -> f64 {
        if self.lines_cleared == 0 {
            return 0.0;
        }
        self.final_score as f64 / self.lines_cleared as f64
    }

    pub fn score_per_piece(&self) -> f64 {
        if self.pieces_placed == 0 {
            return 0.0;
        }
        self.final_score as f64 / self.pieces_placed as f64
    }

    pub fn ticks_per_second(&self) -> f64 {
        let secs = self.play_duration.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.total_ticks as f64 / secs
    }

    /// Format the play time as MM:SS
    pub fn format_time(&self) -> String {
        let total_secs = self.play_duration.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }

    pub fn summary(&self) -> String {
        format!(
            "Final Score: {} | Lines: {} | Pieces: {} | Duration: {:.1}s | Difficulty: {}",
            self.final_score,
            self.lines_cleared,
            self.pieces_placed,
            self.play_duration.as_secs_f64(),
            self.difficulty
        )
    }

    /// High score entry stamped with the current time
    pub fn to_high_score(&self) -> HighScore {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        HighScore {
            score: self.final_score,
            difficulty: self.difficulty,
            lines: self.lines_cleared,
            timestamp,
        }
    }
}

impl fmt::Display for GameStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u64,
    pub difficulty: Difficulty,
    pub lines: u64,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

/// Ordered by score only
impl Ord for HighScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score)
    }
}

impl PartialOrd for HighScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HighScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score: {} | {} | Lines: {}",
            self.score, self.difficulty, self.lines
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::GameAction;
    use crate::engine::tick;

    fn stats(score: u64, lines: u64, pieces: u64, ticks: u64, secs: u64) -> GameStatistics {
        GameStatistics {
            final_score: score,
            lines_cleared: lines,
            total_ticks: ticks,
            pieces_placed: pieces,
            difficulty: Difficulty::Normal,
            play_duration: Duration::from_secs(secs),
        }
    }

    #[test]
    fn test_from_state() {
        let state = GameState::new(Difficulty::Hard, 1);
        let state = tick(&tick(&state, GameAction::Drop), GameAction::Drop);
        let stats = GameStatistics::from_state(&state, Duration::from_secs(3));
        assert_eq!(stats.pieces_placed, 2);
        assert_eq!(stats.total_ticks, 2);
        assert_eq!(stats.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_ratios() {
        let s = stats(1000, 4, 10, 600, 60);
        assert_eq!(s.score_per_line(), 250.0);
        assert_eq!(s.score_per_piece(), 100.0);
        assert_eq!(s.ticks_per_second(), 10.0);
    }

    #[test]
    fn test_ratios_with_zero_divisors() {
        let s = stats(0, 0, 0, 0, 0);
        assert_eq!(s.score_per_line(), 0.0);
        assert_eq!(s.score_per_piece(), 0.0);
        assert_eq!(s.ticks_per_second(), 0.0);
    }

    #[test]
    fn test_summary_and_time() {
        let s = stats(300, 2, 7, 100, 125);
        assert_eq!(s.format_time(), "02:05");
        assert_eq!(
            s.summary(),
            "Final Score: 300 | Lines: 2 | Pieces: 7 | Duration: 125.0s | Difficulty: Normal"
        );
    }

    #[test]
    fn test_high_score_orders_by_score() {
        let low = HighScore {
            score: 10,
            difficulty: Difficulty::Extreme,
            lines: 9,
            timestamp: 5,
        };
        let high = HighScore {
            score: 20,
            difficulty: Difficulty::Easy,
            lines: 1,
            timestamp: 1,
        };
        assert!(high > low);
        assert_eq!(stats(20, 1, 1, 1, 1).to_high_score().score, 20);
    }
}
