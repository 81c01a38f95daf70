//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/blockfall/settings.toml (or platform equivalent)

use crate::difficulty::Difficulty;
use crate::stats::{GameStatistics, HighScore};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// How many high scores are kept
pub const MAX_HIGH_SCORES: usize = 10;

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay settings
    pub gameplay: GameplaySettings,
    /// High scores, best first
    pub high_scores: Vec<HighScore>,
}

/// Gameplay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Difficulty used when none is given on the command line
    pub difficulty: Difficulty,
    /// Wall-clock length of one engine tick in milliseconds
    pub tick_ms: u64,
    /// Fixed piece seed; a random one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            tick_ms: 50,
            seed: None,
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the platform config dir, or fall back to defaults
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("no config directory on this platform, using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from a file; a missing or unreadable file yields defaults
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!("no settings at {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match toml::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("ignoring malformed settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the platform config dir
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path().context("could not determine settings path")?;
        self.save_to(&path)
    }

    /// Save settings to a file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create config dir {}", dir.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("failed to serialize settings")?;

        fs::write(path, contents)
            .with_context(|| format!("failed to write settings to {}", path.display()))?;

        debug!("settings saved to {}", path.display());
        Ok(())
    }

    /// Add a finished game to the table.
    ///
    /// Returns the 1-based rank of the new entry, or `None` when it did not
    /// make the cut. Older entries stay ahead of equal newcomers.
    pub fn record_score(&mut self, stats: &GameStatistics) -> Option<usize> {
        let entry = stats.to_high_score();
        let index = self
            .high_scores
            .partition_point(|existing| existing.score >= entry.score);
        if index >= MAX_HIGH_SCORES {
            return None;
        }
        self.high_scores.insert(index, entry);
        self.high_scores.truncate(MAX_HIGH_SCORES);
        Some(index + 1)
    }

    /// Best score overall
    pub fn top_score(&self) -> Option<&HighScore> {
        self.high_scores.first()
    }

    /// Best scores on one difficulty, best first
    pub fn top_scores_for(&self, difficulty: Difficulty) -> Vec<&HighScore> {
        self.high_scores
            .iter()
            .filter(|entry| entry.difficulty == difficulty)
            .collect()
    }

    pub fn clear_scores(&mut self) {
        self.high_scores.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn stats(score: u64, difficulty: Difficulty) -> GameStatistics {
        GameStatistics {
            final_score: score,
            lines_cleared: score / 100,
            total_ticks: 0,
            pieces_placed: 0,
            difficulty,
            play_duration: Duration::ZERO,
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("blockfall-test-{}-{}", std::process::id(), name))
            .join("settings.toml")
    }

    #[test]
    fn test_record_keeps_top_ten() {
        let mut settings = Settings::default();
        for score in 1..=12 {
            assert_eq!(settings.record_score(&stats(score * 100, Difficulty::Normal)), Some(1));
        }
        assert_eq!(settings.high_scores.len(), MAX_HIGH_SCORES);
        assert_eq!(settings.top_score().map(|e| e.score), Some(1200));
        assert_eq!(settings.high_scores.last().map(|e| e.score), Some(300));

        // Too low to qualify
        assert_eq!(settings.record_score(&stats(50, Difficulty::Normal)), None);
        assert_eq!(settings.high_scores.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_tie_ranks_after_older_entries() {
        let mut settings = Settings::default();
        assert_eq!(settings.record_score(&stats(500, Difficulty::Normal)), Some(1));
        assert_eq!(settings.record_score(&stats(900, Difficulty::Normal)), Some(1));
        assert_eq!(settings.record_score(&stats(500, Difficulty::Hard)), Some(3));
        assert_eq!(settings.high_scores[1].difficulty, Difficulty::Normal);
        assert_eq!(settings.high_scores[2].difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_full_table_of_equal_scores_rejects_newcomer() {
        let mut settings = Settings::default();
        for _ in 0..MAX_HIGH_SCORES {
            assert!(settings.record_score(&stats(400, Difficulty::Easy)).is_some());
        }
        let before = settings.high_scores.clone();

        assert_eq!(settings.record_score(&stats(400, Difficulty::Easy)), None);
        assert_eq!(settings.high_scores, before);
        assert_eq!(settings.high_scores.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_top_scores_for_difficulty() {
        let mut settings = Settings::default();
        settings.record_score(&stats(100, Difficulty::Easy));
        settings.record_score(&stats(500, Difficulty::Hard));
        settings.record_score(&stats(300, Difficulty::Easy));

        let easy: Vec<_> = settings
            .top_scores_for(Difficulty::Easy)
            .iter()
            .map(|e| e.score)
            .collect();
        assert_eq!(easy, vec![300, 100]);
        assert!(settings.top_scores_for(Difficulty::Extreme).is_empty());

        settings.clear_scores();
        assert!(settings.top_score().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = temp_path("round-trip");
        let mut settings = Settings::default();
        settings.gameplay.difficulty = Difficulty::Extreme;
        settings.gameplay.seed = Some(1234);
        settings.record_score(&stats(700, Difficulty::Extreme));

        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded, settings);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let loaded = Settings::load_from(&temp_path("missing"));
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "gameplay = 12\n").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[gameplay]\ndifficulty = \"hard\"\n").unwrap();
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.gameplay.difficulty, Difficulty::Hard);
        assert_eq!(loaded.gameplay.tick_ms, GameplaySettings::default().tick_ms);
        assert!(loaded.high_scores.is_empty());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
