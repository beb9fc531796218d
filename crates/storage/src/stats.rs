//! Lifetime statistics across finished games, stored as JSON.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::types::GameRecord;
use crate::core::PersistError;
use crate::write_atomic;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStats {
    pub games_played: u32,
    pub total_score: u64,
    pub best_score: u32,
    /// Seconds
    pub longest_game: u64,
    /// Seconds
    pub total_play_time: u64,
    pub levels_reached: BTreeSet<u32>,
}

impl GameStats {
    /// Fold one finished game into the totals.
    pub fn record(&mut self, game: &GameRecord) {
        let secs = game.play_time_ms / 1000;
        self.games_played = self.games_played.saturating_add(1);
        self.total_score = self.total_score.saturating_add(game.score as u64);
        self.best_score = self.best_score.max(game.score);
        self.longest_game = self.longest_game.max(secs);
        self.total_play_time = self.total_play_time.saturating_add(secs);
        self.levels_reached.insert(game.level);
    }

    /// Mean score per game, 0 before the first game
    /// Mean score per game, rounded half up.
    pub fn average_score(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }
        let games = self.games_played as u64;
        ((self.total_score + games / 2) / games) as u32
    }

    pub fn highest_level(&self) -> u32 {
        self.levels_reached.last().copied().unwrap_or(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> GameStats {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return GameStats::default(),
            Err(err) => {
                warn!("cannot read stats {}: {}", self.path.display(), err);
                return GameStats::default();
            }
        };
        serde_json::from_str(&text).unwrap_or_else(|err| {
            warn!("corrupt stats in {}: {}", self.path.display(), err);
            GameStats::default()
        })
    }

    pub fn save(&self, stats: &GameStats) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(stats)
            .map_err(|e| PersistError::Encoding(e.to_string()))?;
        write_atomic(&self.path, json.as_bytes())?;
        Ok(())
    }

    /// Load, fold in `game`, save. Returns the updated totals.
    pub fn record(&self, game: &GameRecord) -> Result<GameStats, PersistError> {
        let mut stats = self.load();
        stats.record(game);
        self.save(&stats)?;
        Ok(stats)
    }
}
