//! Runtime settings read from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SNAKE_GRID_WIDTH` | 40 |
//! | `SNAKE_GRID_HEIGHT` | 30 |
//! | `SNAKE_SEED` | derived from the wall clock |
//! | `SNAKE_HIGH_SCORE_PATH` | `.snake_high_score` |
//! | `SNAKE_STATS_PATH` | `.snake_stats.json` |
//! | `SNAKE_LOG_PATH` | `snake-tui.log` (empty disables logging) |
//!
//! Values that do not parse fall back to the default. Values that parse but
//! make no sense (a 2x2 grid) are left for `GameConfig::validate` to reject.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::GameConfig;
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub grid_width: i16,
    pub grid_height: i16,
    pub seed: u32,
    pub high_score_path: PathBuf,
    pub stats_path: PathBuf,
    pub log_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source (the process environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let grid_width = lookup("SNAKE_GRID_WIDTH")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(GRID_WIDTH);
        let grid_height = lookup("SNAKE_GRID_HEIGHT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(GRID_HEIGHT);
        let seed = lookup("SNAKE_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let high_score_path = lookup("SNAKE_HIGH_SCORE_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| ".snake_high_score".to_string());
        let stats_path = lookup("SNAKE_STATS_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| ".snake_stats.json".to_string());
        let log_path = match lookup("SNAKE_LOG_PATH") {
            Some(s) if s.trim().is_empty() => None,
            Some(s) => Some(PathBuf::from(s.trim())),
            None => Some(PathBuf::from("snake-tui.log")),
        };

        Self {
            grid_width,
            grid_height,
            seed,
            high_score_path: high_score_path.into(),
            stats_path: stats_path.into(),
            log_path,
        }
    }

    /// Gameplay configuration (not yet validated)
    pub fn game_config(&self) -> GameConfig {
        GameConfig::default()
            .with_grid(self.grid_width, self.grid_height)
            .with_seed(self.seed)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}
