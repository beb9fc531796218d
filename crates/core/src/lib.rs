//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds every rule of the snake game: movement, collisions, food,
//! scoring, levels and the state machine driving them. It never touches the
//! terminal or the filesystem; durable high scores go through the
//! [`HighScoreStore`] trait, so the same code runs in the terminal, in tests
//! and headless.
//!
//! - **Deterministic**: the same seed and input sequence produce the same game
//! - **Testable**: time is injected through [`GameStateMachine::tick`]
//!
//! # Module Structure
//!
//! - [`config`]: grid and gameplay configuration with validation
//! - [`grid`]: grid bounds and cell-to-pixel mapping
//! - [`snake`]: snake body, heading and the one-per-tick direction latch
//! - [`collision`]: wall, body and obstacle classification of a candidate head
//! - [`food`]: food placement and time-limited bonus food
//! - [`level`]: level thresholds, tick speed, obstacle layouts, safe spawns
//! - [`score`]: session score with a write-through high score
//! - [`session`]: everything that lives for one game
//! - [`game_state`]: the state machine (Running, Paused, LevelTransition, GameOver)
//! - [`snapshot`]: render-ready copy of the game
//!
//! # Rules
//!
//! - The snake moves one cell per tick; a reversal of the heading is ignored.
//! - Food is worth 1 point and grows the snake by one cell.
//! - Every 12 points a bonus food worth 3 appears for 6 seconds of play time.
//! - Every 15 points the next level starts: new obstacles, a faster tick and a
//!   2 second announcement during which nothing moves.
//! - Hitting a wall, the body or an obstacle ends the game.
//!
//! # Example
//!
//! ```
//! use snake_tui_core::{GameConfig, GameStateMachine, MemoryStore};
//! use snake_tui_types::{Cell, GameAction};
//!
//! let mut game = GameStateMachine::new(GameConfig::default().with_seed(7), MemoryStore::new())
//!     .expect("default config is valid");
//!
//! game.apply_action(GameAction::MoveDown);
//! game.tick(game.tick_interval_ms());
//!
//! assert_eq!(game.snake().head(), Cell::new(20, 16));
//! ```

pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game_state;
pub mod grid;
pub mod level;
pub mod rng;
pub mod score;
pub mod session;
pub mod snake;
pub mod snapshot;

pub use snake_tui_types as types;

// Re-export commonly used types for convenience
pub use collision::CollisionDetector;
pub use config::{CollisionPolicy, GameConfig, GridConfig};
pub use error::{ConfigError, PersistError};
pub use food::{BonusFood, FoodSpawner};
pub use game_state::GameStateMachine;
pub use grid::{Bounds, GridModel};
pub use level::{spawn_layout, LevelManager, ObstacleSet};
pub use rng::SimpleRng;
pub use score::{HighScoreStore, MemoryStore, ScoreKeeper};
pub use session::Session;
pub use snake::SnakeState;
pub use snapshot::{BonusSnapshot, GameSnapshot};
