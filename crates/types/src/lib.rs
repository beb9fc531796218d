//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping, storage).
//!
//! # Grid
//!
//! The default playfield is a 40x30 grid of cells, each drawn 20 pixels wide by
//! renderers that work in pixels. Cells are addressed in grid units:
//!
//! - **x**: 0..39, left to right
//! - **y**: 0..29, top to bottom
//! - **Spawn**: head at the grid centre (20, 15), moving right, body trailing left
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FOOD_POINTS` | 1 | Score for normal food |
//! | `BONUS_POINTS` | 3 | Score for bonus food |
//! | `BONUS_INTERVAL` | 12 | Bonus spawns when score becomes a multiple of this |
//! | `BONUS_LIFESPAN_MS` | 6000 | Bonus food disappears after this long |
//! | `LEVEL_THRESHOLD` | 15 | Score step between levels |
//! | `LEVEL_ANNOUNCE_MS` | 2000 | Length of the level transition banner |
//! | `BASE_TICK_MS` | 143 | Tick period at level 1 (about 7 moves per second) |
//!
//! # Examples
//!
//! ```
//! use snake_tui_types::{Cell, Direction, GameAction};
//!
//! let head = Cell::new(20, 15);
//! assert_eq!(head.step(Direction::Down), Cell::new(20, 16));
//!
//! assert_eq!(Direction::Left.opposite(), Direction::Right);
//!
//! let action = GameAction::from_str("moveUp").unwrap();
//! assert_eq!(action.direction(), Some(Direction::Up));
//! ```

/// Default grid width in cells (40 columns)
pub const GRID_WIDTH: i16 = 40;

/// Default grid height in cells (30 rows)
pub const GRID_HEIGHT: i16 = 30;

/// Default cell size in pixels
pub const CELL_SIZE: u16 = 20;

/// Snake length at session start
pub const INITIAL_SNAKE_LEN: usize = 3;

/// Score for eating normal food
pub const FOOD_POINTS: u32 = 1;

/// Score for eating bonus food
pub const BONUS_POINTS: u32 = 3;

/// A bonus food spawns when normal food brings the score to a multiple of this
pub const BONUS_INTERVAL: u32 = 12;

/// How long bonus food stays on the board (6 seconds)
pub const BONUS_LIFESPAN_MS: u32 = 6000;

/// Score step between levels
pub const LEVEL_THRESHOLD: u32 = 15;

/// Duration of the level announcement (LevelTransition state)
pub const LEVEL_ANNOUNCE_MS: u32 = 2000;

/// Tick period at level 1 (143ms ≈ 7 moves per second)
pub const BASE_TICK_MS: u32 = 143;

/// Tick period reduction per level above 1
pub const LEVEL_SPEEDUP_MS: u32 = 20;

/// Fastest tick period regardless of level
pub const MIN_TICK_MS: u32 = 50;

/// Random placement attempts before falling back to free-cell enumeration
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 64;

/// Cells ahead of a freshly spawned head that must be free of obstacles
pub const SPAWN_LOOKAHEAD: i16 = 3;

/// Elapsed time as `m:ss`; minutes are not wrapped into hours.
pub fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// A grid coordinate in cell units
///
/// Cells are plain values; negative and out-of-range coordinates are
/// representable so that a head that left the grid can be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `dir`
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }

    /// The cell `n` steps away in `dir`
    pub fn offset(self, dir: Direction, n: i16) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x.wrapping_add(dx * n),
            y: self.y.wrapping_add(dy * n),
        }
    }
}

/// Movement direction of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The exact reversal of this direction
    ///
    /// # Examples
    ///
    /// ```
    /// use snake_tui_types::Direction;
    ///
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Right.opposite(), Direction::Left);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit displacement in cell units (y grows downwards)
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Decoded input events delivered to the game
///
/// Raw device state (keys, pointer clicks) is translated into these before it
/// reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Turn the snake upwards
    MoveUp,
    /// Turn the snake downwards
    MoveDown,
    /// Turn the snake left
    MoveLeft,
    /// Turn the snake right
    MoveRight,
    /// Toggle between Running and Paused
    TogglePause,
    /// Start a fresh session after game over
    Restart,
    /// Leave the game
    Quit,
}

impl GameAction {
    /// Direction carried by a movement action
    pub fn direction(&self) -> Option<Direction> {
        match self {
            GameAction::MoveUp => Some(Direction::Up),
            GameAction::MoveDown => Some(Direction::Down),
            GameAction::MoveLeft => Some(Direction::Left),
            GameAction::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }

    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use snake_tui_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("togglePause"), Some(GameAction::TogglePause));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveup" => Some(GameAction::MoveUp),
            "movedown" => Some(GameAction::MoveDown),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "togglepause" | "pause" => Some(GameAction::TogglePause),
            "restart" => Some(GameAction::Restart),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveUp => "moveUp",
            GameAction::MoveDown => "moveDown",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::TogglePause => "togglePause",
            GameAction::Restart => "restart",
            GameAction::Quit => "quit",
        }
    }
}

/// Top-level game state; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Running,
    Paused,
    /// Level announcement between levels; gameplay is frozen
    LevelTransition,
    GameOver,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Running => "running",
            GameState::Paused => "paused",
            GameState::LevelTransition => "levelTransition",
            GameState::GameOver => "gameOver",
        }
    }
}

/// Collision classification of a candidate head cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionKind {
    None,
    /// Head left the playable grid
    Wall,
    /// Head ran into the snake's own body
    Body,
    /// Head ran into a level obstacle
    Obstacle,
}

impl CollisionKind {
    pub fn is_collision(&self) -> bool {
        !matches!(self, CollisionKind::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionKind::None => "none",
            CollisionKind::Wall => "wall",
            CollisionKind::Body => "body",
            CollisionKind::Obstacle => "obstacle",
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOverCause {
    Collision(CollisionKind),
    /// No free cell was left for the next food
    BoardFull,
}

impl GameOverCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverCause::Collision(kind) => kind.as_str(),
            GameOverCause::BoardFull => "boardFull",
        }
    }
}

/// Summary of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub score: u32,
    pub level: u32,
    pub play_time_ms: u64,
    pub cause: GameOverCause,
}

/// Core-side event emitted during a tick.
///
/// The driver drains these after each tick (logging, statistics, sound cues).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreEvent {
    FoodEaten { score: u32 },
    BonusSpawned { cell: Cell },
    BonusEaten { score: u32 },
    BonusExpired,
    LevelUp { level: u32 },
    GameOver(GameRecord),
}
