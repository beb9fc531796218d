//! Game configuration and startup validation.

use crate::error::ConfigError;
use crate::types::{
    BASE_TICK_MS, BONUS_INTERVAL, BONUS_LIFESPAN_MS, BONUS_POINTS, CELL_SIZE, FOOD_POINTS,
    GRID_HEIGHT, GRID_WIDTH, LEVEL_ANNOUNCE_MS, LEVEL_THRESHOLD,
};

/// Smallest grid that can hold the spawn layout (3 body cells + lookahead).
pub const MIN_GRID_WIDTH: i16 = 8;
pub const MIN_GRID_HEIGHT: i16 = 3;

/// Largest grid accepted; keeps terminal geometry well inside `u16`.
pub const MAX_GRID_WIDTH: i16 = 200;
pub const MAX_GRID_HEIGHT: i16 = 200;

/// Playable grid geometry, in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub offset_x: i16,
    pub offset_y: i16,
    pub width: i16,
    pub height: i16,
    /// Cell edge length in pixels, for renderers that draw in pixels.
    pub cell_size: u16,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            cell_size: CELL_SIZE,
        }
    }
}

/// Whether the self-collision check may enter the cell the tail vacates this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// The current tail is ignored when the snake does not grow this tick.
    #[default]
    ExcludeVacatingTail,
    /// Every body cell blocks, including a tail that is about to move.
    IncludeTail,
}

/// Everything a session needs to know up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub seed: u32,
    pub collision_policy: CollisionPolicy,
    pub food_points: u32,
    pub bonus_points: u32,
    pub bonus_interval: u32,
    pub bonus_lifespan_ms: u32,
    pub level_threshold: u32,
    pub level_announce_ms: u32,
    pub base_tick_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            seed: 1,
            collision_policy: CollisionPolicy::default(),
            food_points: FOOD_POINTS,
            bonus_points: BONUS_POINTS,
            bonus_interval: BONUS_INTERVAL,
            bonus_lifespan_ms: BONUS_LIFESPAN_MS,
            level_threshold: LEVEL_THRESHOLD,
            level_announce_ms: LEVEL_ANNOUNCE_MS,
            base_tick_ms: BASE_TICK_MS,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_grid(mut self, width: i16, height: i16) -> Self {
        self.grid.width = width;
        self.grid.height = height;
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Check the configuration before any session is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.grid;
        if g.width <= 0 || g.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: g.width,
                height: g.height,
            });
        }
        if g.width < MIN_GRID_WIDTH || g.height < MIN_GRID_HEIGHT {
            return Err(ConfigError::GridTooSmall {
                width: g.width,
                height: g.height,
                min_width: MIN_GRID_WIDTH,
                min_height: MIN_GRID_HEIGHT,
            });
        }
        if g.width > MAX_GRID_WIDTH || g.height > MAX_GRID_HEIGHT {
            return Err(ConfigError::GridTooLarge {
                width: g.width,
                height: g.height,
                max_width: MAX_GRID_WIDTH,
                max_height: MAX_GRID_HEIGHT,
            });
        }
        if g.offset_x.checked_add(g.width).is_none() || g.offset_y.checked_add(g.height).is_none()
        {
            return Err(ConfigError::OutOfRange {
                x: g.offset_x,
                y: g.offset_y,
                width: g.width,
                height: g.height,
            });
        }
        if g.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let non_zero = [
            ("bonus interval", self.bonus_interval),
            ("bonus lifespan", self.bonus_lifespan_ms),
            ("level threshold", self.level_threshold),
            ("base tick period", self.base_tick_ms),
        ];
        for (name, value) in non_zero {
            if value == 0 {
                return Err(ConfigError::ZeroValue(name));
            }
        }
        Ok(())
    }
}
