use crate::grid::Bounds;
use crate::types::{Cell, Direction, GameOverCause, GameState, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BonusSnapshot {
    pub cell: Cell,
    pub remaining_ms: u32,
    pub points: u32,
}

/// Everything a renderer needs for one frame.
///
/// Refill an existing snapshot with `GameStateMachine::snapshot_into` to reuse
/// its buffers across frames.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub bounds: Bounds,
    pub cell_size: u16,
    /// Head first
    pub body: Vec<Cell>,
    pub direction: Direction,
    pub food: Option<Cell>,
    pub bonus: Option<BonusSnapshot>,
    pub obstacles: Vec<Cell>,
    pub score: u32,
    pub high_score: u32,
    pub play_time_ms: u64,
    pub level: u32,
    pub state: GameState,
    /// Remaining level announcement time
    pub transition_ms: u32,
    pub paused: bool,
    pub game_over: bool,
    pub cause: Option<GameOverCause>,
    pub session_id: u32,
}

impl GameSnapshot {
    /// Reset to the default snapshot, keeping the buffer allocations.
    pub fn clear(&mut self) {
        let mut body = std::mem::take(&mut self.body);
        let mut obstacles = std::mem::take(&mut self.obstacles);
        body.clear();
        obstacles.clear();
        *self = Self {
            body,
            obstacles,
            ..Self::default()
        };
    }

    pub fn head(&self) -> Option<Cell> {
        self.body.first().copied()
    }

    pub fn playable(&self) -> bool {
        self.state == GameState::Running
    }

    /// Elapsed play time in whole seconds
    pub fn play_time_secs(&self) -> u64 {
        self.play_time_ms / 1000
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(0, 0, GRID_WIDTH, GRID_HEIGHT),
            cell_size: 0,
            body: Vec::new(),
            direction: Direction::Right,
            food: None,
            bonus: None,
            obstacles: Vec::new(),
            score: 0,
            high_score: 0,
            play_time_ms: 0,
            level: 1,
            state: GameState::Running,
            transition_ms: 0,
            paused: false,
            game_over: false,
            cause: None,
            session_id: 0,
        }
    }
}
