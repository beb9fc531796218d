//! Session module - all state that lives for exactly one game
//!
//! A session is created when a game starts and dropped when the next one
//! begins; restarting never mutates an old session. Only the durable high
//! score outlives it.

use std::collections::HashSet;

use crate::food::{BonusFood, FoodSpawner};
use crate::grid::GridModel;
use crate::level::{spawn_layout, ObstacleSet};
use crate::rng::SimpleRng;
use crate::score::{HighScoreStore, ScoreKeeper};
use crate::snake::SnakeState;
use crate::types::{Cell, Direction, GameOverCause, GameState, INITIAL_SNAKE_LEN};

#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) id: u32,
    pub(crate) snake: SnakeState,
    pub(crate) food: Option<Cell>,
    pub(crate) bonus: Option<BonusFood>,
    pub(crate) score: ScoreKeeper,
    pub(crate) level: u32,
    pub(crate) obstacles: ObstacleSet,
    pub(crate) state: GameState,
    pub(crate) transition_ms: u32,
    pub(crate) play_time_ms: u64,
    pub(crate) cause: Option<GameOverCause>,
    pub(crate) rng: SimpleRng,
}

impl Session {
    /// Build a fresh level-1 session. Reads the durable high score once.
    pub fn start(
        id: u32,
        seed: u32,
        grid: &GridModel,
        spawner: &FoodSpawner,
        store: &mut dyn HighScoreStore,
    ) -> Self {
        let bounds = grid.bounds();
        let obstacles = ObstacleSet::default();
        let snake = match spawn_layout(bounds, &obstacles, INITIAL_SNAKE_LEN) {
            Some(cells) => SnakeState::from_cells(cells, Direction::Right),
            None => SnakeState::new(bounds.center(), Direction::Right, INITIAL_SNAKE_LEN),
        };

        let mut session = Self {
            id,
            snake,
            food: None,
            bonus: None,
            score: ScoreKeeper::load(store),
            level: 1,
            obstacles,
            state: GameState::Running,
            transition_ms: 0,
            play_time_ms: 0,
            cause: None,
            rng: SimpleRng::new(seed),
        };
        let occupied = session.occupied();
        session.food = spawner.place_food(&occupied, bounds, &mut session.rng);
        session
    }

    /// Cells food must not land on: snake, obstacles and any food already out.
    pub fn occupied(&self) -> HashSet<Cell> {
        let mut cells: HashSet<Cell> = self.snake.body().iter().copied().collect();
        cells.extend(self.obstacles.iter());
        cells.extend(self.food);
        cells.extend(self.bonus.map(|b| b.cell));
        cells
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn snake(&self) -> &SnakeState {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn bonus(&self) -> Option<&BonusFood> {
        self.bonus.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn high_score(&self) -> u32 {
        self.score.high_score()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn transition_ms(&self) -> u32 {
        self.transition_ms
    }

    pub fn play_time_ms(&self) -> u64 {
        self.play_time_ms
    }

    pub fn cause(&self) -> Option<GameOverCause> {
        self.cause
    }

    /// Seed for the session that follows this one
    pub fn next_seed(&self) -> u32 {
        let mut rng = self.rng.clone();
        rng.next_u32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::MemoryStore;

    #[test]
    fn test_fresh_session() {
        let mut store = MemoryStore::with_value(9);
        let s = Session::start(
            0,
            42,
            &GridModel::default(),
            &FoodSpawner::default(),
            &mut store,
        );
        assert_eq!(s.state(), GameState::Running);
        assert_eq!(s.level(), 1);
        assert_eq!(s.score(), 0);
        assert_eq!(s.high_score(), 9);
        assert_eq!(s.snake().len(), INITIAL_SNAKE_LEN);
        assert_eq!(s.snake().head(), Cell::new(20, 15));
        assert_eq!(s.snake().direction(), Direction::Right);
        let food = s.food().unwrap();
        assert!(!s.snake().contains(food));
        assert!(s.bonus().is_none());
        assert!(s.obstacles().is_empty());
    }

    #[test]
    fn test_occupied_includes_food() {
        let mut store = MemoryStore::new();
        let s = Session::start(
            0,
            1,
            &GridModel::default(),
            &FoodSpawner::default(),
            &mut store,
        );
        let occ = s.occupied();
        assert_eq!(occ.len(), 4);
        assert!(occ.contains(&s.food().unwrap()));
    }
}
