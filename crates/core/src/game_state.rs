//! Game state machine - orchestrates sessions, ticks and input
//!
//! States: Running, Paused, LevelTransition and GameOver. One `tick` call
//! advances a Running game by exactly one cell, in this order:
//!
//! 1. apply the latched direction and compute the candidate head
//! 2. classify the head; any collision ends the session (high score flushed)
//! 3. move, then resolve food and bonus food (score, respawn, bonus spawn)
//! 4. expire an uneaten bonus whose lifespan has elapsed
//! 5. advance the level when the score crossed a threshold
//!
//! Paused and GameOver ticks do nothing. LevelTransition ticks only count
//! down the announcement and then resume Running.

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::collision::CollisionDetector;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::food::{BonusFood, FoodSpawner};
use crate::grid::GridModel;
use crate::level::{spawn_layout, LevelManager, ObstacleSet};
use crate::score::HighScoreStore;
use crate::session::Session;
use crate::snake::SnakeState;
use crate::snapshot::{BonusSnapshot, GameSnapshot};
use crate::types::{
    Cell, CoreEvent, Direction, GameAction, GameOverCause, GameRecord, GameState,
    INITIAL_SNAKE_LEN,
};

/// Events buffered between drains; one tick emits at most five.
const EVENT_CAPACITY: usize = 8;

/// Orchestrator owning the durable store and the current session
#[derive(Debug)]
pub struct GameStateMachine<S: HighScoreStore> {
    config: GameConfig,
    grid: GridModel,
    detector: CollisionDetector,
    spawner: FoodSpawner,
    levels: LevelManager,
    store: S,
    session: Session,
    events: ArrayVec<CoreEvent, EVENT_CAPACITY>,
    quit: bool,
}

impl<S: HighScoreStore> GameStateMachine<S> {
    /// Validate `config` and start the first session.
    pub fn new(config: GameConfig, mut store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = GridModel::new(&config.grid)?;
        let spawner = FoodSpawner::default();
        let levels = LevelManager::new(config.level_threshold, config.base_tick_ms);
        let session = Session::start(0, config.seed, &grid, &spawner, &mut store);
        info!(
            "session 0 started: grid {}x{}, high score {}",
            grid.bounds().width,
            grid.bounds().height,
            session.high_score()
        );

        Ok(Self {
            detector: CollisionDetector::new(config.collision_policy),
            config,
            grid,
            spawner,
            levels,
            store,
            session,
            events: ArrayVec::new(),
            quit: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> GameState {
        self.session.state
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn high_score(&self) -> u32 {
        self.session.high_score()
    }

    pub fn level(&self) -> u32 {
        self.session.level
    }

    pub fn snake(&self) -> &SnakeState {
        &self.session.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.session.food
    }

    pub fn bonus(&self) -> Option<&BonusFood> {
        self.session.bonus.as_ref()
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.session.obstacles
    }

    pub fn play_time_ms(&self) -> u64 {
        self.session.play_time_ms
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Tick period the driver should use for the current level
    pub fn tick_interval_ms(&self) -> u32 {
        self.levels.tick_interval_ms(self.session.level)
    }

    /// Put the food on a specific cell (scripted scenarios, replays, benches).
    ///
    /// Ignored unless the cell is inside the grid and not occupied by the
    /// snake, an obstacle or the bonus food.
    pub fn set_food(&mut self, cell: Cell) -> bool {
        let blocked = !self.grid.contains(cell)
            || self.session.snake.contains(cell)
            || self.session.obstacles.contains(cell)
            || self.session.bonus.is_some_and(|b| b.cell == cell);
        if blocked {
            return false;
        }
        self.session.food = Some(cell);
        true
    }

    /// Place or clear the bonus food (scripted scenarios, replays, benches).
    ///
    /// A placed bonus starts its lifespan now.
    pub fn set_bonus(&mut self, cell: Option<Cell>) -> bool {
        let Some(cell) = cell else {
            self.session.bonus = None;
            return true;
        };
        let blocked = !self.grid.contains(cell)
            || self.session.snake.contains(cell)
            || self.session.obstacles.contains(cell)
            || self.session.food == Some(cell);
        if blocked {
            return false;
        }
        self.session.bonus = Some(self.new_bonus(cell));
        true
    }

    /// Apply a decoded input event. Returns whether it had any effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveUp
            | GameAction::MoveDown
            | GameAction::MoveLeft
            | GameAction::MoveRight => {
                if self.session.state != GameState::Running {
                    return false;
                }
                match action.direction() {
                    Some(dir) => self.session.snake.request_direction(dir),
                    None => false,
                }
            }
            GameAction::TogglePause => match self.session.state {
                GameState::Running => {
                    self.session.state = GameState::Paused;
                    true
                }
                GameState::Paused => {
                    self.session.state = GameState::Running;
                    true
                }
                GameState::LevelTransition | GameState::GameOver => false,
            },
            GameAction::Restart => {
                if self.session.state != GameState::GameOver {
                    return false;
                }
                self.restart();
                true
            }
            GameAction::Quit => {
                self.quit = true;
                true
            }
        }
    }

    /// Replace the finished session with a fresh one.
    fn restart(&mut self) {
        let id = self.session.id.wrapping_add(1);
        let seed = self.session.next_seed();
        self.session = Session::start(id, seed, &self.grid, &self.spawner, &mut self.store);
        info!(
            "session {} started, high score {}",
            id,
            self.session.high_score()
        );
    }

    /// Advance one tick. Returns `true` when the snake moved or the game ended.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        match self.session.state {
            GameState::Paused | GameState::GameOver => false,
            GameState::LevelTransition => {
                self.session.transition_ms = self.session.transition_ms.saturating_sub(elapsed_ms);
                if self.session.transition_ms == 0 {
                    self.session.state = GameState::Running;
                }
                false
            }
            GameState::Running => {
                self.step(elapsed_ms);
                true
            }
        }
    }

    fn step(&mut self, elapsed_ms: u32) {
        self.session.play_time_ms += elapsed_ms as u64;

        let head = self.session.snake.next_head();
        let eats_food = self.session.food == Some(head);
        let eats_bonus = self.session.bonus.is_some_and(|b| b.cell == head);
        let grew = eats_food || eats_bonus;

        let kind = self.detector.classify(
            head,
            self.session.snake.body(),
            grew,
            &self.grid,
            &self.session.obstacles,
        );
        if kind.is_collision() {
            self.end_game(GameOverCause::Collision(kind));
            return;
        }

        self.session.snake.advance(grew);

        if eats_food {
            self.add_points(self.config.food_points);
            let score = self.session.score();
            self.push_event(CoreEvent::FoodEaten { score });

            self.session.food = None;
            let occupied = self.session.occupied();
            self.session.food =
                self.spawner
                    .place_food(&occupied, self.grid.bounds(), &mut self.session.rng);
            if self.session.food.is_none() {
                self.end_game(GameOverCause::BoardFull);
                return;
            }

            if score % self.config.bonus_interval == 0 {
                self.spawn_bonus();
            }
        } else if eats_bonus {
            let points = self
                .session
                .bonus
                .take()
                .map_or(self.config.bonus_points, |b| b.points);
            self.add_points(points);
            let score = self.session.score();
            self.push_event(CoreEvent::BonusEaten { score });
            debug!("bonus eaten at {:?}, score {}", head, score);
        }

        if let Some(bonus) = self.session.bonus {
            if bonus.is_expired(self.session.play_time_ms) {
                self.session.bonus = None;
                self.push_event(CoreEvent::BonusExpired);
                debug!("bonus at {:?} expired", bonus.cell);
            }
        }

        if let Some(next) = self
            .levels
            .maybe_advance(self.session.score(), self.session.level)
        {
            self.enter_level(next);
        }
    }

    fn add_points(&mut self, points: u32) {
        self.session.score.add(points, &mut self.store);
    }

    fn new_bonus(&self, cell: Cell) -> BonusFood {
        BonusFood::new(
            cell,
            self.session.play_time_ms,
            self.config.bonus_lifespan_ms,
            self.config.bonus_points,
        )
    }

    fn spawn_bonus(&mut self) {
        self.session.bonus = None;
        let occupied = self.session.occupied();
        let Some(cell) =
            self.spawner
                .place_food(&occupied, self.grid.bounds(), &mut self.session.rng)
        else {
            return;
        };
        self.session.bonus = Some(self.new_bonus(cell));
        self.push_event(CoreEvent::BonusSpawned { cell });
        debug!("bonus spawned at {:?}", cell);
    }

    /// Move a live bonus off a cell the new layout covered. Its clock and
    /// points carry over; it is dropped only when no cell is free.
    fn resettle_bonus(&mut self) {
        let Some(mut bonus) = self.session.bonus else {
            return;
        };
        let covered = self.session.obstacles.contains(bonus.cell)
            || self.session.snake.contains(bonus.cell);
        if !covered {
            return;
        }

        self.session.bonus = None;
        let occupied = self.session.occupied();
        match self
            .spawner
            .place_food(&occupied, self.grid.bounds(), &mut self.session.rng)
        {
            Some(cell) => {
                debug!("bonus moved from {:?} to {:?}", bonus.cell, cell);
                bonus.cell = cell;
                self.session.bonus = Some(bonus);
            }
            None => debug!("no free cell left for the bonus at {:?}", bonus.cell),
        }
    }

    /// Swap in the next level's obstacles, relocate the snake clear of them,
    /// respawn the food and start the announcement. A live bonus survives.
    fn enter_level(&mut self, level: u32) {
        let bounds = self.grid.bounds();
        let obstacles = self
            .levels
            .obstacles_for(level, bounds, &mut self.session.rng);

        let len = self.session.snake.len();
        let layout = spawn_layout(bounds, &obstacles, len)
            .or_else(|| spawn_layout(bounds, &obstacles, INITIAL_SNAKE_LEN));
        let Some(cells) = layout else {
            self.session.obstacles = obstacles;
            self.end_game(GameOverCause::BoardFull);
            return;
        };
        if cells.len() < len {
            info!("snake shortened to {} cells to fit level {}", cells.len(), level);
        }

        self.session.level = level;
        self.session.obstacles = obstacles;
        self.session.snake.relocate(cells, Direction::Right);
        self.session.food = None;
        self.resettle_bonus();
        let occupied = self.session.occupied();
        self.session.food = self
            .spawner
            .place_food(&occupied, bounds, &mut self.session.rng);
        if self.session.food.is_none() {
            self.end_game(GameOverCause::BoardFull);
            return;
        }

        self.session.state = GameState::LevelTransition;
        self.session.transition_ms = self.config.level_announce_ms;
        if self.session.transition_ms == 0 {
            self.session.state = GameState::Running;
        }
        self.push_event(CoreEvent::LevelUp { level });
        info!(
            "level {} reached at score {} ({} obstacles)",
            level,
            self.session.score(),
            self.session.obstacles.len()
        );
    }

    fn end_game(&mut self, cause: GameOverCause) {
        self.session.score.flush(&mut self.store);
        self.session.state = GameState::GameOver;
        self.session.cause = Some(cause);

        let record = GameRecord {
            score: self.session.score(),
            level: self.session.level,
            play_time_ms: self.session.play_time_ms,
            cause,
        };
        self.push_event(CoreEvent::GameOver(record));
        info!(
            "game over ({}): score {}, level {}, high score {}",
            cause.as_str(),
            record.score,
            record.level,
            self.session.high_score()
        );
    }

    fn push_event(&mut self, event: CoreEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take the events recorded since the last drain.
    pub fn drain_events(&mut self) -> impl Iterator<Item = CoreEvent> + '_ {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let s = &self.session;
        out.bounds = self.grid.bounds();
        out.cell_size = self.grid.cell_size();
        out.body.clear();
        out.body.extend(s.snake.body().iter().copied());
        out.direction = s.snake.direction();
        out.food = s.food;
        out.bonus = s.bonus.map(|b| BonusSnapshot {
            cell: b.cell,
            remaining_ms: b.remaining_ms(s.play_time_ms),
            points: b.points,
        });
        out.obstacles.clear();
        out.obstacles.extend(s.obstacles.iter());
        out.score = s.score();
        out.high_score = s.high_score();
        out.play_time_ms = s.play_time_ms;
        out.level = s.level;
        out.state = s.state;
        out.transition_ms = s.transition_ms;
        out.paused = s.state == GameState::Paused;
        out.game_over = s.state == GameState::GameOver;
        out.cause = s.cause;
        out.session_id = s.id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
