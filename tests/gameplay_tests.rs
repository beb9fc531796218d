//! End-to-end gameplay scenarios against the state machine

use snake_tui::core::{
    GameConfig, GameStateMachine, HighScoreStore, LevelManager, MemoryStore, SimpleRng,
};
use snake_tui::types::{
    Cell, CollisionKind, CoreEvent, Direction, GameAction, GameOverCause, GameState,
    BONUS_LIFESPAN_MS,
};

type Game = GameStateMachine<MemoryStore>;

fn new_game(store: MemoryStore) -> Game {
    GameStateMachine::new(GameConfig::default().with_seed(2024), store).unwrap()
}

/// Place the food directly ahead of the head and advance one tick.
fn eat(g: &mut Game) {
    let ahead = g.snake().next_head();
    if g.bonus().is_some_and(|b| b.cell == ahead) {
        g.set_bonus(None);
    }
    assert!(g.set_food(ahead), "cannot place food at {:?}", ahead);
    assert!(g.tick(g.tick_interval_ms()));
    assert_ne!(g.state(), GameState::GameOver);
}

/// Eat `n` foods on a down/right staircase, starting with a turn down.
fn staircase(g: &mut Game, n: u32) {
    for i in 0..n {
        let turn = if i % 2 == 0 {
            GameAction::MoveDown
        } else {
            GameAction::MoveRight
        };
        g.apply_action(turn);
        eat(g);
    }
}

#[test]
fn test_down_event_turns_on_next_tick() {
    let mut g = new_game(MemoryStore::new());
    assert!(g.set_food(Cell::new(0, 0)));
    assert_eq!(g.snake().head(), Cell::new(20, 15));
    assert_eq!(g.snake().direction(), Direction::Right);
    assert_eq!(g.snake().len(), 3);

    assert!(g.apply_action(GameAction::MoveDown));
    g.tick(143);

    assert_eq!(g.snake().head(), Cell::new(20, 16));
    assert_ne!(g.snake().head(), Cell::new(21, 15));
    assert_eq!(g.snake().len(), 3);

    // One cell in grid units is one cell size in pixels.
    let (_, y0) = g.grid().to_pixels(Cell::new(20, 15));
    let (_, y1) = g.grid().to_pixels(g.snake().head());
    assert_eq!(y1 - y0, 20);
}

#[test]
fn test_wall_hit_ends_game_and_persists_high_score() {
    let mut g = new_game(MemoryStore::with_value(1));
    eat(&mut g);
    eat(&mut g);
    assert_eq!(g.score(), 2);
    // Written through as soon as the score passed the stored record.
    assert_eq!(g.store().value(), Some(2));

    assert!(g.set_food(Cell::new(0, 0)));
    while g.state() == GameState::Running {
        g.tick(143);
    }
    assert_eq!(g.state(), GameState::GameOver);
    assert_eq!(g.snake().head().x, 39);
    assert_eq!(
        g.session().cause(),
        Some(GameOverCause::Collision(CollisionKind::Wall))
    );
    assert_eq!(g.store().value(), Some(2));

    let over: Vec<CoreEvent> = g
        .drain_events()
        .filter(|e| matches!(e, CoreEvent::GameOver(_)))
        .collect();
    assert_eq!(over.len(), 1);
}

#[test]
fn test_lower_score_never_overwrites_record() {
    let mut g = new_game(MemoryStore::with_value(50));
    eat(&mut g);
    assert!(g.set_food(Cell::new(0, 0)));
    while g.state() == GameState::Running {
        g.tick(143);
    }
    assert_eq!(g.store().value(), Some(50));
    assert_eq!(g.store().writes, 0);
    assert_eq!(g.high_score(), 50);
}

#[test]
fn test_bonus_spawns_at_twelve_and_is_worth_three() {
    let mut g = new_game(MemoryStore::new());
    staircase(&mut g, 11);
    assert!(g.bonus().is_none());
    staircase(&mut g, 1);
    assert_eq!(g.score(), 12);
    let bonus = *g.bonus().unwrap();
    assert_eq!(bonus.lifespan_ms, BONUS_LIFESPAN_MS);
    assert_eq!(bonus.points, 3);

    // Move it into the snake's path and eat it.
    let ahead = g.snake().next_head();
    assert!(g.set_bonus(None));
    assert!(g.set_food(Cell::new(0, 0)));
    assert!(g.set_bonus(Some(ahead)));
    let len = g.snake().len();
    g.tick(143);
    assert_eq!(g.score(), 15);
    assert!(g.bonus().is_none());
    assert_eq!(g.snake().len(), len + 1);
}

#[test]
fn test_uneaten_bonus_disappears_without_points() {
    let mut g = new_game(MemoryStore::new());
    staircase(&mut g, 12);
    assert!(g.bonus().is_some());
    // Park the bonus away from the snake's path.
    g.set_bonus(None);
    assert!(g.set_food(Cell::new(0, 0)));
    assert!(g.set_bonus(Some(Cell::new(0, 29))));

    g.tick(3000);
    assert!(g.bonus().is_some());
    g.tick(2999);
    assert!(g.bonus().is_some());
    g.tick(1);
    assert!(g.bonus().is_none());
    assert_eq!(g.score(), 12);
    assert!(g.drain_events().any(|e| e == CoreEvent::BonusExpired));
}

#[test]
fn test_level_two_relocates_snake_clear_of_obstacles() {
    let mut g = new_game(MemoryStore::new());
    staircase(&mut g, 14);
    assert_eq!(g.level(), 1);
    let len_before = g.snake().len();
    // Park the score-12 bonus in a corner no layout touches.
    g.set_bonus(None);
    assert!(g.set_bonus(Some(Cell::new(0, 29))));
    staircase(&mut g, 1);
    assert_eq!(g.score(), 15);
    assert_eq!(g.level(), 2);
    assert_eq!(g.state(), GameState::LevelTransition);

    let expected = LevelManager::new(15, 143).obstacles_for(2, g.grid().bounds(), &mut SimpleRng::new(0));
    assert_eq!(g.obstacles(), &expected);
    assert_eq!(g.snake().len(), len_before + 1);
    for &c in g.snake().body() {
        assert!(!g.obstacles().contains(c), "{:?} overlaps an obstacle", c);
        assert!(g.grid().contains(c));
    }
    assert!(g.snake().is_settled());
    let food = g.food().unwrap();
    assert!(!g.obstacles().contains(food));
    assert!(!g.snake().contains(food));
    // A bonus the new layout leaves uncovered stays where it was.
    let bonus = g.bonus().copied().expect("bonus survives the level change");
    assert_eq!(bonus.cell, Cell::new(0, 29));
    assert_ne!(bonus.cell, food);
    assert_eq!(g.tick_interval_ms(), 123);
}

#[test]
fn test_restart_builds_fresh_session_with_durable_high_score() {
    let mut g = new_game(MemoryStore::new());
    staircase(&mut g, 5);
    assert!(g.set_food(Cell::new(0, 0)));
    g.apply_action(GameAction::MoveUp);
    while g.state() == GameState::Running {
        g.tick(143);
    }
    assert!(g.apply_action(GameAction::Restart));
    assert_eq!(g.state(), GameState::Running);
    assert_eq!(g.score(), 0);
    assert_eq!(g.high_score(), 5);
    assert_eq!(g.level(), 1);
    assert_eq!(g.play_time_ms(), 0);
    assert!(g.obstacles().is_empty());
    assert_eq!(g.snake().head(), Cell::new(20, 15));
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::MoveDown,
        GameAction::MoveLeft,
        GameAction::MoveUp,
        GameAction::MoveRight,
    ];
    let play = || {
        let mut g = new_game(MemoryStore::new());
        for i in 0..60 {
            if i % 7 == 0 {
                g.apply_action(script[(i / 7) % script.len()]);
            }
            g.tick(143);
        }
        g.snapshot()
    };
    assert_eq!(play(), play());
}

#[test]
fn test_store_is_read_once_per_session() {
    struct CountingStore {
        loads: u32,
    }
    impl HighScoreStore for CountingStore {
        fn load(&mut self) -> u32 {
            self.loads += 1;
            0
        }
        fn save(&mut self, _: u32) -> Result<(), snake_tui::core::PersistError> {
            Ok(())
        }
    }

    let mut g = GameStateMachine::new(GameConfig::default(), CountingStore { loads: 0 }).unwrap();
    for _ in 0..5 {
        g.tick(143);
    }
    assert_eq!(g.store().loads, 1);
}

#[test]
fn test_turning_into_own_body_ends_game() {
    let mut g = new_game(MemoryStore::new());
    eat(&mut g);
    eat(&mut g);
    assert_eq!(g.snake().len(), 5);
    assert_eq!(g.snake().head(), Cell::new(22, 15));

    assert!(g.set_food(Cell::new(0, 0)));
    for turn in [GameAction::MoveDown, GameAction::MoveLeft] {
        assert!(g.apply_action(turn));
        g.tick(143);
        assert_eq!(g.state(), GameState::Running);
    }
    // Head at (21, 16); straight up is the body, not the tail.
    assert!(g.apply_action(GameAction::MoveUp));
    g.tick(143);
    assert_eq!(g.state(), GameState::GameOver);
    assert_eq!(
        g.session().cause(),
        Some(GameOverCause::Collision(CollisionKind::Body))
    );
    assert_eq!(g.snake().head(), Cell::new(21, 16));
}

#[test]
fn test_steering_into_level_two_wall_ends_game() {
    let mut g = new_game(MemoryStore::new());
    staircase(&mut g, 15);
    assert_eq!(g.level(), 2);
    g.tick(1000);
    g.tick(1000);
    assert_eq!(g.state(), GameState::Running);

    g.set_bonus(None);
    assert!(g.set_food(Cell::new(0, 0)));
    // The long snake only fits in a row clear of the walls.
    let head = g.snake().head();
    assert!(head.y < 5 || head.y > 24, "unexpected spawn {:?}", head);
    assert!(head.x <= 24);
    while g.snake().head().x < 24 {
        g.tick(g.tick_interval_ms());
        assert_eq!(g.state(), GameState::Running);
    }

    let towards_wall = if head.y > 24 {
        GameAction::MoveUp
    } else {
        GameAction::MoveDown
    };
    assert!(g.apply_action(towards_wall));
    g.tick(g.tick_interval_ms());
    assert_eq!(g.state(), GameState::GameOver);
    assert_eq!(
        g.session().cause(),
        Some(GameOverCause::Collision(CollisionKind::Obstacle))
    );
}

#[test]
fn test_filling_small_grid_ends_with_board_full() {
    use GameAction::{MoveDown as D, MoveLeft as L, MoveRight as R, MoveUp as U};

    let config = GameConfig {
        bonus_interval: 1000,
        level_threshold: 1000,
        ..GameConfig::default().with_grid(8, 3)
    };
    let mut g = GameStateMachine::new(config, MemoryStore::new()).unwrap();
    assert_eq!(g.snake().head(), Cell::new(4, 1));

    // The bonus holds the one cell the route below leaves out.
    assert!(g.set_food(Cell::new(5, 1)));
    assert!(g.set_bonus(Some(Cell::new(0, 0))));

    let route = [
        R, R, R, D, L, L, L, L, L, L, L, U, R, U, R, R, R, R, R, R,
    ];
    for (i, turn) in route.into_iter().enumerate() {
        g.apply_action(turn);
        let ahead = g.snake().next_head();
        assert!(g.set_food(ahead), "step {}: {:?} is taken", i, ahead);
        g.tick(g.tick_interval_ms());
        if i + 1 < route.len() {
            assert_eq!(g.state(), GameState::Running, "step {}", i);
        }
    }

    assert_eq!(g.state(), GameState::GameOver);
    assert_eq!(g.session().cause(), Some(GameOverCause::BoardFull));
    assert_eq!(g.snake().len(), 23);
    assert_eq!(g.score(), 20);
}

#[test]
fn test_failing_store_does_not_stop_play() {
    let mut store = MemoryStore::new();
    store.fail_writes = true;
    let mut g = new_game(store);

    staircase(&mut g, 15);
    assert_eq!(g.level(), 2);
    assert_eq!(g.state(), GameState::LevelTransition);
    assert_eq!(g.high_score(), 15);
    assert_eq!(g.store().value(), None);
    assert_eq!(g.store().writes, 0);

    g.tick(2000);
    assert_eq!(g.state(), GameState::Running);
    assert!(g.tick(g.tick_interval_ms()));
}
