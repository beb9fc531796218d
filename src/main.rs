//! Terminal snake runner (default binary).
//!
//! Owns the terminal, the tick driver and the durable stores; every game rule
//! lives in `snake_tui::core`.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{debug, info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};

use snake_tui::core::{GameSnapshot, GameStateMachine};
use snake_tui::input::handle_key_event;
use snake_tui::storage::{FileHighScoreStore, StatsStore};
use snake_tui::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use snake_tui::types::CoreEvent;
use snake_tui::Settings;

type Game = GameStateMachine<FileHighScoreStore>;

fn main() -> Result<()> {
    let settings = Settings::from_env();
    init_logging(&settings)?;

    // Invalid configuration aborts before the terminal is touched.
    let store = FileHighScoreStore::new(&settings.high_score_path);
    let mut game = GameStateMachine::new(settings.game_config(), store)
        .context("invalid game configuration")?;
    let stats = StatsStore::new(&settings.stats_path);
    info!("seed {}", settings.seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &stats);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("exiting, high score {}", game.high_score());
    result
}

fn init_logging(settings: &Settings) -> Result<()> {
    let Some(path) = &settings.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("cannot create log file {}", path.display()))?;
    WriteLogger::init(LevelFilter::Info, Config::default(), file).context("logger already set")?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, game: &mut Game, stats: &StatsStore) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut last_tick = Instant::now();

    loop {
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next tick; the period shrinks with the level.
        let period = Duration::from_millis(game.tick_interval_ms() as u64);
        let timeout = period.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
            if game.quit_requested() {
                return Ok(());
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= period {
            last_tick = Instant::now();
            game.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
            for event in game.drain_events() {
                on_event(event, stats);
            }
        }
    }
}

fn on_event(event: CoreEvent, stats: &StatsStore) {
    match event {
        CoreEvent::FoodEaten { score } | CoreEvent::BonusEaten { score } => {
            debug!("score {}", score);
        }
        CoreEvent::LevelUp { level } => debug!("level {}", level),
        CoreEvent::BonusSpawned { .. } | CoreEvent::BonusExpired => {}
        CoreEvent::GameOver(record) => match stats.record(&record) {
            Ok(totals) => info!(
                "{} games played, average score {}, best {}",
                totals.games_played,
                totals.average_score(),
                totals.best_score
            ),
            Err(err) => warn!("failed to save stats {}: {}", stats.path().display(), err),
        },
    }
}
