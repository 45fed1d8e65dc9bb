//! Terminal falling-block game (default binary).
//!
//! crossterm for input, a framebuffer-based renderer for output, and the
//! engine driven at a fixed frame rate.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use term_tetris::core::{GameSnapshot, SimpleRng};
use term_tetris::driver::{log_file_from_env, DriverConfig, ENV_LOG};
use term_tetris::engine::Engine;
use term_tetris::input::{handle_key_event, should_quit};
use term_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use term_tetris::types::{Command, TICK_MS};

fn main() -> Result<()> {
    // Logging first, so warnings about other variables reach the file.
    init_logging(log_file_from_env().as_deref())?;
    let config = DriverConfig::from_env();

    info!(
        seed = config.seed,
        gravity_frames = config.gravity_frames,
        top_row = ?config.engine.top_row,
        rotation = ?config.engine.rotation,
        "starting"
    );

    let engine = Engine::new(config.engine, SimpleRng::new(config.seed))?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, engine, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Install a file-backed subscriber when `TETRIS_LOG_FILE` is set.
///
/// stdout belongs to the game, so without a log file nothing is installed.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, mut engine: Engine, config: &DriverConfig) -> Result<()> {
    let view = GameView::default();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut clock = config.gravity_clock();
    let mut reported_game_over = false;

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        engine.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        let mut command = Command::None;
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(
                            pieces = engine.pieces_spawned(),
                            lines = engine.lines_cleared(),
                            "quit"
                        );
                        return Ok(());
                    }
                    command = handle_key_event(key).unwrap_or_default();
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if command != Command::None {
            engine.tick(command);
        }
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if clock.advance() {
                engine.gravity_step();
            }
        }

        if engine.is_game_over() && !reported_game_over {
            reported_game_over = true;
            info!(
                pieces = engine.pieces_spawned(),
                lines = engine.lines_cleared(),
                "game over, waiting for quit"
            );
        }
    }
}
