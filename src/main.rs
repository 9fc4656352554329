//! Terminal jigsaw runner (default binary).
//!
//! Uses crossterm for keyboard and mouse input and the framebuffer renderer
//! from `tui_jigsaw::term`.

use std::env;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_jigsaw::core::config;
use tui_jigsaw::core::{LevelSequencer, SessionSettings};
use tui_jigsaw::engine::Game;
use tui_jigsaw::input::{handle_key_event, pointer_event};
use tui_jigsaw::term::{BoardView, FrameBuffer, RenderThrottle, TerminalRenderer, Viewport};
use tui_jigsaw::types::{GridConfiguration, TICK_MS};

/// Snap distance in world units (terminal columns) when none is configured.
const TERMINAL_SNAP_THRESHOLD: f32 = 6.0;

/// Redraw interval for a still board.
const IDLE_REFRESH_MS: u64 = 1000;

fn main() -> Result<()> {
    init_logging()?;

    // Load configuration before raw mode so errors print normally.
    let levels = load_levels()?;
    let settings = SessionSettings::from_env(TERMINAL_SNAP_THRESHOLD);
    info!(
        levels = levels.len(),
        seed = settings.seed,
        snap_threshold = settings.snap_threshold,
        "starting"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, levels, settings);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to `JIGSAW_LOG_PATH` if set; the terminal itself is busy drawing.
fn init_logging() -> Result<()> {
    let Some(path) = env::var_os("JIGSAW_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("cannot create log file {}", Path::new(&path).display()))?;
    let filter = EnvFilter::try_from_env("JIGSAW_LOG_FILTER").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_levels() -> Result<Vec<GridConfiguration>> {
    let mut levels = match config::levels_path_from_env() {
        Some(path) => config::load_levels(Path::new(&path))
            .with_context(|| format!("JIGSAW_LEVELS_PATH={path}"))?,
        None => config::default_levels(),
    };
    config::apply_mode_override(&mut levels, config::mode_override_from_env());
    Ok(levels)
}

fn run(term: &mut TerminalRenderer, levels: Vec<GridConfiguration>, settings: SessionSettings) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::for_terminal(w, h);

    let mut game = Game::new(LevelSequencer::new(levels), settings);
    game.set_board_bounds(viewport.board_bounds());
    game.start_level();

    let view = BoardView::new();
    let mut fb = FrameBuffer::new(w, h);
    let mut throttle = RenderThrottle::new(IDLE_REFRESH_MS);

    let clock = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let session = game.session();
        let now_ms = clock.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, session.revision(), session.is_animating()) {
            view.render_into(&game, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = handle_key_event(key) {
                        if !game.apply_action(action) {
                            return Ok(());
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(pointer) = pointer_event(mouse, |c, r| viewport.screen_to_world(c, r)) {
                        game.handle_pointer(pointer);
                    }
                }
                Event::Resize(w, h) => {
                    viewport = Viewport::for_terminal(w, h);
                    game.set_board_bounds(viewport.board_bounds());
                    term.invalidate();
                    throttle.reset();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(TICK_MS);
        }
    }
}
