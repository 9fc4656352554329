//! Game composition root.

use tracing::{debug, info, warn};
use tui_jigsaw_core::config;
use tui_jigsaw_core::{
    LevelEvent, LevelSequencer, PuzzleEvent, PuzzleSession, SessionSettings, TileId,
};
use tui_jigsaw_input::{strategy_for, InputStrategy};

use crate::types::{AppAction, PointerEvent, PuzzleMode, Rect};

/// Coarse status for front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// No level could be started.
    Idle,
    Playing,
    /// The level finished its celebration; waiting for `NextLevel` or `RestartLevel`.
    LevelComplete,
}

/// Owns the level list, the puzzle session and the active input strategy.
#[derive(Debug)]
pub struct Game {
    levels: LevelSequencer,
    session: PuzzleSession,
    strategy: Box<dyn InputStrategy>,
    status: GameStatus,
}

impl Game {
    pub fn new(levels: LevelSequencer, settings: SessionSettings) -> Self {
        Self {
            levels,
            session: PuzzleSession::new(settings),
            strategy: strategy_for(PuzzleMode::default()),
            status: GameStatus::Idle,
        }
    }

    /// Start the sequencer's current level.
    ///
    /// An invalid level is refused before the sequencer announces it, so the
    /// running puzzle, its strategy and the status stay as they were. The
    /// input strategy is replaced to match the level's mode and reset, so no
    /// drag or selection carries over from the previous puzzle.
    pub fn start_level(&mut self) -> bool {
        let Some(upcoming) = self.levels.upcoming() else {
            self.status = GameStatus::Idle;
            return false;
        };
        if let Err(err) = config::validate(upcoming) {
            warn!(level = self.levels.level_index(), %err, "level could not be started");
            return false;
        }
        let Some(level) = self.levels.start_level() else {
            return false;
        };
        if !self.session.start_puzzle(&level) {
            warn!(level = self.levels.level_index(), "session refused level");
            return false;
        }
        if self.strategy.mode() != level.mode {
            self.strategy = strategy_for(level.mode);
        }
        self.strategy.reset();
        self.route_level_events();
        true
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.strategy.handle(&mut self.session, event);
    }

    /// Apply an application action. Returns false when the game should quit.
    pub fn apply_action(&mut self, action: AppAction) -> bool {
        match action {
            AppAction::RestartLevel => {
                info!(level = self.levels.level_index(), "restarting level");
                self.start_level();
            }
            AppAction::NextLevel => {
                let previous = self.levels.level_index();
                self.levels.advance_level();
                if !self.start_level() {
                    self.levels.set_level_index(previous);
                }
            }
            AppAction::Quit => return false,
        }
        true
    }

    /// Advance the session and route its events. Returns true if anything changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let mut changed = self.session.tick(elapsed_ms);
        for event in self.session.take_events() {
            if event == PuzzleEvent::LevelCompleted {
                self.levels.notify_completed();
            }
        }
        changed |= self.route_level_events();
        changed
    }

    /// Drain the sequencer's events into the game status. Returns true if
    /// any were handled.
    fn route_level_events(&mut self) -> bool {
        let events = self.levels.take_events();
        for event in &events {
            match *event {
                LevelEvent::Started(level) => {
                    debug!(level, "playing");
                    self.status = GameStatus::Playing;
                }
                LevelEvent::Completed(level) => {
                    debug!(level, "waiting for next level");
                    self.status = GameStatus::LevelComplete;
                }
            }
        }
        !events.is_empty()
    }

    pub fn set_board_bounds(&mut self, board: Rect) {
        self.session.set_board_bounds(board);
    }

    pub fn session(&self) -> &PuzzleSession {
        &self.session
    }

    pub fn levels(&self) -> &LevelSequencer {
        &self.levels
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn mode(&self) -> PuzzleMode {
        self.strategy.mode()
    }

    /// Tile the player is dragging or has selected.
    pub fn active_tile(&self) -> Option<TileId> {
        self.strategy.active_tile()
    }
}
