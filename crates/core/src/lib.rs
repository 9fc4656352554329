//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate owns the rules of a sliced-image jigsaw: layout, shuffling,
//! swapping, win detection and level progression. It has **no dependencies**
//! on terminals or input devices:
//!
//! - **Deterministic**: same seed, same shuffle, same timings
//! - **Single-threaded**: all delays are scheduler tasks advanced by `tick`
//! - **Allocation-light**: tiles live in a fixed pool reused across setups
//!
//! # Module Structure
//!
//! - [`layout`]: cell positions and board-fit scale for a grid
//! - [`arrangement`]: shuffled coordinates with no tile left in place
//! - [`tile`]: tiles, their visuals and the tile pool
//! - [`schedule`]: cancellable timed tasks
//! - [`session`]: the puzzle state machine
//! - [`level`]: ordered level list
//! - [`config`]: level files, validation and environment settings
//! - [`rng`]: seedable LCG
//!
//! # Example
//!
//! ```
//! use tui_jigsaw_core::{LevelSequencer, PuzzleEvent, PuzzleSession};
//! use tui_jigsaw_core::config::default_levels;
//!
//! let mut levels = LevelSequencer::new(default_levels());
//! let mut session = PuzzleSession::default();
//!
//! let config = levels.start_level().unwrap();
//! session.start_puzzle(&config);
//! assert!(matches!(session.take_events()[0], PuzzleEvent::SetupStarted { .. }));
//! ```
//!
//! # Timing
//!
//! Call [`PuzzleSession::tick`](session::PuzzleSession::tick) every frame with
//! the elapsed time. Setup takes `rows * 100 + 500` ms of spawn animation plus
//! 600 ms of shuffle settle before input opens; each swap locks input for 350 ms.

pub mod arrangement;
pub mod config;
pub mod layout;
pub mod level;
pub mod rng;
pub mod schedule;
pub mod session;
pub mod tile;

pub use tui_jigsaw_types as types;

// Re-export commonly used types for convenience
pub use arrangement::derangement;
pub use config::{ConfigError, SessionSettings};
pub use layout::LayoutMetrics;
pub use level::{LevelEvent, LevelSequencer};
pub use rng::SimpleRng;
pub use schedule::{Scheduler, TaskId};
pub use session::{PuzzleEvent, PuzzleSession};
pub use tile::{Tile, TileId, TilePool, TileVisual};
