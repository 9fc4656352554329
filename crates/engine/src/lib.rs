//! Engine helpers built on top of `tui-jigsaw-core`.
//!
//! [`Game`] is the composition root: it owns the level sequencer, the puzzle
//! session and the active input strategy, and routes events between them.

pub mod game;

pub use tui_jigsaw_types as types;

pub use game::{Game, GameStatus};
