//! Terminal "game renderer" module.
//!
//! A small rendering layer for the puzzle: no widget toolkit, just a
//! framebuffer that is diffed and flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw the puzzle picture with half-block pixels (two per cell)
//! - Map terminal cells to world space and back for mouse input

pub mod board_view;
pub mod fb;
pub mod picture;
pub mod render_throttle;
pub mod renderer;

pub use tui_jigsaw_core as core;
pub use tui_jigsaw_engine as engine;
pub use tui_jigsaw_types as types;

pub use board_view::{hud_text, BoardView, Viewport, HUD_ROWS};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
