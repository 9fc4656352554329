//! Input module (engine-facing).
//!
//! Two layers, both independent of any UI framework:
//!
//! - [`map`] turns `crossterm` key and mouse events into [`crate::types::AppAction`]
//!   and world-space [`crate::types::PointerEvent`]s.
//! - [`strategy`] turns pointer events into puzzle operations according to the
//!   level's [`crate::types::PuzzleMode`].

pub mod map;
pub mod strategy;

pub use tui_jigsaw_types as types;

pub use map::{handle_key_event, pointer_event, should_quit};
pub use strategy::{strategy_for, ClickAndSwap, DragAndDrop, InputStrategy};
