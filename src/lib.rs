//! TUI Jigsaw (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_jigsaw::{core,engine,input,term,types}`
//! so the binary, integration tests and benches share one import path.

pub use tui_jigsaw_core as core;
pub use tui_jigsaw_engine as engine;
pub use tui_jigsaw_input as input;
pub use tui_jigsaw_term as term;
pub use tui_jigsaw_types as types;
