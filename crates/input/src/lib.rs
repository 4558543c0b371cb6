//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework beyond `crossterm` event
//! types. It maps key events into [`crate::types::GameIntent`] and converts
//! mouse positions into board cells for drag and drop.

pub mod map;
pub mod pointer;

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

pub use map::{map_key, should_quit};
pub use pointer::{figure_at, DragGrip, PointerMap};
