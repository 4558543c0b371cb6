//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond parsing/formatting, so
//! they can be shared by the core engine, the terminal front-end and tests.
//!
//! # Board Dimensions
//!
//! The default board is an 8x8 grid:
//!
//! - **Columns**: 8 (x, indexed 0-7, left to right)
//! - **Rows**: 8 (y, indexed 0-7, top to bottom)
//! - **Tray row**: figures are offered on row `rows + 3`, below the board
//!
//! # Scoring and Animation Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LINE_CLEAR_POINTS` | 100 | Points per full row or column |
//! | `FLASH_PHASE_END` | 0.3 | Progress at which a clear switches from flash to collapse |
//! | `TICK_MS` | 16 | Front-end frame interval (~60 FPS) |
//! | `CLEAR_ANIMATION_MS` | 400 | Front-end duration of one clear animation |
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{FigureKind, ClearPhase, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! let kind = FigureKind::from_str("square").unwrap();
//! assert_eq!(kind, FigureKind::Square);
//! assert_eq!(kind.as_str(), "square");
//!
//! assert_eq!(ClearPhase::from_progress(0.1), ClearPhase::Flash);
//! assert_eq!(ClearPhase::from_progress(0.5), ClearPhase::Collapse);
//!
//! assert_eq!(DEFAULT_ROWS, 8);
//! assert_eq!(DEFAULT_COLS, 8);
//! ```

use serde::Serialize;

/// Default board height in cells
pub const DEFAULT_ROWS: u8 = 8;

/// Default board width in cells
pub const DEFAULT_COLS: u8 = 8;

/// Largest accepted board dimension (either axis)
pub const MAX_BOARD_DIM: u8 = 32;

/// Number of figures offered at once
pub const DEFAULT_TRAY_SIZE: usize = 3;

/// Upper bound for a configured tray size
pub const MAX_TRAY_SIZE: usize = 6;

/// Horizontal distance between neighbouring tray slots, in cells
pub const TRAY_GAP: i16 = 6;

/// Distance from the board's last row to the tray row, in cells
pub const TRAY_ROW_OFFSET: i16 = 3;

/// Largest number of cells a catalog shape may have (3x3 block)
pub const MAX_SHAPE_CELLS: usize = 9;

/// Points awarded for each full row or column
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Clear progress below this value is the flash phase
pub const FLASH_PHASE_END: f32 = 0.3;

/// Front-end frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Front-end duration of a full clear animation in milliseconds
pub const CLEAR_ANIMATION_MS: u32 = 400;

/// Cell offset of a shape, `(dx, dy)`
pub type Offset = (i8, i8);

/// Figure kinds available in the standard catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    Dot,
    #[serde(rename = "bar2h")]
    Bar2H,
    #[serde(rename = "bar2v")]
    Bar2V,
    #[serde(rename = "bar3h")]
    Bar3H,
    #[serde(rename = "bar3v")]
    Bar3V,
    I,
    #[serde(rename = "iv")]
    IV,
    Square,
    BigSquare,
    Corner,
    L,
    J,
    T,
    S,
    Z,
}

impl FigureKind {
    /// Every kind, in catalog order
    pub const ALL: [FigureKind; 15] = [
        FigureKind::Dot,
        FigureKind::Bar2H,
        FigureKind::Bar2V,
        FigureKind::Bar3H,
        FigureKind::Bar3V,
        FigureKind::I,
        FigureKind::IV,
        FigureKind::Square,
        FigureKind::BigSquare,
        FigureKind::Corner,
        FigureKind::L,
        FigureKind::J,
        FigureKind::T,
        FigureKind::S,
        FigureKind::Z,
    ];

    /// Parse kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Self::ALL.iter().copied().find(|k| k.as_str() == lower)
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            FigureKind::Dot => "dot",
            FigureKind::Bar2H => "bar2h",
            FigureKind::Bar2V => "bar2v",
            FigureKind::Bar3H => "bar3h",
            FigureKind::Bar3V => "bar3v",
            FigureKind::I => "i",
            FigureKind::IV => "iv",
            FigureKind::Square => "square",
            FigureKind::BigSquare => "big_square",
            FigureKind::Corner => "corner",
            FigureKind::L => "l",
            FigureKind::J => "j",
            FigureKind::T => "t",
            FigureKind::S => "s",
            FigureKind::Z => "z",
        }
    }
}

impl std::fmt::Display for FigureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Board coordinate of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellPos {
    pub row: u8,
    pub col: u8,
}

impl CellPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Presentation phase of a clear animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearPhase {
    Flash,
    Collapse,
}

impl ClearPhase {
    pub fn from_progress(progress: f32) -> Self {
        if progress < FLASH_PHASE_END {
            ClearPhase::Flash
        } else {
            ClearPhase::Collapse
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClearPhase::Flash => "flash",
            ClearPhase::Collapse => "collapse",
        }
    }
}

/// Engine lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Constructed, first tray not dealt yet
    NotStarted,
    Playing,
    /// Terminal until the next reset
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::NotStarted => "not started",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game over",
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User intents forwarded from an input layer to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameIntent {
    /// Pick up the figure in the given tray slot (0-based)
    PickSlot(usize),
    /// Move the held figure by a cell delta
    Nudge(i16, i16),
    /// Drop the held figure where it is
    Release,
    /// Put the held figure back where it came from
    Cancel,
    Restart,
}
