//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules of the block-placement puzzle: the board,
//! the shape catalog, the figure tray, line clears and loss detection.
//! It has **no dependencies** on terminal, input or other I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical trays
//! - **Testable**: Every rule is reachable through plain method calls
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`shapes`]: Shape normalization and the immutable [`ShapeCatalog`]
//! - [`board`]: `rows x cols` grid with placement checks and line detection
//! - [`tray`]: The figures currently offered to the player
//! - [`animation`]: Progress of one line clear event
//! - [`scoring`]: Line clear points
//! - [`engine`]: [`GameEngine`], which sequences all of the above
//! - [`snapshot`]: Read-only per-frame view for renderers
//!
//! # Game Rules
//!
//! - **Placement**: A figure goes onto empty, in-bounds cells only; a cell
//!   that is mid-clear still counts as occupied
//! - **Lines**: Every full row and column clears, 100 points each; rows and
//!   columns completed by one placement share one animation
//! - **Tray**: When the last figure is placed, a new set is drawn uniformly
//!   at random with replacement
//! - **Game Over**: No remaining tray figure fits anywhere on the board
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::{GameConfig, GameEngine, Placement, ShapeCatalog};
//!
//! let catalog = ShapeCatalog::standard().unwrap();
//! let mut game = GameEngine::new(catalog, GameConfig::default(), 12345).unwrap();
//! game.start();
//!
//! let id = game.tray().slot(0).unwrap().id;
//! let result = game.try_place(id, 0, 0).unwrap();
//! assert!(matches!(result, Placement::Committed { .. }));
//! assert_eq!(game.tray().len(), 2);
//!
//! // Advance clear animations once per frame.
//! game.tick(0.04).unwrap();
//! ```
//!
//! # Timing
//!
//! The core owns no clock. A driver calls
//! [`GameEngine::tick`](engine::GameEngine::tick) every frame with the
//! fraction of a full clear animation that elapsed (the terminal front-end
//! uses `TICK_MS / CLEAR_ANIMATION_MS`).

pub mod animation;
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;
pub mod tray;

pub use tui_blocks_types as types;

// Re-export commonly used types for convenience
pub use animation::ClearAnimation;
pub use board::{Board, Cell, RejectReason};
pub use config::GameConfig;
pub use engine::{GameEngine, LineClear, Placement};
pub use error::{GameError, ShapeError};
pub use rng::SimpleRng;
pub use scoring::{calculate_line_score, ScoreResult};
pub use shapes::{normalize, ShapeCatalog, ShapeDefinition};
pub use snapshot::{AnimationSnapshot, FigureSnapshot, GameSnapshot};
pub use tray::{Figure, FigureId, FigureTray};
