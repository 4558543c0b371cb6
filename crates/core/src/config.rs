//! Game configuration
//!
//! Board dimensions and tray size are fixed when an engine is constructed.

use crate::error::GameError;
use crate::types::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_TRAY_SIZE, MAX_BOARD_DIM, MAX_TRAY_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: u8,
    pub cols: u8,
    pub tray_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            tray_size: DEFAULT_TRAY_SIZE,
        }
    }
}

impl GameConfig {
    pub fn new(rows: u8, cols: u8, tray_size: usize) -> Self {
        Self {
            rows,
            cols,
            tray_size,
        }
    }

    /// Create from environment variables
    ///
    /// `BLOCKS_ROWS`, `BLOCKS_COLS` and `BLOCKS_TRAY_SIZE`; missing or
    /// unparseable values keep their defaults. Call [`GameConfig::validate`]
    /// on the result.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).map(|s| s.trim().to_string());

        let rows = read("BLOCKS_ROWS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.rows);
        let cols = read("BLOCKS_COLS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cols);
        let tray_size = read("BLOCKS_TRAY_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.tray_size);

        Self {
            rows,
            cols,
            tray_size,
        }
    }

    pub fn validate(self) -> Result<Self, GameError> {
        validate_dims(self.rows, self.cols)?;
        if self.tray_size == 0 || self.tray_size > MAX_TRAY_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "tray size must be in 1..={MAX_TRAY_SIZE}, got {}",
                self.tray_size
            )));
        }
        Ok(self)
    }
}

pub(crate) fn validate_dims(rows: u8, cols: u8) -> Result<(), GameError> {
    if rows == 0 || cols == 0 || rows > MAX_BOARD_DIM || cols > MAX_BOARD_DIM {
        return Err(GameError::InvalidConfig(format!(
            "board must be between 1x1 and {MAX_BOARD_DIM}x{MAX_BOARD_DIM}, got {rows}x{cols}"
        )));
    }
    Ok(())
}
