//! Scoring module - line clear points
//!
//! Rows and columns are scored separately even when they share cells: an
//! L-shaped double clear is worth two lines.

use crate::types::LINE_CLEAR_POINTS;

/// Score calculation result for one clear event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub lines: u32,
    pub total: u32,
}

/// Points for clearing `rows` full rows and `cols` full columns at once
pub fn calculate_line_score(rows: usize, cols: usize) -> ScoreResult {
    let lines = (rows + cols) as u32;
    ScoreResult {
        lines,
        total: LINE_CLEAR_POINTS.saturating_mul(lines),
    }
}
