//! Mouse support: terminal cells to board cells, and drag bookkeeping.
//!
//! Board coordinates extend past the grid (the tray sits below it, and tray
//! figures may hang off either side), so every conversion works in signed
//! cells and floors toward negative infinity.

use crate::core::{FigureId, FigureSnapshot, GameSnapshot};

/// Where board cell (0, 0) is drawn and how large one board cell is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerMap {
    /// Terminal column of board cell (0, 0); may be negative when scrolled off
    pub origin_col: i32,
    pub origin_row: i32,
    /// Terminal columns per board cell
    pub cell_w: u16,
    /// Terminal rows per board cell
    pub cell_h: u16,
}

impl PointerMap {
    pub fn new(origin_col: i32, origin_row: i32, cell_w: u16, cell_h: u16) -> Self {
        Self {
            origin_col,
            origin_row,
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Board cell under terminal position (column, row)
    pub fn to_cell(&self, column: u16, row: u16) -> (i16, i16) {
        let x = (column as i32 - self.origin_col).div_euclid(self.cell_w as i32);
        let y = (row as i32 - self.origin_row).div_euclid(self.cell_h as i32);
        (clamp_i16(x), clamp_i16(y))
    }
}

fn clamp_i16(v: i32) -> i16 {
    v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// The tray figure covering board cell (x, y), topmost first
pub fn figure_at(snap: &GameSnapshot, x: i16, y: i16) -> Option<&FigureSnapshot> {
    snap.tray.iter().rev().find(|f| f.covers(x, y))
}

/// Remembers where inside a figure the pointer grabbed it, so the figure
/// follows the pointer without jumping its origin to the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragGrip {
    held: Option<(FigureId, i16, i16)>,
}

impl DragGrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grab the figure under (x, y), if any
    pub fn grab(&mut self, snap: &GameSnapshot, x: i16, y: i16) -> Option<FigureId> {
        let figure = figure_at(snap, x, y)?;
        self.held = Some((figure.id, x - figure.x, y - figure.y));
        Some(figure.id)
    }

    pub fn figure(&self) -> Option<FigureId> {
        self.held.map(|(id, _, _)| id)
    }

    /// Figure origin that keeps the grabbed cell under the pointer at (x, y)
    pub fn target(&self, x: i16, y: i16) -> Option<(i16, i16)> {
        self.held
            .map(|(_, gx, gy)| (x.saturating_sub(gx), y.saturating_sub(gy)))
    }

    pub fn release(&mut self) -> Option<FigureId> {
        self.held.take().map(|(id, _, _)| id)
    }
}
