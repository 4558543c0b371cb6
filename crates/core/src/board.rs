//! Board module - manages the game grid
//!
//! The board is a `rows x cols` grid where each cell is either empty or filled
//! with a figure kind, and may additionally be marked as clearing while a line
//! clear animation runs over it.
//! Uses a flat vector in row-major order; dimensions are fixed until reset.
//! Coordinates: (x, y) where x is the column (left to right) and y is the row
//! (top to bottom).

use serde::Serialize;

use crate::types::{CellPos, FigureKind, Offset};

/// A single board cell
///
/// `clearing` implies `filled`: a clearing cell still blocks placement until
/// its animation finalizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Cell {
    pub filled: bool,
    pub kind: Option<FigureKind>,
    pub clearing: bool,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        filled: false,
        kind: None,
        clearing: false,
    };

    pub fn filled_with(kind: FigureKind) -> Self {
        Self {
            filled: true,
            kind: Some(kind),
            clearing: false,
        }
    }

    /// Full for line detection: filled and not already part of a clear
    #[inline(always)]
    fn counts_for_line(&self) -> bool {
        self.filled && !self.clearing
    }
}

/// Why a shape cannot go at a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    OutOfBounds,
    Occupied,
    UnknownFigure,
}

impl RejectReason {
    pub fn code(self) -> &'static str {
        match self {
            RejectReason::OutOfBounds => "out_of_bounds",
            RejectReason::Occupied => "occupied",
            RejectReason::UnknownFigure => "unknown_figure",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RejectReason::OutOfBounds => "figure would leave the board",
            RejectReason::Occupied => "figure overlaps a filled or clearing cell",
            RejectReason::UnknownFigure => "figure is not in the tray",
        }
    }
}

/// The game board - `rows x cols` cells using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: u8,
    cols: u8,
    /// Flat cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: u8, cols: u8) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::EMPTY; rows as usize * cols as usize],
        }
    }

    /// Reallocate every cell as empty, possibly with new dimensions
    pub fn reset(&mut self, rows: u8, cols: u8) {
        self.rows = rows;
        self.cols = cols;
        self.cells.clear();
        self.cells.resize(rows as usize * cols as usize, Cell::EMPTY);
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.cols as i16 || y < 0 || y >= self.rows as i16 {
            return None;
        }
        Some((y as usize) * (self.cols as usize) + (x as usize))
    }

    #[inline(always)]
    fn pos_index(&self, pos: CellPos) -> Option<usize> {
        self.index(pos.col as i16, pos.row as i16)
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Fill a single cell
    /// Returns false if out of bounds
    pub fn fill(&mut self, x: i16, y: i16, kind: FigureKind) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = Cell::filled_with(kind);
                true
            }
            None => false,
        }
    }

    /// Check whether a shape fits with its origin at (x, y)
    pub fn check_placement(&self, shape: &[Offset], x: i16, y: i16) -> Result<(), RejectReason> {
        for &offset in shape {
            match target(x, y, offset).and_then(|(tx, ty)| self.get(tx, ty)) {
                None => return Err(RejectReason::OutOfBounds),
                Some(cell) if cell.filled => return Err(RejectReason::Occupied),
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Every target cell is on the board and not filled (clearing counts as filled)
    pub fn can_accept(&self, shape: &[Offset], x: i16, y: i16) -> bool {
        self.check_placement(shape, x, y).is_ok()
    }

    /// Whether the shape fits at any origin on the board
    pub fn fits_anywhere(&self, shape: &[Offset]) -> bool {
        (0..self.rows as i16).any(|y| (0..self.cols as i16).any(|x| self.can_accept(shape, x, y)))
    }

    /// Fill every target cell of a shape with `kind`
    /// Returns false, touching nothing, if the shape does not fit
    pub fn commit(&mut self, shape: &[Offset], x: i16, y: i16, kind: FigureKind) -> bool {
        if !self.can_accept(shape, x, y) {
            return false;
        }

        for &offset in shape {
            if let Some((tx, ty)) = target(x, y, offset) {
                self.fill(tx, ty, kind);
            }
        }

        true
    }

    /// Check if a row is completely filled, ignoring rows already clearing
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.rows as usize {
            return false;
        }
        let start = y * self.cols as usize;
        let end = start + self.cols as usize;
        self.cells[start..end].iter().all(Cell::counts_for_line)
    }

    /// Check if a column is completely filled, ignoring columns already clearing
    pub fn is_col_full(&self, x: usize) -> bool {
        if x >= self.cols as usize {
            return false;
        }
        self.cells
            .iter()
            .skip(x)
            .step_by(self.cols as usize)
            .all(Cell::counts_for_line)
    }

    /// Indices of full rows, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.rows as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Indices of full columns, left to right
    pub fn full_cols(&self) -> Vec<usize> {
        (0..self.cols as usize)
            .filter(|&x| self.is_col_full(x))
            .collect()
    }

    /// Flag filled cells as clearing; empty or out-of-range cells are skipped
    pub fn mark_clearing(&mut self, cells: &[CellPos]) {
        for &pos in cells {
            if let Some(idx) = self.pos_index(pos) {
                let cell = &mut self.cells[idx];
                if cell.filled {
                    cell.clearing = true;
                }
            }
        }
    }

    /// Empty the given cells after their clear animation completed
    pub fn finalize(&mut self, cells: &[CellPos]) {
        for &pos in cells {
            if let Some(idx) = self.pos_index(pos) {
                self.cells[idx] = Cell::EMPTY;
            }
        }
    }

    /// Number of filled cells (clearing included)
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.filled).count()
    }

    /// Get a reference to the internal cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows as slices, top to bottom
    pub fn row_slices(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1) as usize)
    }

    /// Copy the grid into a row-of-rows buffer, reusing its allocations
    pub fn write_rows_into(&self, out: &mut Vec<Vec<Cell>>) {
        out.resize_with(self.rows as usize, Vec::new);
        for (dst, src) in out.iter_mut().zip(self.row_slices()) {
            dst.clear();
            dst.extend_from_slice(src);
        }
    }
}

/// Board position of a shape offset placed at (x, y); None when it leaves i16
fn target(x: i16, y: i16, (dx, dy): Offset) -> Option<(i16, i16)> {
    Some((x.checked_add(dx as i16)?, y.checked_add(dy as i16)?))
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_ROWS, crate::types::DEFAULT_COLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR4: [Offset; 4] = [(0, 0), (1, 0), (2, 0), (3, 0)];

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(8, 8);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(7, 0), Some(7));
        assert_eq!(board.index(0, 1), Some(8));
        assert_eq!(board.index(7, 7), Some(63));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(8, 0), None);
        assert_eq!(board.index(0, 8), None);
    }

    #[test]
    fn test_non_square_board_indexing() {
        let board = Board::new(3, 5);
        assert_eq!(board.cells().len(), 15);
        assert_eq!(board.index(4, 2), Some(14));
        assert_eq!(board.index(5, 0), None);
        assert_eq!(board.index(0, 3), None);
    }

    #[test]
    fn test_commit_is_all_or_nothing() {
        let mut board = Board::new(4, 4);
        board.fill(3, 0, FigureKind::Dot);
        let before = board.clone();

        assert!(!board.commit(&BAR4, 0, 0, FigureKind::I));
        assert_eq!(board, before);

        assert!(board.commit(&BAR4, 0, 1, FigureKind::I));
        for x in 0..4 {
            assert_eq!(board.get(x, 1), Some(Cell::filled_with(FigureKind::I)));
        }
    }

    #[test]
    fn test_placement_at_i16_extremes_is_out_of_bounds() {
        let mut board = Board::new(4, 4);
        for (x, y) in [(i16::MAX, 0), (0, i16::MAX), (i16::MIN, 0), (i16::MAX, i16::MIN)] {
            assert_eq!(
                board.check_placement(&BAR4, x, y),
                Err(RejectReason::OutOfBounds)
            );
            assert!(!board.commit(&BAR4, x, y, FigureKind::I));
        }
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_clearing_cells_block_placement() {
        let mut board = Board::new(4, 4);
        board.fill(1, 1, FigureKind::Dot);
        board.mark_clearing(&[CellPos::new(1, 1)]);

        assert_eq!(
            board.check_placement(&[(0, 0)], 1, 1),
            Err(RejectReason::Occupied)
        );
    }

    #[test]
    fn test_full_lines_skip_clearing_cells() {
        let mut board = Board::new(4, 4);
        assert!(board.commit(&BAR4, 0, 2, FigureKind::I));
        assert_eq!(board.full_rows(), vec![2]);
        assert!(board.full_cols().is_empty());

        let row: Vec<CellPos> = (0..4).map(|c| CellPos::new(2, c)).collect();
        board.mark_clearing(&row);
        assert!(board.full_rows().is_empty());
    }

    #[test]
    fn test_fits_anywhere() {
        let mut board = Board::new(2, 4);
        assert!(board.fits_anywhere(&BAR4));
        board.fill(2, 0, FigureKind::Dot);
        assert!(board.fits_anywhere(&BAR4));
        board.fill(1, 1, FigureKind::Dot);
        assert!(!board.fits_anywhere(&BAR4));
        assert!(board.fits_anywhere(&[(0, 0)]));
    }

    #[test]
    fn test_finalize_empties_cells() {
        let mut board = Board::new(2, 2);
        board.fill(0, 0, FigureKind::Square);
        board.mark_clearing(&[CellPos::new(0, 0)]);
        board.finalize(&[CellPos::new(0, 0)]);
        assert_eq!(board.get(0, 0), Some(Cell::EMPTY));
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_write_rows_into_reuses_buffer() {
        let mut board = Board::new(2, 3);
        board.fill(2, 1, FigureKind::T);

        let mut rows = vec![vec![Cell::EMPTY; 7]; 5];
        board.write_rows_into(&mut rows);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec![Cell::EMPTY, Cell::EMPTY, Cell::filled_with(FigureKind::T)]);
    }
}
