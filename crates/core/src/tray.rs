//! Tray module - the figures currently offered to the player
//!
//! Figures are laid out on a row below the board, left to right with a fixed
//! gap, the whole row centered on the board width. Each figure is shifted by
//! its own anchor so it sits centered on its slot.

use serde::Serialize;

use crate::rng::SimpleRng;
use crate::shapes::{ShapeCatalog, ShapeDefinition};
use crate::types::{FigureKind, TRAY_GAP, TRAY_ROW_OFFSET};

/// Stable identifier of a tray figure, unique within one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FigureId(pub u32);

impl std::fmt::Display for FigureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A figure instance in the tray
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    pub id: FigureId,
    pub kind: FigureKind,
    pub shape: ShapeDefinition,
    /// Board-space origin of the shape's offsets
    pub x: i16,
    pub y: i16,
    pub dragging: bool,
    /// Last committed position, restored after an illegal drop
    pub original_x: i16,
    pub original_y: i16,
}

impl Figure {
    pub fn new(id: FigureId, kind: FigureKind, shape: ShapeDefinition, x: i16, y: i16) -> Self {
        Self {
            id,
            kind,
            shape,
            x,
            y,
            dragging: false,
            original_x: x,
            original_y: y,
        }
    }

    pub fn position(&self) -> (i16, i16) {
        (self.x, self.y)
    }

    pub fn original_position(&self) -> (i16, i16) {
        (self.original_x, self.original_y)
    }

    /// Move back to the last committed position and stop dragging
    pub fn restore(&mut self) {
        self.x = self.original_x;
        self.y = self.original_y;
        self.dragging = false;
    }

    /// Whether board cell (x, y) is covered by this figure at its current position
    pub fn covers(&self, x: i16, y: i16) -> bool {
        match (x.checked_sub(self.x), y.checked_sub(self.y)) {
            (Some(dx), Some(dy)) => self.shape.contains(dx, dy),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureTray {
    figures: Vec<Figure>,
    size: usize,
    next_id: u32,
}

impl FigureTray {
    pub fn new(size: usize) -> Self {
        Self {
            figures: Vec::with_capacity(size),
            size,
            next_id: 0,
        }
    }

    /// Number of figures offered by each spawn
    pub fn size(&self) -> usize {
        self.size
    }

    /// Replace the tray contents with `size` figures drawn uniformly at random
    /// (with replacement) from the catalog.
    pub fn spawn(&mut self, catalog: &ShapeCatalog, rng: &mut SimpleRng, rows: u8, cols: u8) {
        self.figures.clear();
        if catalog.is_empty() {
            return;
        }

        let tray_y = rows as i16 + TRAY_ROW_OFFSET;
        let line_width = (self.size as i16 - 1) * TRAY_GAP;
        let offset_x = (cols as i16 - line_width).div_euclid(2);

        for slot in 0..self.size {
            let Some((kind, shape)) = catalog.entry(rng.next_index(catalog.len())) else {
                continue;
            };
            let (ax, ay) = shape.anchor();
            let x = offset_x + slot as i16 * TRAY_GAP - ax as i16;
            let y = tray_y - ay as i16;

            let id = FigureId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            self.figures.push(Figure::new(id, kind, shape.clone(), x, y));
        }
    }

    /// Remove a figure (after it was placed)
    pub fn remove(&mut self, id: FigureId) -> Option<Figure> {
        let idx = self.figures.iter().position(|f| f.id == id)?;
        Some(self.figures.remove(idx))
    }

    pub fn get(&self, id: FigureId) -> Option<&Figure> {
        self.figures.iter().find(|f| f.id == id)
    }

    pub fn get_mut(&mut self, id: FigureId) -> Option<&mut Figure> {
        self.figures.iter_mut().find(|f| f.id == id)
    }

    /// Figure in the given slot, counting only figures still in the tray
    pub fn slot(&self, index: usize) -> Option<&Figure> {
        self.figures.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Figure> {
        self.figures.iter()
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn clear(&mut self) {
        self.figures.clear();
    }
}
