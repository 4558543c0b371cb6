//! Shapes module - figure geometry and the shape catalog
//!
//! Raw shapes are lists of `(dx, dy)` cell offsets in any position. The
//! catalog normalizes each one so its top-left bound sits at `(0, 0)` and
//! computes an anchor `(width / 2, height / 2)` that the tray uses to center
//! a figure on its slot.
//!
//! The catalog is built once at startup and handed to the engine; nothing in
//! here is global.

use arrayvec::ArrayVec;

use crate::error::{GameError, ShapeError};
use crate::types::{FigureKind, Offset, MAX_SHAPE_CELLS};

/// Normalized offsets of one shape
pub type ShapeCells = ArrayVec<Offset, MAX_SHAPE_CELLS>;

/// A normalized shape: offsets start at `(0, 0)`, are unique and non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeDefinition {
    cells: ShapeCells,
    width: u8,
    height: u8,
    anchor: (i8, i8),
}

impl ShapeDefinition {
    pub fn cells(&self) -> &[Offset] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// `(floor(width / 2), floor(height / 2))`
    pub fn anchor(&self) -> (i8, i8) {
        self.anchor
    }

    /// Whether the shape has a cell at `(dx, dy)`
    pub fn contains(&self, dx: i16, dy: i16) -> bool {
        self.cells
            .iter()
            .any(|&(x, y)| x as i16 == dx && y as i16 == dy)
    }
}

/// Normalize raw offsets into a [`ShapeDefinition`].
pub fn normalize(raw: &[Offset]) -> Result<ShapeDefinition, ShapeError> {
    if raw.is_empty() {
        return Err(ShapeError::Empty);
    }
    if raw.len() > MAX_SHAPE_CELLS {
        return Err(ShapeError::TooLarge {
            cells: raw.len(),
            max: MAX_SHAPE_CELLS,
        });
    }

    let min_x = raw.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let max_x = raw.iter().map(|&(x, _)| x).max().unwrap_or(0);
    let min_y = raw.iter().map(|&(_, y)| y).min().unwrap_or(0);
    let max_y = raw.iter().map(|&(_, y)| y).max().unwrap_or(0);

    let width = max_x as i16 - min_x as i16 + 1;
    let height = max_y as i16 - min_y as i16 + 1;
    if width > i8::MAX as i16 || height > i8::MAX as i16 {
        return Err(ShapeError::TooLarge {
            cells: raw.len(),
            max: MAX_SHAPE_CELLS,
        });
    }

    let mut cells = ShapeCells::new();
    for &(x, y) in raw {
        let offset = ((x as i16 - min_x as i16) as i8, (y as i16 - min_y as i16) as i8);
        if cells.contains(&offset) {
            return Err(ShapeError::Duplicate {
                dx: offset.0,
                dy: offset.1,
            });
        }
        cells.push(offset);
    }

    Ok(ShapeDefinition {
        cells,
        width: width as u8,
        height: height as u8,
        anchor: ((width / 2) as i8, (height / 2) as i8),
    })
}

/// Raw offsets of the built-in figures
const STANDARD_SHAPES: [(FigureKind, &[Offset]); 15] = [
    (FigureKind::Dot, &[(0, 0)]),
    (FigureKind::Bar2H, &[(0, 0), (1, 0)]),
    (FigureKind::Bar2V, &[(0, 0), (0, 1)]),
    (FigureKind::Bar3H, &[(0, 0), (1, 0), (2, 0)]),
    (FigureKind::Bar3V, &[(0, 0), (0, 1), (0, 2)]),
    (FigureKind::I, &[(0, 0), (1, 0), (2, 0), (3, 0)]),
    (FigureKind::IV, &[(0, 0), (0, 1), (0, 2), (0, 3)]),
    (FigureKind::Square, &[(0, 0), (1, 0), (0, 1), (1, 1)]),
    (
        FigureKind::BigSquare,
        &[
            (0, 0),
            (1, 0),
            (2, 0),
            (0, 1),
            (1, 1),
            (2, 1),
            (0, 2),
            (1, 2),
            (2, 2),
        ],
    ),
    (FigureKind::Corner, &[(0, 0), (0, 1), (1, 1)]),
    (FigureKind::L, &[(0, 0), (0, 1), (0, 2), (1, 2)]),
    (FigureKind::J, &[(1, 0), (1, 1), (1, 2), (0, 2)]),
    (FigureKind::T, &[(0, 0), (1, 0), (2, 0), (1, 1)]),
    (FigureKind::S, &[(1, 0), (2, 0), (0, 1), (1, 1)]),
    (FigureKind::Z, &[(0, 0), (1, 0), (1, 1), (2, 1)]),
];

/// Immutable set of named, normalized shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeCatalog {
    entries: Vec<(FigureKind, ShapeDefinition)>,
}

impl ShapeCatalog {
    /// Build a catalog from raw shapes.
    ///
    /// Fails on the first entry that cannot be normalized, or when the list
    /// itself is empty. A kind listed twice keeps its first definition for
    /// lookups but still counts twice when drawing at random.
    pub fn new(raw: &[(FigureKind, &[Offset])]) -> Result<Self, GameError> {
        if raw.is_empty() {
            return Err(GameError::InvalidConfig(
                "shape catalog has no entries".to_string(),
            ));
        }

        let mut entries = Vec::with_capacity(raw.len());
        for &(kind, offsets) in raw {
            let shape =
                normalize(offsets).map_err(|reason| GameError::InvalidShape { kind, reason })?;
            entries.push((kind, shape));
        }
        Ok(Self { entries })
    }

    /// The built-in catalog, built through the same checks as [`Self::new`]
    pub fn standard() -> Result<Self, GameError> {
        Self::new(&STANDARD_SHAPES)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, kind: FigureKind) -> Option<&ShapeDefinition> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, shape)| shape)
    }

    /// Entry by catalog position (used for uniform random draws)
    pub fn entry(&self, index: usize) -> Option<(FigureKind, &ShapeDefinition)> {
        self.entries.get(index).map(|(kind, shape)| (*kind, shape))
    }

    pub fn kinds(&self) -> impl Iterator<Item = FigureKind> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }

    /// Largest `(width, height)` over all shapes
    pub fn max_extent(&self) -> (u8, u8) {
        self.entries.iter().fold((0, 0), |(w, h), (_, shape)| {
            (w.max(shape.width), h.max(shape.height))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_shifts_to_origin() {
        let shape = normalize(&[(2, 3), (3, 3), (4, 3), (3, 4)]).unwrap();
        assert_eq!(shape.cells(), &[(0, 0), (1, 0), (2, 0), (1, 1)]);
        assert_eq!(shape.width(), 3);
        assert_eq!(shape.height(), 2);
        assert_eq!(shape.anchor(), (1, 1));
    }

    #[test]
    fn test_normalize_negative_offsets() {
        let shape = normalize(&[(-1, -2), (-1, -1), (0, -1)]).unwrap();
        assert_eq!(shape.cells(), &[(0, 0), (0, 1), (1, 1)]);
        assert_eq!(shape.anchor(), (1, 1));
    }

    #[test]
    fn test_normalize_rejects_empty_and_duplicates() {
        assert_eq!(normalize(&[]), Err(ShapeError::Empty));
        assert_eq!(
            normalize(&[(1, 1), (2, 1), (1, 1)]),
            Err(ShapeError::Duplicate { dx: 0, dy: 0 })
        );
        let ten: Vec<Offset> = (0..10).map(|x| (x, 0)).collect();
        assert_eq!(
            normalize(&ten),
            Err(ShapeError::TooLarge { cells: 10, max: 9 })
        );
    }

    #[test]
    fn test_anchor_of_single_cell_and_bar() {
        let dot = normalize(&[(5, 5)]).unwrap();
        assert_eq!(dot.anchor(), (0, 0));

        let bar = normalize(&[(0, 0), (1, 0), (2, 0), (3, 0)]).unwrap();
        assert_eq!(bar.anchor(), (2, 0));
    }

    #[test]
    fn test_standard_catalog_is_complete() {
        let catalog = ShapeCatalog::standard().unwrap();
        assert_eq!(catalog.len(), STANDARD_SHAPES.len());
        assert_eq!(catalog, ShapeCatalog::new(&STANDARD_SHAPES).unwrap());
        for kind in FigureKind::ALL {
            assert!(catalog.get(kind).is_some(), "missing {kind}");
        }
        assert_eq!(catalog.max_extent(), (4, 4));
        assert_eq!(catalog.get(FigureKind::BigSquare).unwrap().len(), 9);
    }

    #[test]
    fn test_catalog_reports_failing_kind() {
        let err = ShapeCatalog::new(&[(FigureKind::Dot, &[(0, 0)]), (FigureKind::T, &[])])
            .unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidShape {
                kind: FigureKind::T,
                reason: ShapeError::Empty
            }
        );
        assert!(matches!(
            ShapeCatalog::new(&[]),
            Err(GameError::InvalidConfig(_))
        ));
    }
}
