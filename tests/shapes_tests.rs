//! Shape catalog tests

use tui_blocks::core::{normalize, GameError, ShapeCatalog, ShapeError};
use tui_blocks::types::{FigureKind, Offset, MAX_SHAPE_CELLS};

#[test]
fn test_standard_catalog_has_every_kind() {
    let catalog = ShapeCatalog::standard().unwrap();
    assert_eq!(catalog.len(), FigureKind::ALL.len());
    for kind in FigureKind::ALL {
        let shape = catalog.get(kind).unwrap();
        assert!(!shape.is_empty(), "{kind} has no cells");
        assert!(shape.len() <= MAX_SHAPE_CELLS);
    }
}

#[test]
fn test_standard_shapes_are_normalized() {
    let catalog = ShapeCatalog::standard().unwrap();
    for kind in catalog.kinds() {
        let shape = catalog.get(kind).unwrap();
        let min_x = shape.cells().iter().map(|&(x, _)| x).min().unwrap();
        let min_y = shape.cells().iter().map(|&(_, y)| y).min().unwrap();
        assert_eq!((min_x, min_y), (0, 0), "{kind}");

        let (ax, ay) = shape.anchor();
        assert_eq!(ax as u8, shape.width() / 2, "{kind}");
        assert_eq!(ay as u8, shape.height() / 2, "{kind}");
    }
}

#[test]
fn test_normalize_translates_negative_offsets() {
    let shape = normalize(&[(-1, -1), (0, -1), (-1, 0)]).unwrap();
    assert_eq!(shape.cells(), &[(0, 0), (1, 0), (0, 1)]);
    assert_eq!((shape.width(), shape.height()), (2, 2));
    assert_eq!(shape.anchor(), (1, 1));
}

#[test]
fn test_normalize_is_deterministic() {
    let raw: &[Offset] = &[(3, 5), (4, 5), (5, 5), (4, 6)];
    assert_eq!(normalize(raw), normalize(raw));
}

#[test]
fn test_invalid_shapes() {
    assert_eq!(normalize(&[]), Err(ShapeError::Empty));
    assert_eq!(
        normalize(&[(0, 0), (0, 0)]),
        Err(ShapeError::Duplicate { dx: 0, dy: 0 })
    );

    let empty: &[Offset] = &[];
    let err = ShapeCatalog::new(&[(FigureKind::Dot, empty)]).unwrap_err();
    assert!(matches!(
        err,
        GameError::InvalidShape {
            kind: FigureKind::Dot,
            reason: ShapeError::Empty
        }
    ));
    assert_eq!(err.code(), "invalid_shape");
}

#[test]
fn test_max_extent() {
    assert_eq!(ShapeCatalog::standard().unwrap().max_extent(), (4, 4));

    let bar: &[Offset] = &[(0, 0), (1, 0)];
    let catalog = ShapeCatalog::new(&[(FigureKind::Bar2H, bar)]).unwrap();
    assert_eq!(catalog.max_extent(), (2, 1));
}
