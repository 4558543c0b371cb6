//! Board tests - placement, line detection and clearing

use tui_blocks::core::{Board, Cell, RejectReason};
use tui_blocks::types::{CellPos, FigureKind, Offset, DEFAULT_COLS, DEFAULT_ROWS};

const L_SHAPE: [Offset; 4] = [(0, 0), (0, 1), (0, 2), (1, 2)];

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.rows(), DEFAULT_ROWS);
    assert_eq!(board.cols(), DEFAULT_COLS);

    for y in 0..DEFAULT_ROWS as i16 {
        for x in 0..DEFAULT_COLS as i16 {
            assert_eq!(board.get(x, y), Some(Cell::EMPTY), "cell ({x}, {y})");
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(5, 7);

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(7, 0), None);
    assert_eq!(board.get(0, 5), None);
    assert!(board.get(6, 4).is_some());
}

#[test]
fn test_check_placement_reports_reason() {
    let mut board = Board::new(4, 4);
    board.fill(1, 2, FigureKind::Dot);

    assert_eq!(board.check_placement(&L_SHAPE, 0, 0), Ok(()));
    assert_eq!(
        board.check_placement(&L_SHAPE, 1, 0),
        Err(RejectReason::Occupied)
    );
    assert_eq!(
        board.check_placement(&L_SHAPE, 3, 0),
        Err(RejectReason::OutOfBounds)
    );
    assert_eq!(
        board.check_placement(&L_SHAPE, 0, 2),
        Err(RejectReason::OutOfBounds)
    );
}

#[test]
fn test_commit_sets_kind_on_every_target() {
    let mut board = Board::new(4, 4);
    assert!(board.commit(&L_SHAPE, 2, 1, FigureKind::L));

    for (dx, dy) in L_SHAPE {
        let cell = board.get(2 + dx as i16, 1 + dy as i16).unwrap();
        assert!(cell.filled);
        assert_eq!(cell.kind, Some(FigureKind::L));
        assert!(!cell.clearing);
    }
    assert_eq!(board.filled_count(), 4);
}

#[test]
fn test_row_and_column_detection() {
    let mut board = Board::new(3, 3);
    for x in 0..3 {
        board.fill(x, 1, FigureKind::Dot);
    }
    for y in 0..3 {
        board.fill(2, y, FigureKind::Dot);
    }

    assert_eq!(board.full_rows(), vec![1]);
    assert_eq!(board.full_cols(), vec![2]);
    assert!(board.is_row_full(1));
    assert!(!board.is_row_full(0));
    assert!(!board.is_row_full(3));
    assert!(!board.is_col_full(9));
}

#[test]
fn test_clearing_cells_stay_filled_until_finalized() {
    let mut board = Board::new(2, 2);
    board.fill(0, 0, FigureKind::Square);
    board.fill(1, 0, FigureKind::Square);

    let row = [CellPos::new(0, 0), CellPos::new(0, 1)];
    board.mark_clearing(&row);
    let cell = board.get(0, 0).unwrap();
    assert!(cell.filled && cell.clearing);
    assert!(!board.can_accept(&[(0, 0)], 0, 0));

    board.finalize(&row);
    assert_eq!(board.filled_count(), 0);
    assert!(board.can_accept(&[(0, 0), (1, 0)], 0, 0));
}

#[test]
fn test_mark_clearing_skips_empty_cells() {
    let mut board = Board::new(2, 2);
    board.mark_clearing(&[CellPos::new(1, 1)]);
    assert_eq!(board.get(1, 1), Some(Cell::EMPTY));
}

#[test]
fn test_reset_changes_dimensions() {
    let mut board = Board::new(4, 4);
    board.fill(3, 3, FigureKind::T);
    board.reset(2, 6);

    assert_eq!((board.rows(), board.cols()), (2, 6));
    assert_eq!(board.cells().len(), 12);
    assert_eq!(board.filled_count(), 0);
    assert_eq!(board.row_slices().count(), 2);
}
