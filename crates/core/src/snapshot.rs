use serde::Serialize;

use crate::animation::ClearAnimation;
use crate::board::Cell;
use crate::tray::{Figure, FigureId};
use crate::types::{CellPos, ClearPhase, FigureKind, GamePhase, Offset};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FigureSnapshot {
    pub id: FigureId,
    pub kind: FigureKind,
    pub shape: Vec<Offset>,
    pub x: i16,
    pub y: i16,
    pub dragging: bool,
}

impl FigureSnapshot {
    /// Board position of one shape offset; None when it leaves i16
    pub fn cell_at(&self, (dx, dy): Offset) -> Option<(i16, i16)> {
        Some((self.x.checked_add(dx as i16)?, self.y.checked_add(dy as i16)?))
    }

    /// Whether board cell (x, y) is covered by this figure
    pub fn covers(&self, x: i16, y: i16) -> bool {
        self.shape
            .iter()
            .any(|&offset| self.cell_at(offset) == Some((x, y)))
    }
}

impl From<&Figure> for FigureSnapshot {
    fn from(value: &Figure) -> Self {
        Self {
            id: value.id,
            kind: value.kind,
            shape: value.shape.cells().to_vec(),
            x: value.x,
            y: value.y,
            dragging: value.dragging,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationSnapshot {
    pub cells: Vec<CellPos>,
    pub progress: f32,
    pub phase: ClearPhase,
}

impl From<&ClearAnimation> for AnimationSnapshot {
    fn from(value: &ClearAnimation) -> Self {
        Self {
            cells: value.cells().to_vec(),
            progress: value.progress(),
            phase: value.phase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub rows: u8,
    pub cols: u8,
    /// Grid rows, top to bottom
    pub cells: Vec<Vec<Cell>>,
    pub tray: Vec<FigureSnapshot>,
    /// Figures dealt per refill
    pub tray_size: usize,
    pub animations: Vec<AnimationSnapshot>,
    pub score: u32,
    pub game_over: bool,
    pub phase: GamePhase,
    pub episode_id: u32,
}

impl GameSnapshot {
    /// Cell at board position (x, y)
    pub fn cell(&self, x: i16, y: i16) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells.get(y as usize)?.get(x as usize).copied()
    }

    /// Phase of the clear animation covering (x, y), if any
    pub fn clear_phase_at(&self, x: i16, y: i16) -> Option<ClearPhase> {
        if x < 0 || y < 0 || x >= self.cols as i16 || y >= self.rows as i16 {
            return None;
        }
        let pos = CellPos::new(y as u8, x as u8);
        self.animations
            .iter()
            .find(|anim| anim.cells.contains(&pos))
            .map(|anim| anim.phase)
    }

    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            cells: Vec::new(),
            tray: Vec::new(),
            tray_size: 0,
            animations: Vec::new(),
            score: 0,
            game_over: false,
            phase: GamePhase::NotStarted,
            episode_id: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RejectReason;

    #[test]
    fn figure_snapshot_covers_offsets() {
        let fig = FigureSnapshot {
            id: FigureId(3),
            kind: FigureKind::Corner,
            shape: vec![(0, 0), (0, 1), (1, 1)],
            x: 2,
            y: -1,
            dragging: true,
        };
        assert!(fig.covers(2, -1));
        assert!(fig.covers(3, 0));
        assert!(!fig.covers(3, -1));
    }

    #[test]
    fn figure_snapshot_at_i16_edges_covers_nothing_past_them() {
        let fig = FigureSnapshot {
            id: FigureId(4),
            kind: FigureKind::Bar2H,
            shape: vec![(0, 0), (1, 0)],
            x: i16::MAX,
            y: i16::MIN,
            dragging: true,
        };
        assert_eq!(fig.cell_at((0, 0)), Some((i16::MAX, i16::MIN)));
        assert_eq!(fig.cell_at((1, 0)), None);
        assert!(fig.covers(i16::MAX, i16::MIN));
        assert!(!fig.covers(i16::MIN, i16::MIN));
    }

    #[test]
    fn clear_phase_lookup_is_bounds_checked() {
        let snap = GameSnapshot {
            rows: 1,
            cols: 2,
            cells: vec![vec![Cell::EMPTY; 2]],
            animations: vec![AnimationSnapshot {
                cells: vec![CellPos::new(0, 0)],
                progress: 0.1,
                phase: ClearPhase::Flash,
            }],
            ..GameSnapshot::default()
        };
        assert_eq!(snap.clear_phase_at(0, 0), Some(ClearPhase::Flash));
        assert_eq!(snap.clear_phase_at(256, 0), None);
        assert_eq!(snap.clear_phase_at(0, 256), None);
        assert_eq!(snap.clear_phase_at(1, 0), None);
    }

    #[test]
    fn cell_lookup_is_bounds_checked() {
        let snap = GameSnapshot {
            rows: 1,
            cols: 2,
            cells: vec![vec![Cell::EMPTY, Cell::filled_with(FigureKind::T)]],
            ..GameSnapshot::default()
        };
        assert_eq!(snap.cell(1, 0), Some(Cell::filled_with(FigureKind::T)));
        assert_eq!(snap.cell(2, 0), None);
        assert_eq!(snap.cell(-1, 0), None);
        assert!(!snap.playable());
    }

    #[test]
    fn wire_names_are_snake_case() {
        let json = serde_json::to_string(&FigureSnapshot {
            id: FigureId(1),
            kind: FigureKind::BigSquare,
            shape: vec![(0, 0)],
            x: 0,
            y: 0,
            dragging: false,
        })
        .unwrap();
        assert!(json.contains(r#""kind":"big_square""#));
        assert!(json.contains(r#""id":1"#));
        assert_eq!(
            serde_json::to_string(&RejectReason::OutOfBounds).unwrap(),
            r#""out_of_bounds""#
        );
        assert_eq!(
            serde_json::to_string(&GamePhase::GameOver).unwrap(),
            r#""game_over""#
        );
    }
}
