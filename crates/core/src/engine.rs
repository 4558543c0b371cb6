//! Game engine - owns and sequences the complete game state
//!
//! This module ties together the board, the figure tray, clear animations and
//! scoring. All mutation goes through [`GameEngine::try_place`] (directly or
//! via the drag session), [`GameEngine::tick`] and [`GameEngine::reset`].
//!
//! Within one placement the order is fixed: commit to the board, evaluate
//! lines, refill the tray if it ran empty, then evaluate game over. Game over
//! depends on the refilled tray, so this order must not change.

use std::collections::BTreeSet;

use log::{debug, info, warn};

use crate::animation::ClearAnimation;
use crate::board::{Board, RejectReason};
use crate::config::{validate_dims, GameConfig};
use crate::error::GameError;
use crate::rng::SimpleRng;
use crate::scoring::calculate_line_score;
use crate::shapes::ShapeCatalog;
use crate::snapshot::{AnimationSnapshot, FigureSnapshot, GameSnapshot};
use crate::tray::{Figure, FigureId, FigureTray};
use crate::types::{CellPos, GamePhase};

/// Outcome of a placement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Committed {
        /// Points gained by this placement
        score_delta: u32,
        /// Rows plus columns that became full
        lines_cleared: u32,
        game_over: bool,
    },
    /// Nothing changed except that the figure went back to its original position
    Rejected(RejectReason),
}

impl Placement {
    pub fn is_committed(&self) -> bool {
        matches!(self, Placement::Committed { .. })
    }
}

/// One detected line clear event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
    /// Distinct cells scheduled for removal
    pub cells: usize,
    pub points: u32,
}

impl LineClear {
    pub fn lines(&self) -> u32 {
        (self.rows.len() + self.cols.len()) as u32
    }
}

/// Complete game state and the operations that advance it
#[derive(Debug, Clone)]
pub struct GameEngine {
    catalog: ShapeCatalog,
    config: GameConfig,
    board: Board,
    tray: FigureTray,
    animations: Vec<ClearAnimation>,
    rng: SimpleRng,
    seed: u32,
    score: u32,
    phase: GamePhase,
    /// Figure currently being dragged, if any
    held: Option<FigureId>,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
}

impl GameEngine {
    /// Create an engine; call [`GameEngine::start`] to deal the first tray.
    pub fn new(catalog: ShapeCatalog, config: GameConfig, seed: u32) -> Result<Self, GameError> {
        let config = config.validate()?;
        ensure_catalog_fits(&catalog, config.rows, config.cols)?;

        Ok(Self {
            board: Board::new(config.rows, config.cols),
            tray: FigureTray::new(config.tray_size),
            animations: Vec::new(),
            rng: SimpleRng::new(seed),
            seed,
            score: 0,
            phase: GamePhase::NotStarted,
            held: None,
            episode_id: 0,
            catalog,
            config,
        })
    }

    /// Deal the first tray and start playing
    pub fn start(&mut self) {
        if self.phase != GamePhase::NotStarted {
            return;
        }
        self.spawn_tray();
        self.phase = GamePhase::Playing;
        info!(
            "game started: {}x{} board, tray of {}, seed {}",
            self.config.rows, self.config.cols, self.config.tray_size, self.seed
        );
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tray(&self) -> &FigureTray {
        &self.tray
    }

    pub fn animations(&self) -> &[ClearAnimation] {
        &self.animations
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn held(&self) -> Option<&Figure> {
        self.held.and_then(|id| self.tray.get(id))
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn tray_mut(&mut self) -> &mut FigureTray {
        &mut self.tray
    }

    /// Try to place a tray figure with its origin at board cell (x, y)
    pub fn try_place(&mut self, id: FigureId, x: i16, y: i16) -> Result<Placement, GameError> {
        self.ensure_playing("try_place")?;

        let Some(figure) = self.tray.get(id) else {
            return Ok(Placement::Rejected(RejectReason::UnknownFigure));
        };

        if let Err(reason) = self.board.check_placement(figure.shape.cells(), x, y) {
            if let Some(figure) = self.tray.get_mut(id) {
                figure.restore();
            }
            if self.held == Some(id) {
                self.held = None;
            }
            debug!("placement of {id} at ({x}, {y}) rejected: {}", reason.code());
            return Ok(Placement::Rejected(reason));
        }

        let Some(figure) = self.tray.remove(id) else {
            return Ok(Placement::Rejected(RejectReason::UnknownFigure));
        };
        if self.held == Some(id) {
            self.held = None;
        }

        let committed = self.board.commit(figure.shape.cells(), x, y, figure.kind);
        debug_assert!(committed, "commit must succeed after a passing check");

        let score_before = self.score;
        let lines_cleared = self.evaluate_lines().map_or(0, |clear| clear.lines());

        if self.tray.is_empty() {
            self.spawn_tray();
        }

        let game_over = self.evaluate_game_over();

        Ok(Placement::Committed {
            score_delta: self.score - score_before,
            lines_cleared,
            game_over,
        })
    }

    /// Detect full rows/columns and schedule them for clearing.
    ///
    /// All full lines found together become one clear event over the union of
    /// their cells. Rows and columns score separately even where they cross.
    /// Lines already clearing are not counted again.
    pub fn evaluate_lines(&mut self) -> Option<LineClear> {
        let rows = self.board.full_rows();
        let cols = self.board.full_cols();
        if rows.is_empty() && cols.is_empty() {
            return None;
        }

        let mut union = BTreeSet::new();
        for &y in &rows {
            for x in 0..self.board.cols() {
                union.insert(CellPos::new(y as u8, x));
            }
        }
        for &x in &cols {
            for y in 0..self.board.rows() {
                union.insert(CellPos::new(y, x as u8));
            }
        }
        let cells: Vec<CellPos> = union.into_iter().collect();

        self.board.mark_clearing(&cells);
        let score = calculate_line_score(rows.len(), cols.len());
        self.score = self.score.saturating_add(score.total);

        debug!(
            "line clear: rows {:?}, cols {:?}, {} cells, +{} points",
            rows,
            cols,
            cells.len(),
            score.total
        );

        let clear = LineClear {
            rows,
            cols,
            cells: cells.len(),
            points: score.total,
        };
        self.animations.push(ClearAnimation::new(cells));
        Some(clear)
    }

    /// Advance every clear animation by `amount` of progress.
    ///
    /// Finished animations empty their cells and are dropped. Returns how many
    /// finished on this tick. Allowed after game over so a pending clear can
    /// still play out.
    pub fn tick(&mut self, amount: f32) -> Result<usize, GameError> {
        if self.phase == GamePhase::NotStarted {
            return Err(self.illegal("tick"));
        }

        let board = &mut self.board;
        let mut finished = 0;
        self.animations.retain_mut(|anim| {
            if anim.advance(amount) {
                board.finalize(anim.cells());
                finished += 1;
                false
            } else {
                true
            }
        });

        if finished > 0 {
            debug!(
                "{finished} clear animation(s) finalized, {} active",
                self.animations.len()
            );
        }
        Ok(finished)
    }

    /// Whether at least one tray figure fits somewhere on the board
    pub fn can_place_any(&self) -> bool {
        self.tray
            .iter()
            .any(|figure| self.board.fits_anywhere(figure.shape.cells()))
    }

    /// Enter game over when no tray figure fits anywhere.
    ///
    /// Clearing cells count as occupied here, exactly as for placement.
    pub fn evaluate_game_over(&mut self) -> bool {
        let over = !self.can_place_any();
        if over && self.phase == GamePhase::Playing {
            if let Some(id) = self.held.take() {
                if let Some(figure) = self.tray.get_mut(id) {
                    figure.restore();
                }
            }
            self.phase = GamePhase::GameOver;
            info!(
                "game over: score {}, {} cells filled",
                self.score,
                self.board.filled_count()
            );
        }
        over
    }

    /// Start a new game on a fresh `rows x cols` board
    pub fn reset(&mut self, rows: u8, cols: u8) -> Result<(), GameError> {
        validate_dims(rows, cols)?;
        ensure_catalog_fits(&self.catalog, rows, cols)?;

        self.config.rows = rows;
        self.config.cols = cols;
        self.board.reset(rows, cols);
        self.animations.clear();
        self.tray.clear();
        self.held = None;
        self.score = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.spawn_tray();
        self.phase = GamePhase::Playing;

        info!("game reset: {rows}x{cols} board, episode {}", self.episode_id);
        Ok(())
    }

    /// Reset with the current board dimensions
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.reset(self.config.rows, self.config.cols)
    }

    /// Pick up a tray figure and remember where it came from.
    ///
    /// A figure held before is put back first. Picking the held figure again
    /// keeps its home position. Returns false when the id is not in the tray.
    pub fn pick_up(&mut self, id: FigureId) -> Result<bool, GameError> {
        self.ensure_playing("pick_up")?;
        if self.tray.get(id).is_none() {
            return Ok(false);
        }
        if self.held == Some(id) {
            return Ok(true);
        }

        if let Some(prev) = self.held.take() {
            if let Some(figure) = self.tray.get_mut(prev) {
                figure.restore();
            }
        }

        if let Some(figure) = self.tray.get_mut(id) {
            figure.dragging = true;
            figure.original_x = figure.x;
            figure.original_y = figure.y;
        }
        self.held = Some(id);
        Ok(true)
    }

    /// Pick up the figure in a tray slot
    pub fn pick_slot(&mut self, slot: usize) -> Result<Option<FigureId>, GameError> {
        self.ensure_playing("pick_up")?;
        let Some(id) = self.tray.slot(slot).map(|f| f.id) else {
            return Ok(None);
        };
        self.pick_up(id)?;
        Ok(Some(id))
    }

    /// Move the held figure; the board is not touched
    pub fn drag_to(&mut self, x: i16, y: i16) -> bool {
        let Some(id) = self.held else {
            return false;
        };
        match self.tray.get_mut(id) {
            Some(figure) => {
                figure.x = x;
                figure.y = y;
                true
            }
            None => false,
        }
    }

    /// Move the held figure by a cell delta
    pub fn drag_by(&mut self, dx: i16, dy: i16) -> bool {
        let Some((x, y)) = self.held().map(Figure::position) else {
            return false;
        };
        self.drag_to(x.saturating_add(dx), y.saturating_add(dy))
    }

    /// Drop the held figure at its current position
    ///
    /// `Ok(None)` when nothing is held.
    pub fn release(&mut self) -> Result<Option<Placement>, GameError> {
        self.ensure_playing("release")?;
        let Some(id) = self.held.take() else {
            return Ok(None);
        };
        let Some((x, y)) = self.tray.get_mut(id).map(|figure| {
            figure.dragging = false;
            figure.position()
        }) else {
            return Ok(None);
        };
        self.try_place(id, x, y).map(Some)
    }

    /// Put the held figure back without attempting a placement
    pub fn cancel_drag(&mut self) -> bool {
        let Some(id) = self.held.take() else {
            return false;
        };
        match self.tray.get_mut(id) {
            Some(figure) => {
                figure.restore();
                true
            }
            None => false,
        }
    }

    /// Write the current state into `out`, reusing its allocations
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows = self.board.rows();
        out.cols = self.board.cols();
        self.board.write_rows_into(&mut out.cells);
        out.tray.clear();
        out.tray.extend(self.tray.iter().map(FigureSnapshot::from));
        out.tray_size = self.tray.size();
        out.animations.clear();
        out.animations
            .extend(self.animations.iter().map(AnimationSnapshot::from));
        out.score = self.score;
        out.game_over = self.is_game_over();
        out.phase = self.phase;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn spawn_tray(&mut self) {
        self.tray.spawn(
            &self.catalog,
            &mut self.rng,
            self.board.rows(),
            self.board.cols(),
        );
        debug!(
            "tray refilled: {:?}",
            self.tray.iter().map(|f| f.kind).collect::<Vec<_>>()
        );
    }

    fn ensure_playing(&self, op: &'static str) -> Result<(), GameError> {
        if self.phase == GamePhase::Playing {
            Ok(())
        } else {
            Err(self.illegal(op))
        }
    }

    fn illegal(&self, op: &'static str) -> GameError {
        warn!("illegal operation `{op}` while {}", self.phase);
        GameError::IllegalOperation {
            op,
            phase: self.phase,
        }
    }
}

/// Every catalog shape must fit on an empty board, or a fresh game could
/// start out lost.
fn ensure_catalog_fits(catalog: &ShapeCatalog, rows: u8, cols: u8) -> Result<(), GameError> {
    let (width, height) = catalog.max_extent();
    if width > cols || height > rows {
        return Err(GameError::InvalidConfig(format!(
            "catalog needs at least a {height}x{width} board, got {rows}x{cols}"
        )));
    }
    Ok(())
}
