//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The drawn field covers the board plus the tray area below it, which can
//! reach past the board's left and right edges.

use crate::core::{FigureSnapshot, GameSnapshot};
use crate::fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
use crate::types::{CellPos, ClearPhase, FigureKind, TRAY_GAP, TRAY_ROW_OFFSET};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen placement of the board for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Terminal column of board cell (0, 0)
    pub origin_x: u16,
    /// Terminal row of board cell (0, 0)
    pub origin_y: u16,
    pub cell_w: u16,
    pub cell_h: u16,
    /// Board frame including its border
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    /// First column right of the whole field (board plus tray overhang)
    pub field_right: u16,
}

/// Board-space bounds of everything the view draws, exclusive on the max side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldBounds {
    min_x: i16,
    max_x: i16,
    max_y: i16,
}

// Tray figures are shifted by their anchor; the largest catalog shapes are
// 4 cells long, so a figure reaches at most 2 cells left of its slot and 2
// right of it.
const TRAY_REACH: i16 = 2;
const PANEL_W: u16 = 14;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const FIELD_BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the block puzzle.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    pub fn cell_size(&self) -> (u16, u16) {
        (self.cell_w, self.cell_h)
    }

    fn field_bounds(snap: &GameSnapshot) -> FieldBounds {
        let cols = snap.cols as i16;
        let rows = snap.rows as i16;
        let line_width = (snap.tray_size.max(1) as i16 - 1) * TRAY_GAP;
        let offset_x = (cols - line_width).div_euclid(2);

        FieldBounds {
            min_x: (offset_x - TRAY_REACH).min(0),
            max_x: (offset_x + line_width + TRAY_REACH + 1).max(cols),
            max_y: rows + TRAY_ROW_OFFSET + TRAY_REACH + 1,
        }
    }

    /// Where the board lands on screen for this snapshot and viewport.
    ///
    /// The field is centered horizontally when the score panel does not fit
    /// beside it, and centered together with the panel when it does.
    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> BoardLayout {
        let bounds = Self::field_bounds(snap);
        let field_w = (bounds.max_x - bounds.min_x) as u16 * self.cell_w + 2;
        let field_h = bounds.max_y as u16 * self.cell_h + 2;

        let with_panel = field_w + 2 + PANEL_W;
        let total_w = if with_panel <= viewport.width {
            with_panel
        } else {
            field_w
        };
        let field_x = viewport.width.saturating_sub(total_w) / 2;
        let field_y = viewport.height.saturating_sub(field_h) / 2;

        let origin_x = field_x + 1 + (-bounds.min_x) as u16 * self.cell_w;
        let origin_y = field_y + 1;

        BoardLayout {
            origin_x,
            origin_y,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
            frame_x: origin_x - 1,
            frame_y: origin_y - 1,
            frame_w: snap.cols as u16 * self.cell_w + 2,
            frame_h: snap.rows as u16 * self.cell_h + 2,
            field_right: field_x + field_w,
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph {
            ch: ' ',
            style: GlyphStyle::new(Rgb::new(220, 220, 220), FIELD_BG),
        });

        let layout = self.layout(snap, viewport);
        let border = GlyphStyle::new(Rgb::new(200, 200, 200), FIELD_BG);
        self.draw_border(fb, &layout, border);

        for (y, row) in snap.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell.kind {
                    Some(kind) if cell.filled => {
                        let style = GlyphStyle::new(kind_color(kind), BOARD_BG).bold();
                        self.fill_cell(fb, &layout, x as i16, y as i16, '█', style);
                    }
                    _ => {
                        let style = GlyphStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
                        self.fill_cell(fb, &layout, x as i16, y as i16, '·', style);
                    }
                }
            }
        }

        for anim in &snap.animations {
            let (ch, style) = clear_glyph(anim.phase, anim.progress);
            for &CellPos { row, col } in &anim.cells {
                let style = match snap.cell(col as i16, row as i16).and_then(|c| c.kind) {
                    Some(kind) if anim.phase == ClearPhase::Collapse => {
                        GlyphStyle::new(kind_color(kind), BOARD_BG).dim()
                    }
                    _ => style,
                };
                self.fill_cell(fb, &layout, col as i16, row as i16, ch, style);
            }
        }

        // Resting figures first so the dragged one is drawn on top.
        for figure in snap.tray.iter().filter(|f| !f.dragging) {
            self.draw_figure(fb, &layout, snap, figure);
        }
        for figure in snap.tray.iter().filter(|f| f.dragging) {
            self.draw_figure(fb, &layout, snap, figure);
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if snap.game_over {
            self.draw_overlay_text(fb, &layout, 0, "GAME OVER");
            self.draw_overlay_text(fb, &layout, 1, "r: restart");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &BoardLayout, style: GlyphStyle) {
        let (x, y, w, h) = (layout.frame_x, layout.frame_y, layout.frame_w, layout.frame_h);
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_figure(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        snap: &GameSnapshot,
        figure: &FigureSnapshot,
    ) {
        let mut style = GlyphStyle::new(kind_color(figure.kind), FIELD_BG);
        if figure.dragging {
            style = style.bold();
            if !fits(snap, figure) {
                style = style.dim();
            }
        }
        for (x, y) in figure.shape.iter().filter_map(|&offset| figure.cell_at(offset)) {
            let on_board = snap.cell(x, y).is_some();
            let cell_style = if on_board {
                GlyphStyle { bg: BOARD_BG, ..style }
            } else {
                style
            };
            self.fill_cell(fb, layout, x, y, '█', cell_style);
        }
    }

    /// Fill one board-space cell; cells left of or above the screen are skipped.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        x: i16,
        y: i16,
        ch: char,
        style: GlyphStyle,
    ) {
        let px = layout.origin_x as i32 + x as i32 * self.cell_w as i32;
        let py = layout.origin_y as i32 + y as i32 * self.cell_h as i32;
        if px < 0 || py < 0 || px > u16::MAX as i32 || py > u16::MAX as i32 {
            return;
        }
        fb.fill_rect(px as u16, py as u16, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &BoardLayout,
    ) {
        let panel_x = layout.field_right.saturating_add(2);
        if panel_x.saturating_add(PANEL_W) > viewport.width {
            return;
        }

        let label = GlyphStyle::new(Rgb::new(220, 220, 220), FIELD_BG).bold();
        let value = GlyphStyle::new(Rgb::new(200, 200, 200), FIELD_BG);
        let dim = value.dim();

        let mut y = layout.frame_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TRAY", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.tray.len() as u32, value);
        fb.put_char(panel_x + 2, y, '/', dim);
        fb.put_u32(panel_x + 3, y, snap.tray_size as u32, dim);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "KEYS", label);
        for line in ["1-9 pick", "hjkl move", "enter drop", "esc cancel", "r restart", "q quit"] {
            y = y.saturating_add(1);
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: &BoardLayout, line: u16, text: &str) {
        let mid_y = layout.frame_y.saturating_add(layout.frame_h / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = layout
            .frame_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = GlyphStyle::new(Rgb::new(255, 255, 255), FIELD_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Whether a figure could be dropped where it currently is
fn fits(snap: &GameSnapshot, figure: &FigureSnapshot) -> bool {
    figure.shape.iter().all(|&offset| {
        matches!(
            figure.cell_at(offset).and_then(|(x, y)| snap.cell(x, y)),
            Some(cell) if !cell.filled
        )
    })
}

/// Flash is a bright block; collapse shrinks the glyph as progress grows.
fn clear_glyph(phase: ClearPhase, progress: f32) -> (char, GlyphStyle) {
    match phase {
        ClearPhase::Flash => (
            '█',
            GlyphStyle::new(Rgb::new(255, 255, 255), BOARD_BG).bold(),
        ),
        ClearPhase::Collapse => {
            let ch = if progress < 0.6 {
                '▓'
            } else if progress < 0.8 {
                '▒'
            } else {
                '░'
            };
            (ch, GlyphStyle::new(Rgb::new(180, 180, 180), BOARD_BG).dim())
        }
    }
}

fn kind_color(kind: FigureKind) -> Rgb {
    match kind {
        FigureKind::Dot => Rgb::new(230, 230, 230),
        FigureKind::Bar2H | FigureKind::Bar2V => Rgb::new(120, 200, 255),
        FigureKind::Bar3H | FigureKind::Bar3V => Rgb::new(80, 160, 240),
        FigureKind::I | FigureKind::IV => Rgb::new(80, 220, 220),
        FigureKind::Square => Rgb::new(240, 220, 80),
        FigureKind::BigSquare => Rgb::new(240, 170, 60),
        FigureKind::Corner => Rgb::new(160, 230, 120),
        FigureKind::L => Rgb::new(255, 165, 0),
        FigureKind::J => Rgb::new(80, 120, 220),
        FigureKind::T => Rgb::new(200, 120, 220),
        FigureKind::S => Rgb::new(100, 220, 120),
        FigureKind::Z => Rgb::new(220, 80, 80),
    }
}
