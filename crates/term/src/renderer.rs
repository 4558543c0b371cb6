//! Terminal session and frame output.
//!
//! [`TerminalRenderer`] owns the terminal session (raw mode, alternate
//! screen, mouse capture) and writes each frame as the runs of glyphs that
//! differ from the frame it wrote last. Without a previous frame of the same
//! size it clears the screen and rewrites every row.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, GlyphStyle, Rgb};

/// A horizontal span of glyphs on one screen row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.send(|buf| {
            buf.queue(terminal::EnterAlternateScreen)?
                .queue(cursor::Hide)?
                .queue(terminal::DisableLineWrap)?
                .queue(event::EnableMouseCapture)?;
            Ok(())
        })
    }

    pub fn exit(&mut self) -> Result<()> {
        self.send(|buf| {
            buf.queue(event::DisableMouseCapture)?
                .queue(ResetColor)?
                .queue(SetAttribute(Attribute::Reset))?
                .queue(terminal::EnableLineWrap)?
                .queue(cursor::Show)?
                .queue(terminal::LeaveAlternateScreen)?;
            Ok(())
        })?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to rewrite the whole screen (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, then keep it as the base for the next diff.
    ///
    /// On return `fb` holds the previous frame's buffer so the caller can
    /// render the next frame into it without allocating.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let prev = self.last.take().filter(|prev| same_size(prev, fb));
        self.send(|buf| encode_frame(prev.as_ref(), fb, buf))?;

        let mut prev = prev.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn send(&mut self, encode: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> Result<()> {
        self.buf.clear();
        encode(&mut self.buf)?;
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Encode `next` as terminal commands into `out`.
///
/// Only changed runs are written when `prev` has the same size; otherwise
/// the screen is cleared and every row is written.
pub fn encode_frame(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    let mut pen = Pen::default();
    match prev.filter(|prev| same_size(prev, next)) {
        Some(prev) => {
            for run in changed_runs(prev, next) {
                pen.write_run(out, next, run)?;
            }
        }
        None => {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..next.height() {
                let row = Run {
                    x: 0,
                    y,
                    len: next.width(),
                };
                pen.write_run(out, next, row)?;
            }
        }
    }

    out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Runs of glyphs that differ between two frames of the same size,
/// top to bottom and left to right.
pub fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Run> {
    let width = next.width() as usize;
    let mut runs = Vec::new();
    if width == 0 || !same_size(prev, next) {
        return runs;
    }

    let rows = prev.glyphs().chunks(width).zip(next.glyphs().chunks(width));
    for (y, (old, new)) in rows.enumerate() {
        let mut x = 0;
        while x < width {
            if old[x] == new[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < width && old[x] != new[x] {
                x += 1;
            }
            runs.push(Run {
                x: start as u16,
                y: y as u16,
                len: (x - start) as u16,
            });
        }
    }
    runs
}

/// Tracks the active style so attributes are only emitted on change.
#[derive(Default)]
struct Pen {
    style: Option<GlyphStyle>,
}

impl Pen {
    fn write_run(&mut self, out: &mut Vec<u8>, fb: &FrameBuffer, run: Run) -> io::Result<()> {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            let glyph = fb.get(x, run.y).unwrap_or_default();
            if self.style != Some(glyph.style) {
                set_style(out, glyph.style)?;
                self.style = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
        Ok(())
    }
}

fn set_style(out: &mut Vec<u8>, style: GlyphStyle) -> io::Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?
        .queue(SetForegroundColor(color(style.fg)))?
        .queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
