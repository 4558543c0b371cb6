//! Terminal block puzzle runner (default binary).
//!
//! Uses crossterm for keyboard and mouse input and the framebuffer-based
//! renderer from `tui_blocks::term`.
//!
//! Environment:
//! - `BLOCKS_ROWS`, `BLOCKS_COLS`, `BLOCKS_TRAY_SIZE`: board and tray size
//! - `BLOCKS_SEED`: tray seed (clock-derived when unset)
//! - `BLOCKS_LOG_PATH`: write logs to this file instead of stderr
//! - `BLOCKS_SNAPSHOT_LOG`: append a JSON snapshot per state change
//! - `RUST_LOG`: log filter (default `warn`)

use std::fs::File;
use std::io::Write;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, info};

use tui_blocks::core::{GameConfig, GameEngine, GameSnapshot, ShapeCatalog};
use tui_blocks::input::{map_key, should_quit, DragGrip, PointerMap};
use tui_blocks::snapshot_log::SnapshotLog;
use tui_blocks::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blocks::types::{GameIntent, GamePhase, CLEAR_ANIMATION_MS, TICK_MS};

fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::from_env().validate()?;
    let seed = seed_from_env();
    let mut game = GameEngine::new(ShapeCatalog::standard()?, config, seed)?;
    game.start();

    let mut snapshot_log = SnapshotLog::from_env()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, snapshot_log.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Some(log) = snapshot_log.as_mut() {
        log.flush()?;
        info!("snapshot log: {} entries", log.lines());
    }
    info!("final score {}", game.score());
    result
}

fn init_logging() -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Ok(path) = std::env::var("BLOCKS_LOG_PATH") {
        let path = path.trim();
        if !path.is_empty() {
            let file = File::create(path).with_context(|| format!("log file {path}"))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }

    builder.init();
    Ok(())
}

fn seed_from_env() -> u32 {
    std::env::var("BLOCKS_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
}

fn run<W: Write>(
    term: &mut TerminalRenderer,
    game: &mut GameEngine,
    mut snapshot_log: Option<&mut SnapshotLog<W>>,
) -> Result<()> {
    let view = GameView::default();
    let (cell_w, cell_h) = view.cell_size();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut grip = DragGrip::new();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let tick_amount = TICK_MS as f32 / CLEAR_ANIMATION_MS as f32;
    let mut last_tick = Instant::now();
    let mut changed = true;

    loop {
        game.snapshot_into(&mut snap);
        if changed {
            if let Some(log) = snapshot_log.as_deref_mut() {
                log.append(&snap)?;
            }
            changed = false;
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        view.render_into(&snap, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        let layout = view.layout(&snap, viewport);
        let pointer = PointerMap::new(
            layout.origin_x as i32,
            layout.origin_y as i32,
            cell_w,
            cell_h,
        );

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(intent) = map_key(key) {
                        changed |= apply_intent(game, intent)?;
                    }
                }
                Event::Mouse(mouse) => {
                    changed |= handle_mouse(game, &snap, &pointer, &mut grip, mouse)?;
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if !game.animations().is_empty() {
                game.tick(tick_amount)?;
                changed = true;
            }
        }
    }
}

/// Forward one keyboard intent; returns whether the game state changed
fn apply_intent(game: &mut GameEngine, intent: GameIntent) -> Result<bool> {
    if intent == GameIntent::Restart {
        game.restart()?;
        return Ok(true);
    }
    if game.phase() != GamePhase::Playing {
        return Ok(false);
    }

    let changed = match intent {
        GameIntent::PickSlot(slot) => game.pick_slot(slot)?.is_some(),
        GameIntent::Nudge(dx, dy) => game.drag_by(dx, dy),
        GameIntent::Release => match game.release()? {
            Some(placement) => {
                debug!("keyboard drop: {placement:?}");
                true
            }
            None => false,
        },
        GameIntent::Cancel => game.cancel_drag(),
        GameIntent::Restart => false,
    };
    Ok(changed)
}

/// Left-button drag and drop; returns whether the game state changed
fn handle_mouse(
    game: &mut GameEngine,
    snap: &GameSnapshot,
    pointer: &PointerMap,
    grip: &mut DragGrip,
    mouse: MouseEvent,
) -> Result<bool> {
    let (x, y) = pointer.to_cell(mouse.column, mouse.row);
    let playing = game.phase() == GamePhase::Playing;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if playing => match grip.grab(snap, x, y) {
            Some(id) => game.pick_up(id).map_err(Into::into),
            None => Ok(false),
        },
        MouseEventKind::Drag(MouseButton::Left) => match grip.target(x, y) {
            Some((tx, ty)) => Ok(game.drag_to(tx, ty)),
            None => Ok(false),
        },
        MouseEventKind::Up(MouseButton::Left) => {
            if grip.release().is_none() || !playing {
                return Ok(false);
            }
            match game.release()? {
                Some(placement) => {
                    debug!("mouse drop at ({x}, {y}): {placement:?}");
                    Ok(true)
                }
                None => Ok(false),
            }
        }
        _ => Ok(false),
    }
}
