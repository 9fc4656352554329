//! BoardView: maps a [`Game`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! World space on screen: one world unit is one column wide and one pixel
//! (half a row) tall, so the board pixel grid and world space line up 1:1.

use crate::engine::{Game, GameStatus};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::picture;
use crate::types::{Coordinate, PuzzleMode, Rect, SessionPhase, Vec2};

/// Rows reserved above the board for the status line.
pub const HUD_ROWS: u16 = 1;

const BACKGROUND: Rgb = Rgb::new(18, 18, 24);
const SLOT: Rgb = Rgb::new(34, 34, 44);
const ACTIVE_EDGE: Rgb = Rgb::new(250, 220, 90);
const HUD: CellStyle = CellStyle::new(Rgb::new(210, 210, 220), Rgb::new(40, 40, 56));
const HUD_DONE: CellStyle = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(120, 200, 120)).bold();

/// Board area of the terminal, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whole terminal below the HUD.
    pub fn for_terminal(columns: u16, rows: u16) -> Self {
        Self::new(0, HUD_ROWS, columns, rows.saturating_sub(HUD_ROWS))
    }

    /// World rectangle covered by the board.
    pub fn board_bounds(&self) -> Rect {
        let w = self.width as f32;
        let h = self.height as f32 * 2.0;
        Rect::from_center_size(Vec2::new(w * 0.5, h * 0.5), Vec2::new(w, h))
    }

    /// World position at the centre of a terminal cell.
    pub fn screen_to_world(&self, column: u16, row: u16) -> Vec2 {
        Vec2::new(
            column as f32 - self.x as f32 + 0.5,
            (row as f32 - self.y as f32) * 2.0 + 1.0,
        )
    }

    /// Terminal cell showing a world position, if it is on the board.
    pub fn world_to_screen(&self, world: Vec2) -> Option<(u16, u16)> {
        if world.x < 0.0 || world.y < 0.0 {
            return None;
        }
        let column = world.x as u32;
        let row = world.y as u32 / 2;
        if column >= self.width as u32 || row >= self.height as u32 {
            return None;
        }
        Some((self.x + column as u16, self.y + row as u16))
    }

    fn pixel_width(&self) -> u32 {
        self.width as u32
    }

    fn pixel_height(&self) -> u32 {
        self.height as u32 * 2
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BoardView;

impl BoardView {
    pub fn new() -> Self {
        Self
    }

    /// Render into an existing framebuffer sized to cover the viewport.
    pub fn render_into(&self, game: &Game, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.x + viewport.width, viewport.y + viewport.height);
        fb.clear(CellStyle::new(BACKGROUND, BACKGROUND).into_cell(' '));

        self.draw_hud(fb, game, viewport);

        let session = game.session();
        let (Some(metrics), Some(config)) = (session.metrics(), session.configuration()) else {
            return;
        };
        let Some(image) = config.image else {
            return;
        };

        // Empty slots under the tiles.
        let slot_size = metrics.tile_world_size();
        for row in 0..config.rows {
            for column in 0..config.columns {
                let center = metrics.world_position(Coordinate::new(column, row));
                let rect = Rect::from_center_size(center, slot_size);
                paint_rect(fb, viewport, rect, |_, _, _| SLOT);
            }
        }

        // Painter's order: lowest draw order first, slot order breaks ties.
        let mut tiles: Vec<_> = session.tiles().iter().filter(|t| t.is_active()).collect();
        tiles.sort_by_key(|t| t.visual().draw_order());

        let active = game.active_tile();
        for tile in tiles {
            let visual = tile.visual();
            let Some(sprite) = visual.sprite() else {
                continue;
            };
            let center = metrics.to_world(visual.local_position());
            let size = visual.size() * (visual.emphasis() * metrics.scale);
            let rect = Rect::from_center_size(center, size);
            let raised = active == Some(tile.id());

            paint_rect(fb, viewport, rect, |u, v, edge| {
                let px = sprite.x as f32 + u * sprite.width as f32;
                let py = sprite.y as f32 + v * sprite.height as f32;
                let color = picture::sample(&image, px, py);
                match (edge, raised) {
                    (true, true) => ACTIVE_EDGE,
                    (true, false) => color.scale(0.55),
                    (false, _) => color,
                }
            });
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, game: &Game, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.x + viewport.width, viewport.y + viewport.height);
        self.render_into(game, viewport, &mut fb);
        fb
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, game: &Game, viewport: Viewport) {
        if viewport.y == 0 {
            return;
        }
        let row = viewport.y - 1;
        let text = hud_text(game);
        let style = if game.status() == GameStatus::LevelComplete {
            HUD_DONE
        } else {
            HUD
        };
        fb.fill_row(row, style);
        fb.put_str(0, row, &text, style);
    }
}

/// Status line: level, mode, phase and key hints.
pub fn hud_text(game: &Game) -> String {
    let levels = game.levels();
    if game.status() == GameStatus::Idle && game.session().configuration().is_none() {
        return " No levels loaded   [q] quit".to_string();
    }
    let level = format!(" Level {}/{}", levels.level_index() + 1, levels.level_count());
    if game.status() == GameStatus::LevelComplete {
        return format!("{level}  Solved!   [n] next level  [r] play again  [q] quit");
    }
    let mode = match game.mode() {
        PuzzleMode::DragAndDrop => "drag a tile onto another",
        PuzzleMode::ClickAndSwap => "click two tiles to swap",
    };
    let phase = match game.session().phase() {
        SessionPhase::Idle => "waiting",
        SessionPhase::SettingUp => "dealing",
        SessionPhase::Shuffling => "shuffling",
        SessionPhase::Ready => "your move",
        SessionPhase::Resolving => "swapping",
        SessionPhase::Complete => "solved",
    };
    format!("{level}  {phase:<9}  {mode}   [r] restart  [n] skip  [q] quit")
}

/// Fill every board pixel whose centre lies inside `rect`.
///
/// `shade` gets the pixel's normalized position inside the rect and whether
/// it is on the rect's one-pixel outline.
fn paint_rect(
    fb: &mut FrameBuffer,
    viewport: Viewport,
    rect: Rect,
    mut shade: impl FnMut(f32, f32, bool) -> Rgb,
) {
    let min = rect.min();
    let max = rect.max();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return;
    }
    let x0 = min.x.floor().max(0.0) as u32;
    let x1 = (max.x.ceil().max(0.0) as u32).min(viewport.pixel_width());
    let y0 = min.y.floor().max(0.0) as u32;
    let y1 = (max.y.ceil().max(0.0) as u32).min(viewport.pixel_height());

    for py in y0..y1 {
        for px in x0..x1 {
            let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
            if !rect.contains(p) {
                continue;
            }
            let u = (p.x - min.x) / rect.width();
            let v = (p.y - min.y) / rect.height();
            let edge = p.x - min.x < 1.0 || max.x - p.x < 1.0 || p.y - min.y < 1.0 || max.y - p.y < 1.0;
            let Ok(column) = u16::try_from(px) else {
                continue;
            };
            fb.set_pixel(viewport.x + column, viewport.y as u32 * 2 + py, shade(u, v, edge));
        }
    }
}
