//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so every frame can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, GlyphStyle, Rgb};
use crate::types::{format_time, Cell, GameOverCause, GameState};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAY_BG: Rgb = Rgb::new(20, 24, 20);
const PANEL_MIN_WIDTH: u16 = 12;

/// Where the playfield landed in the last render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares a cell in common terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Terminal size needed to show the whole playfield plus the side panel.
    pub fn required_size(&self, snap: &GameSnapshot) -> Viewport {
        let (w, h) = self.frame_size(snap);
        Viewport::new(w.saturating_add(2 + PANEL_MIN_WIDTH), h)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(GlyphStyle::default().glyph(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let frame = Frame {
            x: viewport
                .width
                .saturating_sub(frame_w.saturating_add(2 + PANEL_MIN_WIDTH))
                / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let play = GlyphStyle::new(Rgb::new(60, 70, 60), PLAY_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, ' ', play);
        self.draw_border(fb, frame, GlyphStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)));

        let wall = GlyphStyle::new(Rgb::new(150, 150, 160), PLAY_BG);
        for &c in &snap.obstacles {
            self.fill_cell(fb, snap, frame, c, '▓', wall);
        }

        if let Some(food) = snap.food {
            let style = GlyphStyle::new(Rgb::new(230, 70, 70), PLAY_BG).bold();
            self.draw_token(fb, snap, frame, food, '●', style);
        }
        if let Some(bonus) = snap.bonus {
            let mut style = GlyphStyle::new(Rgb::new(250, 210, 60), PLAY_BG).bold();
            // Blink for the last two seconds.
            if bonus.remaining_ms < 2000 && (bonus.remaining_ms / 250) % 2 == 1 {
                style = style.dim();
            }
            self.draw_token(fb, snap, frame, bonus.cell, '★', style);
        }

        let body = GlyphStyle::new(Rgb::new(70, 190, 90), PLAY_BG);
        for &c in snap.body.iter().skip(1) {
            self.fill_cell(fb, snap, frame, c, '█', body);
        }
        if let Some(head) = snap.head() {
            let style = if snap.game_over {
                GlyphStyle::new(Rgb::new(230, 70, 70), PLAY_BG).bold()
            } else {
                GlyphStyle::new(Rgb::new(140, 250, 150), PLAY_BG).bold()
            };
            self.fill_cell(fb, snap, frame, head, '█', style);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.state {
            GameState::Paused => {
                self.draw_overlay(fb, frame, &["PAUSED", "P to resume"]);
            }
            GameState::LevelTransition => {
                let title = format!("LEVEL {}", snap.level);
                self.draw_overlay(fb, frame, &[&title, "get ready"]);
            }
            GameState::GameOver => {
                let reason = match snap.cause {
                    Some(GameOverCause::BoardFull) => "board full",
                    _ => "crashed",
                };
                self.draw_overlay(fb, frame, &["GAME OVER", reason, "R restart  Q quit"]);
            }
            GameState::Running => {}
        }
    }

    /// Allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Terminal column/row of a grid cell's top-left corner, if it is on the grid.
    pub fn cell_origin(&self, snap: &GameSnapshot, frame_x: u16, frame_y: u16, c: Cell) -> Option<(u16, u16)> {
        if !snap.bounds.contains(c) {
            return None;
        }
        let gx = (c.x - snap.bounds.x) as u16;
        let gy = (c.y - snap.bounds.y) as u16;
        Some((frame_x + 1 + gx * self.cell_w, frame_y + 1 + gy * self.cell_h))
    }

    fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        let span = |cells: i16, size: u16| {
            (cells.max(0) as u16)
                .saturating_mul(size)
                .saturating_add(2)
        };
        (
            span(snap.bounds.width, self.cell_w),
            span(snap.bounds.height, self.cell_h),
        )
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame, style: GlyphStyle) {
        if f.w < 2 || f.h < 2 {
            return;
        }

        fb.put_char(f.x, f.y, '┌', style);
        fb.put_char(f.x + f.w - 1, f.y, '┐', style);
        fb.put_char(f.x, f.y + f.h - 1, '└', style);
        fb.put_char(f.x + f.w - 1, f.y + f.h - 1, '┘', style);

        for dx in 1..f.w - 1 {
            fb.put_char(f.x + dx, f.y, '─', style);
            fb.put_char(f.x + dx, f.y + f.h - 1, '─', style);
        }
        for dy in 1..f.h - 1 {
            fb.put_char(f.x, f.y + dy, '│', style);
            fb.put_char(f.x + f.w - 1, f.y + dy, '│', style);
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, f: Frame, c: Cell, ch: char, style: GlyphStyle) {
        if let Some((px, py)) = self.cell_origin(snap, f.x, f.y, c) {
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
        }
    }

    /// A single glyph in the cell's first column, background elsewhere.
    fn draw_token(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, f: Frame, c: Cell, ch: char, style: GlyphStyle) {
        if let Some((px, py)) = self.cell_origin(snap, f.x, f.y, c) {
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
            fb.put_char(px, py, ch, style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, f: Frame) {
        let panel_x = f.x.saturating_add(f.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = GlyphStyle::default().bold();
        let value = GlyphStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = f.y;
        let mut entry = |fb: &mut FrameBuffer, name: &str, text: &str| {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y.saturating_add(1), text, value);
            y = y.saturating_add(3);
        };

        entry(fb, "SCORE", &snap.score.to_string());
        entry(fb, "HIGH", &snap.high_score.max(snap.score).to_string());
        entry(fb, "LEVEL", &snap.level.to_string());
        entry(fb, "LENGTH", &snap.body.len().to_string());
        entry(fb, "TIME", &format_time(snap.play_time_secs()));
        if let Some(bonus) = snap.bonus {
            let secs = (bonus.remaining_ms as u64).div_ceil(1000);
            entry(fb, "BONUS", &format!("+{} {}s", bonus.points, secs));
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, f: Frame, lines: &[&str]) {
        let title = GlyphStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let hint = GlyphStyle::new(Rgb::new(190, 190, 190), Rgb::new(0, 0, 0));

        let top = f.y + f.h / 2 - (lines.len() as u16) / 2;
        for (i, line) in lines.iter().enumerate() {
            let w = line.chars().count() as u16;
            let x = f.x.saturating_add(f.w.saturating_sub(w) / 2);
            let style = if i == 0 { title } else { hint };
            fb.put_str(x, top + i as u16, line, style);
        }
    }
}
