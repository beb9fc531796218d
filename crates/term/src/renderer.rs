//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize) is a full redraw; after that
//! only glyphs that differ from the previous frame are written. Both paths go
//! through a [`Painter`], which remembers where the cursor is and which style
//! is active so that adjacent glyphs share one cursor move and a style change
//! only emits the parts that changed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Owns the terminal between `enter` and `exit`.
///
/// Dropping an entered renderer restores the terminal, so an early `?` in the
/// game loop does not leave the shell in raw mode.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    active: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(32 * 1024),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn enter(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }
        terminal::enable_raw_mode()?;
        self.active = true;
        self.last = None;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Restore the terminal. A no-op unless `enter` succeeded.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.buf.clear();
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        let flushed = self.flush_buf();
        terminal::disable_raw_mode()?;
        flushed
    }

    /// Force the next draw to be a full redraw (terminal resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// The caller keeps one `FrameBuffer` and passes it in every frame; after
    /// the call it holds the previous frame and can be re-rendered into.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            Some(mut prev) => {
                encode_full_into(fb, &mut self.buf)?;
                prev.resize(fb.width(), fb.height());
                prev
            }
            None => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        if !self.buf.is_empty() {
            self.flush_buf()?;
        }

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Cursor and style tracker for one encoded frame.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    cursor: Option<(u16, u16)>,
    style: Option<GlyphStyle>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            cursor: None,
            style: None,
        }
    }

    fn paint(&mut self, x: u16, y: u16, glyph: Glyph) -> Result<()> {
        if self.cursor != Some((x, y)) {
            self.out.queue(cursor::MoveTo(x, y))?;
        }
        self.set_style(glyph.style)?;
        self.out.queue(Print(glyph.ch))?;
        self.cursor = Some((x.saturating_add(1), y));
        Ok(())
    }

    fn set_style(&mut self, next: GlyphStyle) -> Result<()> {
        let mut current = match self.style {
            Some(current) if current == next => return Ok(()),
            other => other,
        };

        // Attributes can only be switched off with a full reset, which also drops colors.
        let drops_attr = current.is_some_and(|c| (c.bold && !next.bold) || (c.dim && !next.dim));
        if drops_attr {
            self.out.queue(SetAttribute(Attribute::Reset))?;
            current = None;
        }

        if current.map(|c| c.fg) != Some(next.fg) {
            self.out.queue(SetForegroundColor(next.fg.into()))?;
        }
        if current.map(|c| c.bg) != Some(next.bg) {
            self.out.queue(SetBackgroundColor(next.bg.into()))?;
        }
        if next.bold && !current.is_some_and(|c| c.bold) {
            self.out.queue(SetAttribute(Attribute::Bold))?;
        }
        if next.dim && !current.is_some_and(|c| c.dim) {
            self.out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.style = Some(next);
        Ok(())
    }

    fn finish(self) -> Result<()> {
        if self.style.is_some() {
            self.out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut painter = Painter::new(out);
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            painter.paint(x, y, fb.get(x, y).unwrap_or_default())?;
        }
    }
    painter.finish()
}

/// Encode only the glyphs of `next` that differ from `prev`.
///
/// Falls back to a full redraw when the sizes differ. An unchanged frame
/// encodes to nothing.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }

    let width = next.width() as usize;
    let mut painter = Painter::new(out);
    let changed = prev
        .glyphs()
        .iter()
        .zip(next.glyphs())
        .enumerate()
        .filter(|(_, (a, b))| a != b);
    for (i, (_, glyph)) in changed {
        let (x, y) = ((i % width) as u16, (i / width) as u16);
        painter.paint(x, y, *glyph)?;
    }
    painter.finish()
}
