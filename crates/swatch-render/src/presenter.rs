//! Diffing ANSI presenter.
//!
//! The presenter keeps the previously presented buffer and emits only the
//! cells that changed, wrapped in a synchronized-update block so the
//! terminal never shows a half-drawn frame.
//!
//! # Invariants
//!
//! 1. After `present(b)`, the terminal contents equal `b` (given nothing
//!    else wrote to the terminal).
//! 2. Presenting the same buffer twice writes no cells the second time.
//! 3. A size change, or [`Presenter::invalidate`], forces a full redraw.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};
use swatch_style::{Color, ColorProfile, MonoColor, StyleFlags};
use tracing::trace;

use crate::buffer::Buffer;
use crate::cell::Cell;

/// Writes buffers to a terminal, one diff at a time.
#[derive(Debug)]
pub struct Presenter<W: Write> {
    out: W,
    profile: ColorProfile,
    previous: Option<Buffer>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct Pen {
    fg: Option<Color>,
    bg: Option<Color>,
    attrs: StyleFlags,
}

impl<W: Write> Presenter<W> {
    #[must_use]
    pub fn new(out: W, profile: ColorProfile) -> Self {
        Self {
            out,
            profile,
            previous: None,
        }
    }

    #[must_use]
    pub fn profile(&self) -> ColorProfile {
        self.profile
    }

    /// Forget the previous frame so the next `present` redraws everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Present `buffer`, returning the number of cells written.
    pub fn present(&mut self, buffer: &Buffer) -> io::Result<usize> {
        let previous = self
            .previous
            .take()
            .filter(|p| p.width() == buffer.width() && p.height() == buffer.height());

        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut written = 0usize;
        let mut pen: Option<Pen> = None;
        let mut cursor: Option<(u16, u16)> = None;

        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                if cell.is_continuation() {
                    continue;
                }
                if previous.as_ref().and_then(|p| p.get(x, y)) == Some(cell) {
                    continue;
                }
                if cursor != Some((x, y)) {
                    queue!(self.out, MoveTo(x, y))?;
                }
                let next = Pen {
                    fg: cell.fg,
                    bg: cell.bg,
                    attrs: cell.attrs,
                };
                if pen != Some(next) {
                    self.write_pen(next)?;
                    pen = Some(next);
                }
                queue!(self.out, Print(cell.ch))?;
                cursor = Some((x.saturating_add(cell_width(buffer, x, y)), y));
                written += 1;
            }
        }

        queue!(self.out, SetAttribute(Attribute::Reset), EndSynchronizedUpdate)?;
        self.out.flush()?;
        trace!(written, "frame presented");

        self.previous = Some(buffer.clone());
        Ok(written)
    }

    fn write_pen(&mut self, pen: Pen) -> io::Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        if let Some(fg) = pen.fg {
            let fg = self.term_color(fg);
            queue!(self.out, SetForegroundColor(fg))?;
        }
        if let Some(bg) = pen.bg {
            let bg = self.term_color(bg);
            queue!(self.out, SetBackgroundColor(bg))?;
        }
        if pen.attrs.contains(StyleFlags::BOLD) {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if pen.attrs.contains(StyleFlags::DIM) {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }
        if pen.attrs.contains(StyleFlags::ITALIC) {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        if pen.attrs.contains(StyleFlags::UNDERLINE) {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        if pen.attrs.contains(StyleFlags::REVERSE) {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }

    fn term_color(&self, color: Color) -> TermColor {
        match color.downgrade(self.profile) {
            Color::Rgb(rgb) => TermColor::Rgb {
                r: rgb.r,
                g: rgb.g,
                b: rgb.b,
            },
            Color::Ansi16(idx) => TermColor::AnsiValue(idx.as_u8()),
            Color::Mono(MonoColor::Black) => TermColor::Black,
            Color::Mono(MonoColor::White) => TermColor::White,
        }
    }

    /// Borrow the underlying writer.
    #[must_use]
    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

/// Cells covered by the grapheme at `(x, y)`, counting its continuations.
fn cell_width(buffer: &Buffer, x: u16, y: u16) -> u16 {
    let mut w = 1;
    while buffer
        .get(x + w, y)
        .is_some_and(|c: &Cell| c.is_continuation())
    {
        w += 1;
    }
    w
}
