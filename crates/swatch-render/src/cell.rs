use swatch_style::{Color, Style, StyleFlags};

/// A single terminal cell.
///
/// `None` colors mean "terminal default". Wide graphemes occupy their lead
/// cell; the trailing cells hold `'\0'` continuation markers that the
/// presenter skips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: StyleFlags,
}

impl Cell {
    pub const CONTINUATION: char = '\0';

    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        Self {
            ch,
            fg: None,
            bg: None,
            attrs: StyleFlags::empty(),
        }
    }

    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.ch == Self::CONTINUATION
    }

    /// Apply a style; unset style fields keep the cell's current values.
    pub fn apply_style(&mut self, style: Style) {
        if let Some(fg) = style.fg {
            self.fg = Some(fg);
        }
        if let Some(bg) = style.bg {
            self.bg = Some(bg);
        }
        self.attrs |= style.attrs;
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.apply_style(style);
        self
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::from_char(' ')
    }
}
