use bitflags::bitflags;

use crate::color::Color;

bitflags! {
    /// Text attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const REVERSE = 1 << 4;
    }
}

/// Styling for a run of cells.
///
/// `None` colors inherit whatever is already in the cell when the style is
/// applied, so a label can be drawn over a filled background without
/// repeating the background color.
///
/// ```
/// use swatch_style::{Color, Style};
///
/// let style = Style::new().fg(Color::rgb(255, 255, 255)).bold();
/// assert!(style.bg.is_none());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground color (text color).
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    /// Text attributes.
    pub attrs: StyleFlags,
}

impl Style {
    /// Create an empty style (all properties inherit).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: StyleFlags::empty(),
        }
    }

    #[must_use]
    pub fn fg(mut self, color: impl Into<Color>) -> Self {
        self.fg = Some(color.into());
        self
    }

    #[must_use]
    pub fn bg(mut self, color: impl Into<Color>) -> Self {
        self.bg = Some(color.into());
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.attrs |= StyleFlags::BOLD;
        self
    }

    #[must_use]
    pub fn attrs(mut self, attrs: StyleFlags) -> Self {
        self.attrs |= attrs;
        self
    }

    /// Layer `other` on top of `self`: set fields of `other` win.
    #[must_use]
    pub fn patch(self, other: Style) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attrs: self.attrs | other.attrs,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty()
    }
}
