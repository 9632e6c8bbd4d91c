#![forbid(unsafe_code)]

//! Single-line text widget.

use swatch_render::{Frame, Rect};
use swatch_style::Style;

use crate::Widget;

/// One line of text, truncated to its area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    text: String,
    style: Style,
    centered: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Center the text horizontally within the area.
    #[must_use]
    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for Label {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let area = area.intersection(&frame.bounds());
        if area.is_empty() {
            return;
        }
        frame.buffer.set_style(Rect::new(area.x, area.y, area.width, 1), self.style);
        let x = if self.centered {
            let w = swatch_render::buffer::text_width(&self.text);
            area.x + area.width.saturating_sub(w) / 2
        } else {
            area.x
        };
        frame
            .buffer
            .draw_text(x, area.y, &self.text, self.style, area.right());
    }
}
