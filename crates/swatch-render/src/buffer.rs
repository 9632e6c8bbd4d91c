//! Fixed-size cell grid.

use swatch_style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::cell::Cell;
use crate::geometry::Rect;

/// Display width of `text` in cells.
#[must_use]
pub fn text_width(text: &str) -> u16 {
    text.graphemes(true)
        .map(|g| UnicodeWidthStr::width(g) as u16)
        .fold(0u16, u16::saturating_add)
}

/// A row-major grid of cells.
///
/// All writes are clipped to the grid; out-of-range coordinates are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Reset every cell to the default blank cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Fill `area` with blanks carrying `style`.
    pub fn fill(&mut self, area: Rect, style: Style) {
        let area = area.intersection(&self.area());
        let blank = Cell::default().with_style(style);
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.set(x, y, blank);
            }
        }
    }

    /// Apply `style` to the cells of `area` without touching their content.
    pub fn set_style(&mut self, area: Rect, style: Style) {
        let area = area.intersection(&self.area());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.apply_style(style);
                }
            }
        }
    }

    /// Draw `text` starting at `(x, y)`, stopping before `max_x`.
    ///
    /// Graphemes that would straddle `max_x` are dropped whole. Styles are
    /// layered over existing cells. Returns the x position after the last
    /// drawn grapheme.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        let mut x = x;
        for grapheme in text.graphemes(true) {
            let w = UnicodeWidthStr::width(grapheme) as u16;
            if w == 0 {
                continue;
            }
            if x.saturating_add(w) > max_x {
                break;
            }
            let ch = grapheme.chars().next().unwrap_or(' ');
            if let Some(cell) = self.get_mut(x, y) {
                cell.ch = ch;
                cell.apply_style(style);
            }
            for dx in 1..w {
                if let Some(cell) = self.get_mut(x + dx, y) {
                    cell.ch = Cell::CONTINUATION;
                    cell.apply_style(style);
                }
            }
            x += w;
        }
        x
    }

    /// The characters of row `y`, continuation cells skipped.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect()
    }

    /// All rows joined with newlines; handy for snapshot-style assertions.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatch_style::{Color, StyleFlags};

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut buf = Buffer::new(3, 2);
        buf.set(3, 0, Cell::from_char('x'));
        buf.set(0, 2, Cell::from_char('x'));
        assert!(buf.get(3, 0).is_none());
        assert_eq!(buf.to_plain_text(), "   \n   ");
    }

    #[test]
    fn draw_text_clips_at_max_x() {
        let mut buf = Buffer::new(10, 1);
        let end = buf.draw_text(1, 0, "Hello", Style::new(), 4);
        assert_eq!(end, 4);
        assert_eq!(buf.row_text(0), " Hel      ");
    }

    #[test]
    fn wide_graphemes_are_not_split() {
        let mut buf = Buffer::new(4, 1);
        let end = buf.draw_text(0, 0, "日本語", Style::new(), 4);
        assert_eq!(end, 4);
        assert_eq!(buf.get(1, 0).map(|c| c.is_continuation()), Some(true));
        assert_eq!(buf.row_text(0), "日本");

        let mut narrow = Buffer::new(3, 1);
        assert_eq!(narrow.draw_text(0, 0, "日本", Style::new(), 3), 2);
    }

    #[test]
    fn text_over_fill_keeps_background() {
        let mut buf = Buffer::new(6, 1);
        buf.fill(buf.area(), Style::new().bg(Color::rgb(0, 122, 255)));
        buf.draw_text(1, 0, "ok", Style::new().fg(Color::rgb(255, 255, 255)).bold(), 6);
        let cell = buf.get(1, 0).copied().unwrap_or_default();
        assert_eq!(cell.ch, 'o');
        assert_eq!(cell.bg, Some(Color::rgb(0, 122, 255)));
        assert_eq!(cell.fg, Some(Color::rgb(255, 255, 255)));
        assert!(cell.attrs.contains(StyleFlags::BOLD));
    }

    #[test]
    fn text_width_counts_cells() {
        assert_eq!(text_width("Select All"), 10);
        assert_eq!(text_width("日本"), 4);
        assert_eq!(text_width(""), 0);
    }

    #[test]
    fn clear_resets_cells() {
        let mut buf = Buffer::new(2, 1);
        buf.draw_text(0, 0, "ab", Style::new().bold(), 2);
        buf.clear();
        assert_eq!(buf.get(0, 0), Some(&Cell::default()));
    }
}
