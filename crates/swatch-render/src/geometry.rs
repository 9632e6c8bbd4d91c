//! Integer cell geometry.

/// A rectangle in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[must_use]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap of two rectangles (empty when disjoint).
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return Rect::new(x, y, 0, 0);
        }
        Rect::new(x, y, right - x, bottom - y)
    }

    /// A `width` x `height` rectangle centered inside `self`, clamped to fit.
    #[must_use]
    pub fn centered(&self, width: u16, height: u16) -> Rect {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Rect::new(
            self.x + (self.width - width) / 2,
            self.y + (self.height - height) / 2,
            width,
            height,
        )
    }

    /// Remove `n` rows from the top, returning `(top, rest)`.
    #[must_use]
    pub fn split_top(&self, n: u16) -> (Rect, Rect) {
        let n = n.min(self.height);
        (
            Rect::new(self.x, self.y, self.width, n),
            Rect::new(self.x, self.y + n, self.width, self.height - n),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 4));
        assert!(!r.contains(5, 5));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn intersection_of_disjoint_is_empty() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(5, 5, 2, 2);
        assert!(a.intersection(&b).is_empty());
        assert_eq!(
            Rect::new(0, 0, 4, 4).intersection(&Rect::new(2, 1, 5, 5)),
            Rect::new(2, 1, 2, 3)
        );
    }

    #[test]
    fn centered_clamps_to_parent() {
        let parent = Rect::new(10, 10, 20, 6);
        assert_eq!(parent.centered(10, 2), Rect::new(15, 12, 10, 2));
        assert_eq!(parent.centered(50, 50), parent);
    }

    #[test]
    fn split_top_saturates() {
        let r = Rect::new(0, 0, 10, 3);
        let (top, rest) = r.split_top(5);
        assert_eq!(top, r);
        assert!(rest.is_empty());
    }
}
