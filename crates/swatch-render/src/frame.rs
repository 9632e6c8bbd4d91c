//! A single render pass.

use crate::buffer::Buffer;
use crate::geometry::Rect;

/// Identifier a widget registers its clickable area under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitId(pub u32);

/// Render target handed to `Model::view`.
///
/// Holds the cell grid plus the clickable regions registered during this
/// pass. Regions registered later sit on top of earlier ones.
#[derive(Debug)]
pub struct Frame {
    /// The cell grid for this render pass.
    pub buffer: Buffer,
    hits: Vec<(Rect, HitId)>,
}

impl Frame {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hits: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.buffer.area()
    }

    /// Register `rect` (clipped to the frame) as clickable for `id`.
    ///
    /// Returns `false` when nothing of `rect` is on screen.
    pub fn register_hit(&mut self, rect: Rect, id: HitId) -> bool {
        let clipped = rect.intersection(&self.bounds());
        if clipped.is_empty() {
            return false;
        }
        self.hits.push((clipped, id));
        true
    }

    /// Topmost region containing `(x, y)`.
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<HitId> {
        self.hits
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, id)| *id)
    }

    /// Registered regions in registration order.
    #[must_use]
    pub fn hit_regions(&self) -> &[(Rect, HitId)] {
        &self.hits
    }

    /// Split the frame into its buffer and hit regions.
    #[must_use]
    pub fn into_parts(self) -> (Buffer, Vec<(Rect, HitId)>) {
        (self.buffer, self.hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_prefers_latest_region() {
        let mut frame = Frame::new(10, 4);
        assert!(frame.register_hit(Rect::new(0, 0, 10, 4), HitId(1)));
        assert!(frame.register_hit(Rect::new(2, 1, 3, 1), HitId(2)));
        assert_eq!(frame.hit_test(3, 1), Some(HitId(2)));
        assert_eq!(frame.hit_test(0, 0), Some(HitId(1)));
        assert_eq!(frame.hit_test(20, 20), None);
    }

    #[test]
    fn offscreen_regions_are_rejected() {
        let mut frame = Frame::new(4, 2);
        assert!(!frame.register_hit(Rect::new(10, 10, 2, 2), HitId(7)));
        assert!(frame.hit_regions().is_empty());
    }
}
