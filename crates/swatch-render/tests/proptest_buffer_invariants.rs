//! Property-based invariant tests for buffer drawing and presenting.
//!
//! 1. `draw_text` never touches cells outside `[x, max_x)` on its row.
//! 2. The returned cursor never passes `max_x`.
//! 3. Presenting the same buffer twice writes nothing the second time.
//! 4. `register_hit` never stores a region that leaves the frame.

use proptest::prelude::*;
use swatch_render::{Buffer, Frame, HitId, Presenter, Rect};
use swatch_style::{ColorProfile, SemanticColor, Style};

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{0,30}",
        "[a-z漢字🙂]{0,12}",
    ]
}

proptest! {
    #[test]
    fn draw_text_stays_in_bounds(
        width in 1u16..40,
        x in 0u16..40,
        max_x in 0u16..48,
        text in arb_text(),
    ) {
        let mut buffer = Buffer::new(width, 3);
        let end = buffer.draw_text(x, 1, &text, Style::new().bold(), max_x);
        prop_assert!(end <= max_x.min(width).max(x));

        let blank = Buffer::new(width, 3);
        for cx in 0..width {
            for cy in 0..3 {
                let inside = cy == 1 && cx >= x && cx < max_x.min(width);
                if !inside {
                    prop_assert_eq!(buffer.get(cx, cy), blank.get(cx, cy));
                }
            }
        }
    }

    #[test]
    fn unchanged_buffer_presents_nothing(
        width in 1u16..30,
        height in 1u16..6,
        text in "[a-zA-Z ]{0,30}",
    ) {
        let mut buffer = Buffer::new(width, height);
        buffer.fill(buffer.area(), Style::new().bg(SemanticColor::Cyan));
        buffer.draw_text(0, 0, &text, Style::new(), width);

        let mut presenter = Presenter::new(Vec::new(), ColorProfile::TrueColor);
        let first = presenter.present(&buffer).unwrap();
        prop_assert_eq!(first, usize::from(width) * usize::from(height));
        prop_assert_eq!(presenter.present(&buffer).unwrap(), 0);
    }

    #[test]
    fn hit_regions_are_clipped(
        (fw, fh) in (1u16..50, 1u16..20),
        (x, y, w, h) in (0u16..60, 0u16..30, 0u16..30, 0u16..10),
    ) {
        let mut frame = Frame::new(fw, fh);
        let stored = frame.register_hit(Rect::new(x, y, w, h), HitId(1));
        prop_assert_eq!(stored, !frame.hit_regions().is_empty());
        for (rect, _) in frame.hit_regions() {
            prop_assert!(rect.right() <= fw && rect.bottom() <= fh);
            prop_assert!(!rect.is_empty());
        }
    }
}
