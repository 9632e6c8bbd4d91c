//! Property-based invariant tests for color downgrade.
//!
//! 1. Downgrading to a profile yields a color that profile can express.
//! 2. Downgrading is idempotent.
//! 3. Truecolor is the identity.
//! 4. Palette names parse back case-insensitively.

use proptest::prelude::*;
use swatch_style::{Color, ColorProfile, SemanticColor};

fn arb_color() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::rgb(r, g, b))
}

fn arb_profile() -> impl Strategy<Value = ColorProfile> {
    prop::sample::select(vec![
        ColorProfile::Mono,
        ColorProfile::Ansi16,
        ColorProfile::TrueColor,
    ])
}

fn expressible(color: Color, profile: ColorProfile) -> bool {
    match profile {
        ColorProfile::TrueColor => true,
        ColorProfile::Ansi16 => !matches!(color, Color::Rgb(_)),
        ColorProfile::Mono => matches!(color, Color::Mono(_)),
    }
}

proptest! {
    #[test]
    fn downgrade_fits_profile(color in arb_color(), profile in arb_profile()) {
        prop_assert!(expressible(color.downgrade(profile), profile));
    }

    #[test]
    fn downgrade_is_idempotent(color in arb_color(), profile in arb_profile()) {
        let once = color.downgrade(profile);
        prop_assert_eq!(once.downgrade(profile), once);
    }

    #[test]
    fn truecolor_is_identity(color in arb_color()) {
        prop_assert_eq!(color.downgrade(ColorProfile::TrueColor), color);
    }

    #[test]
    fn semantic_names_round_trip(color in prop::sample::select(SemanticColor::PALETTE.to_vec())) {
        prop_assert_eq!(color.name().parse::<SemanticColor>(), Ok(color));
        prop_assert_eq!(color.name().to_uppercase().parse::<SemanticColor>(), Ok(color));
    }
}
