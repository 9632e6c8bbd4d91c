use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::color::{Color, Rgb};

/// Error returned when a color or profile name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("unknown color name: {0}")]
    UnknownColor(String),
    #[error("unknown color profile: {0} (expected truecolor, ansi16 or mono)")]
    UnknownProfile(String),
}

/// A named color, independent of how the terminal ends up drawing it.
///
/// Buttons carry a `SemanticColor` in their state; the renderer resolves it
/// to an [`Rgb`] and the presenter downgrades that to the terminal profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SemanticColor {
    Red,
    #[default]
    Blue,
    Green,
    Yellow,
    Orange,
    Brown,
    Cyan,
    Purple,
    Indigo,
    Mint,
    White,
}

impl SemanticColor {
    /// The palette random color updates are drawn from.
    pub const PALETTE: [Self; 10] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Orange,
        Self::Brown,
        Self::Cyan,
        Self::Purple,
        Self::Indigo,
        Self::Mint,
    ];

    #[must_use]
    pub const fn to_rgb(self) -> Rgb {
        match self {
            Self::Red => Rgb::new(255, 59, 48),
            Self::Blue => Rgb::new(0, 122, 255),
            Self::Green => Rgb::new(52, 199, 89),
            Self::Yellow => Rgb::new(255, 204, 0),
            Self::Orange => Rgb::new(255, 149, 0),
            Self::Brown => Rgb::new(162, 132, 94),
            Self::Cyan => Rgb::new(50, 173, 230),
            Self::Purple => Rgb::new(175, 82, 222),
            Self::Indigo => Rgb::new(88, 86, 214),
            Self::Mint => Rgb::new(0, 199, 190),
            Self::White => Rgb::new(255, 255, 255),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Brown => "brown",
            Self::Cyan => "cyan",
            Self::Purple => "purple",
            Self::Indigo => "indigo",
            Self::Mint => "mint",
            Self::White => "white",
        }
    }
}

impl From<SemanticColor> for Color {
    fn from(color: SemanticColor) -> Self {
        Color::Rgb(color.to_rgb())
    }
}

impl fmt::Display for SemanticColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SemanticColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::PALETTE
            .iter()
            .chain(std::iter::once(&Self::White))
            .copied()
            .find(|c| c.name() == wanted)
            .ok_or(ParseColorError::UnknownColor(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_is_blue() {
        assert_eq!(SemanticColor::default(), SemanticColor::Blue);
    }

    #[test]
    fn palette_has_ten_distinct_entries() {
        let names: HashSet<_> = SemanticColor::PALETTE.iter().map(|c| c.name()).collect();
        let rgbs: HashSet<_> = SemanticColor::PALETTE.iter().map(|c| c.to_rgb()).collect();
        assert_eq!(names.len(), 10);
        assert_eq!(rgbs.len(), 10);
        assert!(!SemanticColor::PALETTE.contains(&SemanticColor::White));
    }

    #[test]
    fn parse_by_name() {
        assert_eq!("Indigo".parse::<SemanticColor>(), Ok(SemanticColor::Indigo));
        assert_eq!("white".parse::<SemanticColor>(), Ok(SemanticColor::White));
        assert_eq!(
            "teal".parse::<SemanticColor>(),
            Err(ParseColorError::UnknownColor("teal".into()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for color in SemanticColor::PALETTE {
            assert_eq!(color.to_string().parse::<SemanticColor>(), Ok(color));
        }
    }
}
