#![forbid(unsafe_code)]

//! Style types for Swatch.
//!
//! This crate provides:
//! - [`Color`] values with terminal downgrade ([`ColorProfile`])
//! - [`SemanticColor`], the named palette buttons are painted with
//! - [`Style`] for foreground/background/attribute styling of cells

/// Color types, profiles, and downgrade utilities.
pub mod color;
/// Named semantic colors and the demo palette.
pub mod semantic;
/// Cell style with optional colors and attribute flags.
pub mod style;

pub use color::{Ansi16, Color, ColorProfile, MonoColor, Rgb};
pub use semantic::{ParseColorError, SemanticColor};
pub use style::{Style, StyleFlags};
