#![forbid(unsafe_code)]

//! Widgets for Swatch.
//!
//! Widgets draw into a [`Frame`] inside a caller-chosen [`Rect`]. They do
//! not lay themselves out; the model's `view` decides where each one goes.
//!
//! - [`ReactiveButton`] / [`MountedButton`]: a button whose label and
//!   color can follow external update streams.
//! - [`Label`]: a single line of styled text.

pub mod button;
pub mod label;

pub use button::{ButtonState, MountedButton, ReactiveButton};
pub use label::Label;

use swatch_render::{Frame, Rect};

/// Something that can draw itself into a frame region.
pub trait Widget {
    /// Draw into `area`. Writes outside `area` are a bug.
    fn render(&self, area: Rect, frame: &mut Frame);
}
