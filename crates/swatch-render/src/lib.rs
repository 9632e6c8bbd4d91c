#![forbid(unsafe_code)]

//! Render kernel for Swatch.
//!
//! # Role in Swatch
//! `swatch-render` owns the cell grid that widgets draw into and the
//! presenter that turns it into terminal output. It knows nothing about
//! input or the runtime loop.
//!
//! # Primary responsibilities
//! - **Buffer**: a fixed-size grid of [`Cell`]s with clipped text drawing.
//! - **Frame**: one render pass; a buffer plus clickable hit regions.
//! - **Presenter**: diffs successive buffers and writes only changed cells,
//!   downgrading colors to the terminal's [`ColorProfile`](swatch_style::ColorProfile).

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod geometry;
pub mod presenter;

pub use buffer::Buffer;
pub use cell::Cell;
pub use frame::{Frame, HitId};
pub use geometry::Rect;
pub use presenter::Presenter;
