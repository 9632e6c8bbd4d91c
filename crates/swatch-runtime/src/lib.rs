#![forbid(unsafe_code)]

//! Runtime for Swatch applications.
//!
//! # Role in Swatch
//! `swatch-runtime` drives an Elm-style [`Model`]: it reads terminal events,
//! fires declared timers, calls `update`, and re-renders through the
//! presenter when something changed. It also hosts the reactive primitives
//! widgets bind to.
//!
//! # Modules
//! - [`reactive`]: `Observable`, `Subject`, `UpdateStream`, `Subscription`.
//! - [`subscription`]: repeating [`Every`] timers and their manager.
//! - [`program`]: [`Model`], [`Cmd`], [`Program`].
//! - [`simulator`]: [`ProgramSimulator`], a terminal-free driver with a
//!   virtual clock.
//! - [`event`] / [`terminal`]: input events and the raw-mode session guard.

pub mod event;
pub mod program;
pub mod reactive;
pub mod simulator;
pub mod subscription;
pub mod terminal;

pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use program::{Cmd, Model, Program, ProgramConfig};
pub use reactive::{Observable, Subject, Subscription, UpdateStream};
pub use simulator::ProgramSimulator;
pub use subscription::{Every, SubId, SubscriptionManager};
pub use terminal::{SessionOptions, TerminalSession};
