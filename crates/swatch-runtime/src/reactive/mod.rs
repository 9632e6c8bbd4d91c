#![forbid(unsafe_code)]

//! Reactive data bindings for Swatch.
//!
//! - [`Observable`]: a shared, version-tracked value with change callbacks.
//! - [`Subject`]: a broadcast emitter with no current value; every `send`
//!   reaches every live subscriber.
//! - [`UpdateStream`]: a type-erased, cloneable handle to anything that can
//!   be subscribed to. Widgets accept streams, not concrete sources.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//!
//! # Architecture
//!
//! Everything is single-threaded: shared state lives in `Rc<RefCell<..>>`
//! and subscribers are held as `Weak` callbacks, pruned lazily when a
//! source next notifies or gains a subscriber. Delivery is synchronous; `send`/`set` return only
//! after every subscriber has run.
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. Dropping a [`Subscription`] guarantees its callback is not called
//!    again, even by the rest of a notification already in progress.
//! 3. No borrow is held while callbacks run, so a callback may send into,
//!    or subscribe to, another source.

pub mod observable;
pub mod stream;
pub mod subject;

pub use observable::Observable;
pub use stream::UpdateStream;
pub use subject::{Subject, Subscription};
