//! Observable value wrapper with change notification and version tracking.
//!
//! # Design
//!
//! [`Observable<T>`] pairs a value with a version counter and a [`Subject`]
//! of changes. A mutation that leaves the value equal (by `PartialEq`) is
//! a no-op; any real change bumps the version by one and broadcasts the
//! new value.
//!
//! `version()` tells a caller whether a write actually changed the value.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::stream::UpdateStream;
use super::subject::{Subject, Subscription};

struct Slot<T> {
    value: T,
    version: u64,
}

/// A shared, version-tracked value.
///
/// Clones are handles to the same slot and the same subscribers.
pub struct Observable<T> {
    slot: Rc<RefCell<Slot<T>>>,
    changes: Subject<T>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
            changes: self.changes.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("Observable")
            .field("value", &slot.value)
            .field("version", &slot.version)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Wrap `value` at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot { value, version: 0 })),
            changes: Subject::new(),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Borrow the value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.slot.borrow().value)
    }

    /// Replace the value. Returns `true` if it changed.
    pub fn set(&self, value: T) -> bool {
        self.update(|v| *v = value)
    }

    /// Mutate in place. Returns `true` if the value changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let changed = {
            let mut slot = self.slot.borrow_mut();
            let before = slot.value.clone();
            f(&mut slot.value);
            if slot.value == before {
                None
            } else {
                slot.version += 1;
                Some(slot.value.clone())
            }
        };
        match changed {
            Some(value) => {
                self.changes.send(value);
                true
            }
            None => false,
        }
    }

    /// Called with the new value after every change.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.changes.subscribe(callback)
    }

    /// Future changes as a stream.
    #[must_use]
    pub fn changes(&self) -> UpdateStream<T> {
        self.changes.stream()
    }

    /// Increments by one per value-changing mutation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.slot.borrow().version
    }

    /// Live change subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.changes.live_subscriber_count()
    }
}
