//! Broadcast emitter and subscription guards.
//!
//! # Design
//!
//! A [`Subject<T>`] keeps no value. `send(v)` hands `&v` to every live
//! subscriber, in registration order, and then drops `v`. Subscribers that
//! arrive later never see earlier values.
//!
//! Callbacks are stored strongly inside the [`Subscription`] guard and
//! weakly inside the subject. Dropping the guard is the only way to
//! unsubscribe; dead entries are pruned on the next `send` or `subscribe`.
//!
//! `send` snapshots the weak entries and upgrades each one just before its
//! call, so a guard dropped by an earlier callback in the same `send`
//! silences its subscriber for the rest of that delivery.
//!
//! # Failure Modes
//!
//! - **Guard discarded immediately**: `let _ = subject.subscribe(..)` drops
//!   the guard on the spot, so the callback never runs. Bind the guard to a
//!   named variable or store it.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::stream::UpdateStream;

type Callback<T> = dyn Fn(&T);

struct SubjectInner<T> {
    listeners: Vec<Weak<Callback<T>>>,
    sent: u64,
}

/// A broadcast emitter.
///
/// Cloning a `Subject` yields another handle to the same listener list;
/// sending through either handle reaches the same subscribers.
pub struct Subject<T> {
    inner: Rc<RefCell<SubjectInner<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Subject")
            .field("listeners", &inner.listeners.len())
            .field("sent", &inner.sent)
            .finish()
    }
}

impl<T: 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Subject<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubjectInner {
                listeners: Vec::new(),
                sent: 0,
            })),
        }
    }

    /// Deliver `value` to every live subscriber.
    ///
    /// Returns the number of subscribers that received it.
    pub fn send(&self, value: T) -> usize {
        let snapshot: Vec<Weak<Callback<T>>> = {
            let mut inner = self.inner.borrow_mut();
            inner.sent += 1;
            inner.listeners.retain(|w| w.strong_count() > 0);
            inner.listeners.clone()
        };
        let mut delivered = 0;
        for weak in &snapshot {
            if let Some(callback) = weak.upgrade() {
                callback(&value);
                delivered += 1;
            }
        }
        delivered
    }

    /// Register `callback` for every future `send`.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: Rc<Callback<T>> = Rc::new(callback);
        let mut inner = self.inner.borrow_mut();
        inner.listeners.retain(|w| w.strong_count() > 0);
        inner.listeners.push(Rc::downgrade(&strong));
        Subscription::holding(strong)
    }

    /// A type-erased stream view of this subject.
    ///
    /// The stream keeps the subject alive, so a widget bound to it keeps
    /// receiving values even if the original handle is dropped.
    #[must_use]
    pub fn stream(&self) -> UpdateStream<T> {
        let subject = self.clone();
        UpdateStream::from_subscribe(move |callback| subject.subscribe(callback))
    }

    /// Subscribers whose guards are still alive.
    #[must_use]
    pub fn live_subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Registered entries, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Total number of `send` calls so far.
    #[must_use]
    pub fn sent_count(&self) -> u64 {
        self.inner.borrow().sent
    }
}

/// RAII guard for a subscriber callback.
///
/// While the guard lives, the callback is reachable from its source. Once
/// dropped, the source's weak reference can no longer be upgraded.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _guard: Option<Box<dyn Any>>,
}

impl Subscription {
    pub(crate) fn holding<T: 'static>(callback: Rc<Callback<T>>) -> Self {
        Self {
            _guard: Some(Box::new(callback)),
        }
    }

    /// A guard for a source that never emits.
    pub fn empty() -> Self {
        Self { _guard: None }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("empty", &self._guard.is_none())
            .finish()
    }
}
