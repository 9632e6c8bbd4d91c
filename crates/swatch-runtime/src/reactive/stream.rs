//! Type-erased update streams.
//!
//! An [`UpdateStream<T>`] is "something you can subscribe to that yields
//! `T`s". It hides whether the values come from a [`Subject`], an
//! [`Observable`], or an adapter chain, so widgets can accept any of them.
//!
//! Streams cannot fail: there is no error channel.
//!
//! [`Subject`]: super::Subject
//! [`Observable`]: super::Observable

use std::fmt;
use std::rc::Rc;

use super::subject::Subscription;

type SubscribeFn<T> = dyn Fn(Box<dyn Fn(&T)>) -> Subscription;

/// A cloneable, subscribable source of `T` values.
pub struct UpdateStream<T> {
    subscribe: Rc<SubscribeFn<T>>,
}

impl<T> Clone for UpdateStream<T> {
    fn clone(&self) -> Self {
        Self {
            subscribe: Rc::clone(&self.subscribe),
        }
    }
}

impl<T> fmt::Debug for UpdateStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateStream").finish_non_exhaustive()
    }
}

impl<T> PartialEq for UpdateStream<T> {
    /// Two streams are equal when they are handles to the same source.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.subscribe, &other.subscribe)
    }
}

impl<T: 'static> UpdateStream<T> {
    /// Build a stream from a subscribe function.
    ///
    /// `subscribe` receives the downstream callback and must return a guard
    /// that keeps it registered with the underlying source.
    pub fn from_subscribe(
        subscribe: impl Fn(Box<dyn Fn(&T)>) -> Subscription + 'static,
    ) -> Self {
        Self {
            subscribe: Rc::new(subscribe),
        }
    }

    /// A stream that never emits.
    #[must_use]
    pub fn never() -> Self {
        Self::from_subscribe(|_| Subscription::empty())
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        (self.subscribe)(Box::new(callback))
    }

    /// Transform every value.
    #[must_use]
    pub fn map<U: 'static>(self, f: impl Fn(&T) -> U + 'static) -> UpdateStream<U> {
        let f = Rc::new(f);
        UpdateStream::from_subscribe(move |downstream: Box<dyn Fn(&U)>| {
            let f = Rc::clone(&f);
            self.subscribe(move |value| downstream(&f(value)))
        })
    }

    /// Drop values for which `keep` returns `false`.
    #[must_use]
    pub fn filter(self, keep: impl Fn(&T) -> bool + 'static) -> UpdateStream<T> {
        let keep = Rc::new(keep);
        UpdateStream::from_subscribe(move |downstream: Box<dyn Fn(&T)>| {
            let keep = Rc::clone(&keep);
            self.subscribe(move |value| {
                if keep(value) {
                    downstream(value);
                }
            })
        })
    }
}

impl<T: Clone + 'static> UpdateStream<T> {
    /// Lift every value into `Some`, for bindings that take optional updates.
    #[must_use]
    pub fn some(self) -> UpdateStream<Option<T>> {
        self.map(|value| Some(value.clone()))
    }
}
