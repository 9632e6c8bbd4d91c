#![forbid(unsafe_code)]

//! Repeating timer subscriptions.
//!
//! A model declares the timers it wants from [`Model::subscriptions`]; the
//! runtime hands that list to [`SubscriptionManager::reconcile`] after every
//! update. Timers are identified by [`SubId`]:
//!
//! - a newly declared id starts, first firing one interval from now;
//! - an id that stays declared keeps its schedule untouched;
//! - an id that disappears stops immediately.
//!
//! Timers run on the loop thread. The runtime asks [`next_deadline`] how
//! long it may block on input and calls [`drain_due`] afterwards; there are
//! no background threads.
//!
//! # Invariants
//!
//! 1. A timer fires once per elapsed interval. A late `drain_due` catches up
//!    with one message per missed interval, and deadlines advance by whole
//!    intervals so the cadence never drifts.
//! 2. Messages from one `drain_due` call are ordered by deadline, ties
//!    broken by declaration order.
//!
//! [`Model::subscriptions`]: crate::program::Model::subscriptions
//! [`next_deadline`]: SubscriptionManager::next_deadline
//! [`drain_due`]: SubscriptionManager::drain_due

use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

/// Stable identifier for a declared timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubId(pub &'static str);

impl fmt::Display for SubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Shortest interval a timer may use.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// A repeating timer that produces a message every `interval`.
pub struct Every<M> {
    id: SubId,
    interval: Duration,
    make: Box<dyn Fn() -> M>,
}

impl<M> Every<M> {
    /// Declare a timer. Intervals shorter than [`MIN_INTERVAL`] are raised
    /// to it.
    pub fn new(id: SubId, interval: Duration, make: impl Fn() -> M + 'static) -> Self {
        Self {
            id,
            interval: interval.max(MIN_INTERVAL),
            make: Box::new(make),
        }
    }

    #[must_use]
    pub fn id(&self) -> SubId {
        self.id
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl<M> fmt::Debug for Every<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Every")
            .field("id", &self.id)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

struct RunningTimer<M> {
    timer: Every<M>,
    next_due: Instant,
    fired: u64,
}

/// Owns the running timers of one program.
pub struct SubscriptionManager<M> {
    running: Vec<RunningTimer<M>>,
}

impl<M> Default for SubscriptionManager<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for SubscriptionManager<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.running.iter().map(|r| (r.timer.id, r.next_due, r.fired)))
            .finish()
    }
}

impl<M> SubscriptionManager<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            running: Vec::new(),
        }
    }

    /// Bring the running set in line with `declared`.
    ///
    /// A timer whose interval changed is restarted.
    pub fn reconcile(&mut self, declared: Vec<Every<M>>, now: Instant) {
        let mut previous = std::mem::take(&mut self.running);
        for timer in declared {
            if self.running.iter().any(|r| r.timer.id == timer.id) {
                continue;
            }
            let kept = previous
                .iter()
                .position(|r| r.timer.id == timer.id && r.timer.interval == timer.interval)
                .map(|idx| previous.swap_remove(idx));
            match kept {
                Some(mut running) => {
                    running.timer.make = timer.make;
                    self.running.push(running);
                }
                None => {
                    debug!(id = %timer.id, interval_ms = timer.interval.as_millis() as u64, "timer started");
                    self.running.push(RunningTimer {
                        next_due: now + timer.interval,
                        timer,
                        fired: 0,
                    });
                }
            }
        }
        for stopped in previous {
            debug!(id = %stopped.timer.id, fired = stopped.fired, "timer stopped");
        }
    }

    /// Messages for every deadline at or before `now`.
    pub fn drain_due(&mut self, now: Instant) -> Vec<M> {
        let mut due: Vec<(Instant, usize, M)> = Vec::new();
        for (order, running) in self.running.iter_mut().enumerate() {
            while running.next_due <= now {
                due.push((running.next_due, order, (running.timer.make)()));
                running.next_due += running.timer.interval;
                running.fired += 1;
            }
        }
        if !due.is_empty() {
            debug!(count = due.len(), "timers fired");
        }
        due.sort_by_key(|(at, order, _)| (*at, *order));
        due.into_iter().map(|(_, _, msg)| msg).collect()
    }

    /// Earliest pending deadline, if any timer runs.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.running.iter().map(|r| r.next_due).min()
    }

    /// Stop every timer.
    pub fn stop_all(&mut self) {
        for stopped in self.running.drain(..) {
            debug!(id = %stopped.timer.id, fired = stopped.fired, "timer stopped");
        }
    }

    #[must_use]
    pub fn is_running(&self, id: SubId) -> bool {
        self.running.iter().any(|r| r.timer.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.running.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: SubId = SubId("a");
    const B: SubId = SubId("b");

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn fires_once_per_interval() {
        let t0 = Instant::now();
        let mut mgr = SubscriptionManager::new();
        mgr.reconcile(vec![Every::new(A, secs(1), || 'a')], t0);

        assert!(mgr.drain_due(t0).is_empty());
        assert!(mgr.drain_due(t0 + Duration::from_millis(999)).is_empty());
        assert_eq!(mgr.drain_due(t0 + secs(1)), vec!['a']);
        assert!(mgr.drain_due(t0 + secs(1)).is_empty());
        assert_eq!(mgr.next_deadline(), Some(t0 + secs(2)));
    }

    #[test]
    fn late_drain_catches_up_without_drift() {
        let t0 = Instant::now();
        let mut mgr = SubscriptionManager::new();
        mgr.reconcile(vec![Every::new(A, secs(1), || ())], t0);

        assert_eq!(mgr.drain_due(t0 + Duration::from_millis(3500)).len(), 3);
        assert_eq!(mgr.next_deadline(), Some(t0 + secs(4)));
    }

    #[test]
    fn interleaves_by_deadline() {
        let t0 = Instant::now();
        let mut mgr = SubscriptionManager::new();
        mgr.reconcile(
            vec![
                Every::new(A, secs(2), || "a"),
                Every::new(B, secs(1), || "b"),
            ],
            t0,
        );
        assert_eq!(mgr.drain_due(t0 + secs(4)), vec!["b", "a", "b", "b", "a", "b"]);
    }

    #[test]
    fn reconcile_keeps_schedule_of_surviving_timers() {
        let t0 = Instant::now();
        let mut mgr = SubscriptionManager::new();
        mgr.reconcile(vec![Every::new(A, secs(1), || 1)], t0);
        mgr.reconcile(
            vec![Every::new(A, secs(1), || 2)],
            t0 + Duration::from_millis(600),
        );
        // Deadline unchanged, but the newest message factory wins.
        assert_eq!(mgr.drain_due(t0 + secs(1)), vec![2]);
    }

    #[test]
    fn reconcile_stops_undeclared_and_restarts_changed() {
        let t0 = Instant::now();
        let mut mgr = SubscriptionManager::new();
        mgr.reconcile(
            vec![Every::new(A, secs(1), || ()), Every::new(B, secs(1), || ())],
            t0,
        );
        assert_eq!(mgr.len(), 2);

        mgr.reconcile(vec![Every::new(B, secs(3), || ())], t0 + secs(1));
        assert!(!mgr.is_running(A));
        assert!(mgr.is_running(B));
        assert_eq!(mgr.next_deadline(), Some(t0 + secs(4)));

        mgr.reconcile(Vec::new(), t0 + secs(2));
        assert!(mgr.is_empty());
        assert_eq!(mgr.next_deadline(), None);
    }

    #[test]
    fn duplicate_ids_run_once() {
        let t0 = Instant::now();
        let mut mgr = SubscriptionManager::new();
        mgr.reconcile(
            vec![Every::new(A, secs(1), || 1), Every::new(A, secs(1), || 2)],
            t0,
        );
        assert_eq!(mgr.len(), 1);
        assert_eq!(mgr.drain_due(t0 + secs(1)), vec![1]);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let timer = Every::new(A, Duration::ZERO, || ());
        assert_eq!(timer.interval(), MIN_INTERVAL);
    }

    #[test]
    fn stop_all_clears() {
        let t0 = Instant::now();
        let mut mgr = SubscriptionManager::new();
        mgr.reconcile(vec![Every::new(A, secs(1), || ())], t0);
        mgr.stop_all();
        assert!(mgr.drain_due(t0 + secs(10)).is_empty());
    }
}
