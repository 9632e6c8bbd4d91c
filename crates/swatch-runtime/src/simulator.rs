#![forbid(unsafe_code)]

//! Headless program driver for tests.
//!
//! [`ProgramSimulator`] runs a [`Model`] through the same dispatch path as
//! [`Program`](crate::program::Program) but without a terminal. Time is
//! virtual: it only moves when [`advance`](ProgramSimulator::advance) is
//! called, and timers fire at their exact deadlines along the way.
//!
//! ```ignore
//! let mut sim = ProgramSimulator::new(MyModel::default(), 40, 10);
//! sim.init();
//! sim.advance(Duration::from_secs(2));
//! assert!(sim.render().to_plain_text().contains("ticks: 2"));
//! ```

use std::time::{Duration, Instant};

use swatch_render::{Buffer, HitId};

use crate::event::Event;
use crate::program::{Driver, Model};

/// Drives a model with a virtual clock and an in-memory buffer.
pub struct ProgramSimulator<M: Model> {
    driver: Driver<M>,
    width: u16,
    height: u16,
    origin: Instant,
    now: Instant,
    buffer: Buffer,
    frames: usize,
}

impl<M: Model> ProgramSimulator<M> {
    /// A simulator whose screen is `width` x `height` cells.
    pub fn new(model: M, width: u16, height: u16) -> Self {
        let origin = Instant::now();
        Self {
            driver: Driver::new(model),
            width,
            height,
            origin,
            now: origin,
            buffer: Buffer::new(width, height),
            frames: 0,
        }
    }

    /// Run `Model::init` and start the declared timers.
    pub fn init(&mut self) {
        self.driver.init(self.now);
    }

    /// Deliver a message directly to `update`.
    pub fn send(&mut self, msg: M::Message) {
        self.driver.dispatch(msg, self.now);
    }

    /// Deliver a terminal event; mouse hits resolve against the last render.
    pub fn inject_event(&mut self, event: Event) {
        if let Event::Resize { width, height } = event {
            self.width = width;
            self.height = height;
        }
        self.driver.handle_event(event, self.now);
    }

    /// Move the virtual clock forward, firing timers at their deadlines.
    ///
    /// Returns the number of timer messages delivered.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.now + by;
        let mut delivered = 0;
        while self.driver.is_running() {
            match self.driver.next_deadline() {
                Some(deadline) if deadline <= target => {
                    self.now = self.now.max(deadline);
                    delivered += self.driver.fire_due(self.now);
                }
                _ => break,
            }
        }
        self.now = target;
        delivered
    }

    /// Render the model and return the resulting buffer.
    pub fn render(&mut self) -> &Buffer {
        self.buffer = self.driver.render(self.width, self.height);
        self.frames += 1;
        &self.buffer
    }

    /// Hit region under `(x, y)` in the last render.
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<HitId> {
        self.driver.hit_test(x, y)
    }

    /// Virtual time since the simulator was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.now - self.origin
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    /// Whether an update happened since the last render.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.driver.dirty
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.driver.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.driver.model
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Stop all timers, as the real program does on exit.
    pub fn shutdown(&mut self) {
        self.driver.shutdown();
    }
}
