#![forbid(unsafe_code)]

//! Elm-style program loop.
//!
//! A [`Model`] owns application state. The runtime feeds it messages
//! (terminal events converted through `From<Event>`, timer ticks, messages
//! returned as [`Cmd::Msg`]) and re-renders through [`Model::view`] when
//! anything changed.
//!
//! ```text
//!  terminal input ──┐
//!                   ├──> update(msg) ──> Cmd ──> (more msgs | quit)
//!  timer deadlines ─┘         │
//!                             └──> subscriptions() ──> reconcile timers
//!                             └──> dirty ──> view(frame) ──> presenter
//! ```
//!
//! # Invariants
//!
//! 1. `subscriptions()` is consulted after `init()` and after every
//!    `update()`, so the running timers always match the latest model.
//! 2. Once `Cmd::Quit` executes, no further message reaches the model and
//!    every timer is stopped.
//! 3. Mouse events arrive with [`MouseEvent::hit`](crate::event::MouseEvent)
//!    resolved against the most recently rendered frame.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use swatch_render::{Frame, HitId, Presenter, Rect};
use swatch_style::ColorProfile;
use tracing::{debug, info, info_span};

use crate::event::Event;
use crate::subscription::{Every, SubscriptionManager};
use crate::terminal::{SessionOptions, TerminalSession};

/// Application state and behavior.
pub trait Model: Sized {
    /// Messages that drive `update`. Terminal events convert into them.
    type Message: From<Event> + 'static;

    /// Startup commands. Called once before the first render.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    fn view(&self, frame: &mut Frame);

    /// Timers this model wants running right now.
    ///
    /// Called after `init()` and after each `update()`. Timers are matched
    /// by id, so returning the same ids keeps their schedules intact and
    /// returning an empty vec stops them all.
    fn subscriptions(&self) -> Vec<Every<Self::Message>> {
        vec![]
    }
}

/// Side effects requested by `init` or `update`.
#[derive(Default)]
pub enum Cmd<M> {
    #[default]
    None,
    Quit,
    /// Run each command in order.
    Batch(Vec<Cmd<M>>),
    /// Feed a message straight back into `update`.
    Msg(M),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
        }
    }
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Combine commands, collapsing empty and single-element batches.
    pub fn batch(mut cmds: Vec<Self>) -> Self {
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or_default(),
            _ => Self::Batch(cmds),
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Capture mouse events so widgets can be clicked.
    pub mouse: bool,
    /// Draw on the alternate screen.
    pub alt_screen: bool,
    /// Longest the loop blocks on input when no timer is due sooner.
    pub poll_timeout: Duration,
    pub color_profile: ColorProfile,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            mouse: true,
            alt_screen: true,
            poll_timeout: Duration::from_millis(250),
            color_profile: ColorProfile::from_env(),
        }
    }
}

impl ProgramConfig {
    #[must_use]
    pub fn with_mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    #[must_use]
    pub fn with_color_profile(mut self, profile: ColorProfile) -> Self {
        self.color_profile = profile;
        self
    }

    #[must_use]
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }
}

/// Terminal-independent half of the runtime: message dispatch, timers and
/// hit regions. Shared by [`Program`] and the simulator.
pub(crate) struct Driver<M: Model> {
    pub(crate) model: M,
    subscriptions: SubscriptionManager<M::Message>,
    running: bool,
    pub(crate) dirty: bool,
    hits: Vec<(Rect, HitId)>,
}

impl<M: Model> Driver<M> {
    pub(crate) fn new(model: M) -> Self {
        Self {
            model,
            subscriptions: SubscriptionManager::new(),
            running: true,
            dirty: true,
            hits: Vec::new(),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn init(&mut self, now: Instant) {
        let cmd = self.model.init();
        self.execute_cmd(cmd, now);
        self.reconcile(now);
    }

    pub(crate) fn dispatch(&mut self, msg: M::Message, now: Instant) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.dirty = true;
        self.execute_cmd(cmd, now);
        self.reconcile(now);
    }

    /// Route a terminal event, resolving mouse hits first.
    pub(crate) fn handle_event(&mut self, event: Event, now: Instant) {
        let event = match event {
            Event::Mouse(mut mouse) => {
                mouse.hit = self.hit_test(mouse.x, mouse.y);
                Event::Mouse(mouse)
            }
            other => other,
        };
        self.dispatch(M::Message::from(event), now);
    }

    /// Deliver every timer message due at `now`. Returns how many ran.
    pub(crate) fn fire_due(&mut self, now: Instant) -> usize {
        let mut delivered = 0;
        for msg in self.subscriptions.drain_due(now) {
            if !self.running {
                break;
            }
            self.dispatch(msg, now);
            delivered += 1;
        }
        delivered
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.subscriptions.next_deadline()
    }

    /// Render the model into a fresh frame and remember its hit regions.
    pub(crate) fn render(&mut self, width: u16, height: u16) -> swatch_render::Buffer {
        let mut frame = Frame::new(width.max(1), height.max(1));
        self.model.view(&mut frame);
        let (buffer, hits) = frame.into_parts();
        self.hits = hits;
        self.dirty = false;
        buffer
    }

    pub(crate) fn hit_test(&self, x: u16, y: u16) -> Option<HitId> {
        self.hits
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, id)| *id)
    }

    pub(crate) fn shutdown(&mut self) {
        self.running = false;
        self.subscriptions.stop_all();
    }

    fn reconcile(&mut self, now: Instant) {
        if self.running {
            self.subscriptions.reconcile(self.model.subscriptions(), now);
        } else {
            self.subscriptions.stop_all();
        }
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>, now: Instant) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => {
                debug!("quit requested");
                self.running = false;
            }
            Cmd::Msg(m) => {
                if self.running {
                    let cmd = self.model.update(m);
                    self.dirty = true;
                    self.execute_cmd(cmd, now);
                }
            }
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c, now);
                }
            }
        }
    }
}

/// Runs a [`Model`] against the real terminal.
pub struct Program<M: Model, W: Write = Stdout> {
    driver: Driver<M>,
    config: ProgramConfig,
    session: TerminalSession,
    presenter: Presenter<W>,
    width: u16,
    height: u16,
}

impl<M: Model> Program<M, Stdout> {
    /// Create a program with the default configuration.
    pub fn new(model: M) -> io::Result<Self> {
        Self::with_config(model, ProgramConfig::default())
    }

    /// Enter the terminal session described by `config`.
    pub fn with_config(model: M, config: ProgramConfig) -> io::Result<Self> {
        let session = TerminalSession::new(SessionOptions {
            alternate_screen: config.alt_screen,
            mouse_capture: config.mouse,
        })?;
        let (width, height) = session.size()?;
        let presenter = Presenter::new(io::stdout(), config.color_profile);
        Ok(Self {
            driver: Driver::new(model),
            config,
            session,
            presenter,
            width,
            height,
        })
    }
}

impl<M: Model, W: Write> Program<M, W> {
    /// Run until the model quits. Timers are stopped on every exit path.
    pub fn run(&mut self) -> io::Result<()> {
        info!(
            width = self.width,
            height = self.height,
            profile = %self.presenter.profile(),
            "program started"
        );
        let result = self.run_event_loop();
        self.driver.shutdown();
        info!(ok = result.is_ok(), "program stopped");
        result
    }

    fn run_event_loop(&mut self) -> io::Result<()> {
        self.driver.init(Instant::now());
        self.render_frame()?;

        while self.driver.is_running() {
            let timeout = self.effective_timeout(Instant::now());

            if self.session.poll_event(timeout)? {
                loop {
                    if let Some(event) = self.session.read_event()? {
                        self.handle_event(event);
                    }
                    if !self.driver.is_running() || !self.session.poll_event(Duration::ZERO)? {
                        break;
                    }
                }
            }

            self.driver.fire_due(Instant::now());

            if self.driver.is_running() && self.driver.dirty {
                self.render_frame()?;
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Resize { width, height } = event {
            debug!(width, height, "resize");
            self.width = width;
            self.height = height;
            self.presenter.invalidate();
        }
        self.driver.handle_event(event, Instant::now());
    }

    fn render_frame(&mut self) -> io::Result<()> {
        let _frame_span =
            info_span!("render_frame", width = self.width, height = self.height).entered();
        let buffer = self.driver.render(self.width, self.height);
        let written = self.presenter.present(&buffer)?;
        debug!(cells = written, "frame presented");
        Ok(())
    }

    /// Block on input until the next timer is due, capped by the poll timeout.
    fn effective_timeout(&self, now: Instant) -> Duration {
        match self.driver.next_deadline() {
            Some(deadline) => deadline
                .saturating_duration_since(now)
                .min(self.config.poll_timeout),
            None => self.config.poll_timeout,
        }
    }

    pub fn model(&self) -> &M {
        &self.driver.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.driver.model
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }
}
