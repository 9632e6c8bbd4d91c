//! Raw-mode terminal session.
//!
//! [`TerminalSession`] puts the terminal into the state a full-screen app
//! needs and restores it on drop, including during unwinding.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self as ct, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use tracing::{debug, warn};

use crate::event::Event;

/// Which terminal modes a session enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub alternate_screen: bool,
    pub mouse_capture: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            mouse_capture: true,
        }
    }
}

/// RAII guard over raw mode and friends.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
}

impl TerminalSession {
    /// Enter raw mode and the requested modes.
    ///
    /// If a later step fails, the steps already taken are undone before the
    /// error is returned.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        enable_raw_mode()?;
        let session = Self { options };
        let mut out = io::stdout();
        if options.alternate_screen {
            execute!(out, EnterAlternateScreen)?;
        }
        if options.mouse_capture {
            execute!(out, EnableMouseCapture)?;
        }
        execute!(out, Hide)?;
        debug!(?options, "terminal session started");
        Ok(session)
    }

    #[must_use]
    pub fn options(&self) -> SessionOptions {
        self.options
    }

    /// Current terminal size as `(columns, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Wait up to `timeout` for input. Returns `true` if an event is ready.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        ct::poll(timeout)
    }

    /// Read one ready event, skipping kinds models never see.
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        Ok(Event::from_crossterm(ct::read()?))
    }

    fn restore(&self) -> io::Result<()> {
        let mut out = io::stdout();
        execute!(out, Show)?;
        if self.options.mouse_capture {
            execute!(out, DisableMouseCapture)?;
        }
        if self.options.alternate_screen {
            execute!(out, LeaveAlternateScreen)?;
        }
        out.flush()?;
        disable_raw_mode()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(%err, "failed to restore terminal");
        } else {
            debug!("terminal session restored");
        }
    }
}
