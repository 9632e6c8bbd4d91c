//! Terminal-free mode.
//!
//! Runs the host screen through the simulator in real time and prints one
//! [`DemoHost::state_line`] per tick. Useful for piping into other tools
//! and for environments without a TTY.

use std::io::Write;
use std::thread;
use std::time::Duration;

use swatch_runtime::ProgramSimulator;
use tracing::info;

use crate::cli::DemoConfig;
use crate::error::Result;
use crate::host::DemoHost;

const WIDTH: u16 = 80;
const HEIGHT: u16 = 24;

/// Steps a [`DemoHost`] one tick at a time.
pub struct HeadlessRunner {
    sim: ProgramSimulator<DemoHost>,
    tick: Duration,
}

impl HeadlessRunner {
    #[must_use]
    pub fn new(config: &DemoConfig) -> Self {
        let mut sim = ProgramSimulator::new(DemoHost::from_config(config), WIDTH, HEIGHT);
        sim.init();
        Self {
            sim,
            tick: config.tick,
        }
    }

    /// Advance one tick of virtual time. Returns the resulting state line,
    /// or `None` once the host has quit.
    pub fn step(&mut self) -> Option<String> {
        if !self.sim.is_running() {
            return None;
        }
        self.sim.advance(self.tick);
        Some(self.sim.model().state_line())
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    #[must_use]
    pub fn host(&self) -> &DemoHost {
        self.sim.model()
    }

    /// Render the current screen as plain text.
    pub fn snapshot(&mut self) -> String {
        self.sim.render().to_plain_text()
    }

    /// Stop timers and tear the host down.
    pub fn finish(&mut self) {
        self.sim.shutdown();
        self.sim.model_mut().teardown();
    }
}

/// Run until the host quits, pacing ticks in wall-clock time.
pub fn run<W: Write>(config: &DemoConfig, out: &mut W) -> Result<()> {
    let mut runner = HeadlessRunner::new(config);
    info!(tick_ms = config.tick.as_millis() as u64, "headless run started");
    while runner.is_running() {
        thread::sleep(config.tick);
        if let Some(line) = runner.step() {
            writeln!(out, "{line}")?;
            out.flush()?;
        }
    }
    runner.finish();
    Ok(())
}
