#![forbid(unsafe_code)]

//! Swatch demo: a host screen showing reactive buttons in every binding
//! configuration, fed by two timers.
//!
//! Run with `swatch-demo` for the TUI or `swatch-demo --headless` for a
//! line-per-tick text feed.

pub mod cli;
pub mod error;
pub mod headless;
pub mod host;
pub mod logging;

use clap::Parser;
use swatch_runtime::{Program, ProgramConfig};
use tracing::info;

use crate::cli::{DemoConfig, Opts};
use crate::error::{DemoError, Result};
use crate::host::DemoHost;

pub fn run_from_env() -> Result<()> {
    let config = Opts::parse().into_config()?;
    run(config)
}

pub fn run(config: DemoConfig) -> Result<()> {
    logging::init(&config)?;
    info!(?config, "swatch-demo starting");

    if config.headless {
        let stdout = std::io::stdout();
        return headless::run(&config, &mut stdout.lock());
    }

    let program_config = ProgramConfig::default()
        .with_mouse(config.mouse)
        .with_color_profile(config.color_profile);
    let mut program = Program::with_config(DemoHost::from_config(&config), program_config)?;
    let result = program.run();
    program.model_mut().teardown();
    result.map_err(DemoError::from)
}
