//! Command-line options for the demo.
//!
//! Every option can also come from a `SWATCH_*` environment variable; an
//! explicit flag wins over the environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use swatch_style::ColorProfile;

use crate::error::{DemoError, Result};

#[derive(Debug, Parser)]
#[command(
    name = "swatch-demo",
    about = "Reactive button showcase: plain, label-bound, color-bound and fully bound buttons",
    version
)]
pub struct Opts {
    /// Timer interval in milliseconds.
    #[arg(long, env = "SWATCH_TICK_MS", default_value_t = 1000)]
    pub tick_ms: u64,

    /// Seed for the color picker. Omit for OS entropy.
    #[arg(long, env = "SWATCH_SEED")]
    pub seed: Option<u64>,

    /// Quit after this many label ticks.
    #[arg(long, env = "SWATCH_EXIT_AFTER_TICKS")]
    pub exit_after_ticks: Option<u64>,

    /// Do not capture the mouse.
    #[arg(long)]
    pub no_mouse: bool,

    /// Color depth: truecolor, ansi16 or mono. Detected when omitted.
    #[arg(long, env = "SWATCH_COLOR_PROFILE")]
    pub color_profile: Option<ColorProfile>,

    /// Run without a terminal, printing one state line per tick.
    #[arg(long)]
    pub headless: bool,

    /// Write logs to this file.
    #[arg(long, env = "SWATCH_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Validated demo settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub tick: Duration,
    pub seed: Option<u64>,
    pub exit_after_ticks: Option<u64>,
    pub mouse: bool,
    pub color_profile: ColorProfile,
    pub headless: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(1000),
            seed: None,
            exit_after_ticks: None,
            mouse: true,
            color_profile: ColorProfile::default(),
            headless: false,
            log_file: None,
        }
    }
}

impl Opts {
    pub fn into_config(self) -> Result<DemoConfig> {
        if self.tick_ms == 0 {
            return Err(DemoError::invalid("--tick-ms must be greater than zero"));
        }
        if self.exit_after_ticks == Some(0) {
            return Err(DemoError::invalid(
                "--exit-after-ticks must be greater than zero",
            ));
        }
        Ok(DemoConfig {
            tick: Duration::from_millis(self.tick_ms),
            seed: self.seed,
            exit_after_ticks: self.exit_after_ticks,
            mouse: !self.no_mouse,
            color_profile: self.color_profile.unwrap_or_else(ColorProfile::from_env),
            headless: self.headless,
            log_file: self.log_file,
        })
    }
}
