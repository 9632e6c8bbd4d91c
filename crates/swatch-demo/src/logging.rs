//! Tracing subscriber setup.
//!
//! The TUI owns stdout, so logs only go somewhere when asked: to
//! `--log-file` when given, and to stderr in headless mode. Otherwise no
//! subscriber is installed and events are dropped. Filtering follows
//! `RUST_LOG`, defaulting to `info`.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::cli::DemoConfig;
use crate::error::{DemoError, Result};

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber for `config`.
pub fn init(config: &DemoConfig) -> Result<()> {
    match (&config.log_file, config.headless) {
        (Some(path), _) => init_file(path),
        (None, true) => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|err| DemoError::logging(err.to_string())),
        (None, false) => Ok(()),
    }
}

fn init_file(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| DemoError::logging(format!("{}: {err}", path.display())))
}
