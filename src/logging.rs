use crate::persistence::log_file;
use anyhow::{Context, Result};
use env_logger::Env;
use log::debug;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Log verbosity selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Send log output to a file in the data directory; the terminal belongs to the UI.
/// RUST_LOG wins over `level`, which defaults to warn.
pub fn configure_logging(data_dir: &Path, level: Option<LogLevel>) -> Result<PathBuf> {
    let path = log_file(data_dir);
    let target = Box::new(open_log_file(&path)?);

    let default_filter = level.map_or("warn", |lvl| lvl.filter());
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Pipe(target))
        .try_init()
        .context("Logger already initialized")?;

    debug!("Logging started");
    Ok(path)
}

/// Open the log for appending so earlier sessions are kept
fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}
