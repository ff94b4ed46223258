//! Logging setup for `sqlite_page_reader`
//!
//! The decoders log through the `log` facade. This module installs
//! `env_logger` as the backend and keeps a small level-based API on top.

use log::LevelFilter;
use std::str::FromStr;

const TARGET: &str = "sqlite_page_reader";

/// Verbosity of the decoder's log output, least verbose first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd)]
pub enum LogLevel {
    Error = 0,
    /// Tolerated anomalies: bad magic, truncated pages, UTF-16 databases
    Warn = 1,
    Info = 2,
    /// One line per decoded page
    Debug = 3,
    /// One line per decoded cell
    Trace = 4,
}

impl LogLevel {
    #[must_use]
    pub const fn default() -> Self {
        Self::Info
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim().to_ascii_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "info" => Self::Info,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            other => return Err(format!("unknown log level `{other}`")),
        };
        Ok(level)
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// Install `env_logger` and set the global level
///
/// Calling this again only changes the level.
pub fn init_logger(level: LogLevel) {
    // The backend passes everything; `log::max_level` does the filtering
    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Trace)
        .format_target(true)
        .try_init();
    set_log_level(level);
}

/// Install the logger at [`LogLevel::Info`]
pub fn init_default_logger() {
    init_logger(LogLevel::default());
}

/// Initialize the global logger from `RUST_LOG`
///
/// Returns false if a logger was already installed.
pub fn init_from_env() -> bool {
    env_logger::Builder::from_default_env().try_init().is_ok()
}

pub fn set_log_level(level: LogLevel) {
    log::set_max_level(level.into());
}

/// Whether messages at `level` currently pass the global filter
#[must_use]
pub fn is_enabled(level: LogLevel) -> bool {
    LevelFilter::from(level) <= log::max_level()
}

pub fn log_error(message: &str) {
    log::error!(target: TARGET, "{message}");
}

pub fn log_warn(message: &str) {
    log::warn!(target: TARGET, "{message}");
}

pub fn log_info(message: &str) {
    log::info!(target: TARGET, "{message}");
}

pub fn log_debug(message: &str) {
    log::debug!(target: TARGET, "{message}");
}

pub fn log_trace(message: &str) {
    log::trace!(target: TARGET, "{message}");
}
