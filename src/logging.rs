//! Logging setup and helpers for the bridge.
//!
//! Uses the `log` facade with an `env_logger` backend. `RUST_LOG` still wins
//! when set; otherwise the filter defaults to `info`, or `debug` when the
//! `DEBUG` configuration flag is on.

use log::{error, info, warn};

/// Initializes the logger with the `env_logger` crate.
pub fn init_logger(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    info!("{message}");
}

/// Logs a warning message.
pub fn log_warn(message: &str) {
    warn!("{message}");
}

/// Logs an error message.
pub fn log_error(message: &str) {
    error!("{message}");
}
