// Scoped logging over tracing: a coarse per-subsystem filter configured
// from an environment variable, so hosts can turn one scope up without
// flooding the log with the others.

pub mod config;
pub mod macros;

pub use config::{init_logging, LogConfig};
pub use tracing::Level;

use once_cell::sync::Lazy;
use std::sync::OnceLock;

static LOG_CONFIG: OnceLock<LogConfig> = OnceLock::new();
static DEFAULT_CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::default);

/// Active scoped config; warn-everything until `init_logging` runs.
pub fn get_log_config() -> &'static LogConfig {
    LOG_CONFIG.get().unwrap_or(&DEFAULT_CONFIG)
}

pub(crate) fn set_log_config(config: LogConfig) {
    LOG_CONFIG.set(config).ok();
}
