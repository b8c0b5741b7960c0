//! Logging setup shared by the binaries.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.
//! Logging starts before the config file is read, at the default level, and
//! the returned `LogHandle` applies the configured level once it is known.

use crate::{Error, Result};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

/// Levels accepted by `logging.level` and `LogHandle::set_level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Changes the level of the subscriber installed by `init_with_level`
pub struct LogHandle {
    /// `None` when RUST_LOG chose the filter or another subscriber was
    /// already installed
    filter: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LogHandle {
    /// Switch to `level` unless RUST_LOG set the filter
    pub fn set_level(&self, level: &str) -> Result<()> {
        let level = level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(Error::Config(format!(
                "log level must be one of {:?}, got '{}'",
                LOG_LEVELS, level
            )));
        }
        if let Some(handle) = &self.filter {
            handle
                .reload(EnvFilter::new(&level))
                .map_err(|e| Error::Config(format!("cannot change log level: {}", e)))?;
            tracing::debug!("Log level set to {}", level);
        }
        Ok(())
    }
}

/// Initialize logging at the default `warn` level
///
/// RUST_LOG overrides the level.
pub fn init() -> LogHandle {
    init_with_level("warn")
}

/// Initialize logging with a specific default level
///
/// # Arguments
/// * `default_level` - Default log level (trace, debug, info, warn, error)
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_level(default_level: &str) -> LogHandle {
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_chosen = from_env.is_some();
    let filter = from_env.unwrap_or_else(|| EnvFilter::new(default_level));
    let (filter, handle) = reload::Layer::new(filter);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()
        .is_ok();

    LogHandle {
        filter: (installed && !env_chosen).then_some(handle),
    }
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
