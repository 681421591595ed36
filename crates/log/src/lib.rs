//! # Relay Log
//!
//! Subscriber setup for hosts embedding the Relay registry. Library crates
//! only emit `tracing` events; a host calls one of the init functions once.
//!
//! ```rust,no_run
//! fn main() -> Result<(), relay_log::LogError> {
//!     let _guard = relay_log::auto_init()?;
//!     tracing::info!(components = 3, "registry loaded");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Fields, Format, WriterConfig};
pub use error::{LogError, LogResult};

/// Pick a configuration from the environment and build type.
///
/// `RELAY_LOG` / `RUST_LOG` select [`Config::from_env`]; otherwise debug
/// builds use [`Config::development`] and release builds
/// [`Config::production`].
pub fn auto_init() -> LogResult<LoggerGuard> {
    if std::env::var("RELAY_LOG").is_ok() || std::env::var("RUST_LOG").is_ok() {
        init_with(Config::from_env())
    } else if cfg!(debug_assertions) {
        init_with(Config::development())
    } else {
        init_with(Config::production())
    }
}

/// Initialize with default configuration
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::default())
}

/// Initialize with custom configuration
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}

/// Initialize for tests. Safe to call from every test; only the first call
/// installs a subscriber.
pub fn init_test() -> LoggerGuard {
    if tracing::dispatcher::has_been_set() {
        return LoggerGuard::noop();
    }
    init_with(Config::test()).unwrap_or_else(|_| LoggerGuard::noop())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_test_is_idempotent() {
        let _first = init_test();
        let _second = init_test();
        assert!(tracing::dispatcher::has_been_set());
    }
}
