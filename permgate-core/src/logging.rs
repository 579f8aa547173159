//! Logging bootstrap
//!
//! Permgate logs through the standard `log` facade (`log::info!`, `log::warn!`, ...).
//! Binaries call [`init_logging`] once at startup to install `env_logger` with the
//! configured default filter. Libraries embedding the core may install their own
//! logger instead.

use crate::config::LoggingConfig;
use std::sync::Once;

static INIT: Once = Once::new();

/// Install env_logger using `config.level` as the default filter
///
/// Safe to call multiple times; only the first call has an effect. `RUST_LOG`
/// overrides the configured level when present.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let mut result = Ok(());
    INIT.call_once(|| {
        result = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(config.level.as_str()),
        )
        .format_timestamp_millis()
        .try_init()
        .map_err(anyhow::Error::from);
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        // "off" keeps the test binary quiet once the global logger is installed
        let config = LoggingConfig { level: "off".to_string() };
        std::env::remove_var("RUST_LOG");
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_ok());
        assert!(!log::log_enabled!(log::Level::Error));
    }
}
