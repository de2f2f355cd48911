//! Process-wide diagnostic logging.

use super::args::{LogFormat, LogLevel};
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// How diagnostics are filtered and rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Explicit verbosity; `None` defers to `RUST_LOG`.
    pub level: Option<LogLevel>,
    /// Output format.
    pub format: LogFormat,
}

/// Installs the global subscriber, writing to stderr.
///
/// Only the first call in a process has any effect. The configuration that
/// won is returned so later callers can see what is active.
#[must_use]
pub fn init_logging(config: LoggingConfig) -> LoggingConfig {
    static ACTIVE: OnceLock<LoggingConfig> = OnceLock::new();
    *ACTIVE.get_or_init(|| {
        install(config);
        config
    })
}

fn install(config: LoggingConfig) {
    let filter = config.level.map_or_else(
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        |level| EnvFilter::new(level.as_directive()),
    );
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    // Another subscriber may already be installed by an embedding test harness.
    match config.format {
        LogFormat::Text => builder.try_init().ok(),
        LogFormat::Json => builder.json().try_init().ok(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_configuration_wins() {
        let first = init_logging(LoggingConfig {
            level: Some(LogLevel::Error),
            format: LogFormat::Text,
        });
        let second = init_logging(LoggingConfig {
            level: Some(LogLevel::Trace),
            format: LogFormat::Json,
        });

        assert_eq!(first, second);
    }
}
