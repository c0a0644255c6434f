//! Logging setup for applications built on the SDK
//!
//! The library crates only emit `tracing` events. Call [`init_logging`] once from a
//! binary to print them; without it every event is dropped.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Environment variable overriding the filter, e.g. `onkyo_stream=debug`
pub const LOG_LEVEL_ENV: &str = "ONKYO_LOG_LEVEL";

/// Environment variable selecting the mode for [`init_logging_from_env`]
pub const LOG_MODE_ENV: &str = "ONKYO_LOG_MODE";

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No subscriber is installed
    Silent,
    /// Compact stderr output at `info`
    Development,
    /// Verbose output at `debug` with source locations
    Debug,
    /// One JSON object per line at `info`
    Json,
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },
}

/// Install a global subscriber for `mode`.
///
/// The filter comes from `ONKYO_LOG_LEVEL`, then `RUST_LOG`, then the mode's default
/// level. Fails if a global subscriber is already set.
///
/// ```rust,no_run
/// use onkyo_sdk::logging::{init_logging, LoggingMode};
///
/// init_logging(LoggingMode::Development).expect("logging");
/// ```
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let result = match mode {
        LoggingMode::Silent => return Ok(()),
        LoggingMode::Development => Registry::default()
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .compact(),
            )
            .with(env_filter("info")?)
            .try_init(),
        LoggingMode::Debug => Registry::default()
            .with(
                fmt::layer()
                    .pretty()
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(env_filter("debug")?)
            .try_init(),
        LoggingMode::Json => Registry::default()
            .with(fmt::layer().json().with_current_span(false))
            .with(env_filter("info")?)
            .try_init(),
    };

    result.map_err(|e| LoggingError::TracingInit(e.to_string()))
}

/// Initialize logging with the mode named by `ONKYO_LOG_MODE`.
///
/// Recognizes `development`, `debug` and `json`; anything else is silent.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = std::env::var(LOG_MODE_ENV)
        .map(|value| mode_from_name(&value))
        .unwrap_or(LoggingMode::Silent);
    init_logging(mode)
}

/// Whether a global subscriber has been installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}

fn mode_from_name(name: &str) -> LoggingMode {
    match name.trim().to_ascii_lowercase().as_str() {
        "development" | "dev" => LoggingMode::Development,
        "debug" => LoggingMode::Debug,
        "json" => LoggingMode::Json,
        _ => LoggingMode::Silent,
    }
}

fn env_filter(default_level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = std::env::var(LOG_LEVEL_ENV) {
        return parse_filter(&filter);
    }
    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
}

fn parse_filter(filter: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(filter).map_err(|e| LoggingError::InvalidFilter {
        filter: filter.to_string(),
        reason: e.to_string(),
    })
}
