//! Structured logging.
//!
//! Installs a global `tracing-subscriber` fmt subscriber. JSON mode emits one
//! object per line with `timestamp`, `level`, `target`, the span stack and the
//! event fields, suitable for log shippers. Logs go to stderr so that hosts
//! can keep stdout for protocol output.

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::EnvFilter;

/// Structured logger handle
pub struct StructuredLogger {
    installed: bool,
}

impl StructuredLogger {
    /// Whether this call installed the global subscriber.
    pub fn installed(&self) -> bool {
        self.installed
    }
}

/// Initialize structured logging.
///
/// Returns an error if the filter directive is invalid or a global subscriber
/// is already set.
pub fn init_logging(config: &TelemetryConfig) -> Result<StructuredLogger, TelemetryError> {
    if !config.console_output {
        return Ok(StructuredLogger { installed: false });
    }

    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("log level {:?}: {e}", config.log_level)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if config.json_logs {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing::debug!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Structured logging configured"
    );

    Ok(StructuredLogger { installed: true })
}

/// Helper to create structured log entries with consistent formatting.
#[macro_export]
macro_rules! log_event {
    // Info level with subsystem
    (info, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    // Warn level with subsystem
    (warn, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    // Error level with subsystem
    (error, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    // Debug level with subsystem
    (debug, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a registry call outcome with standard fields.
#[macro_export]
macro_rules! log_call_event {
    ($level:ident, $msg:expr, $method:expr, $caller:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = "vendor-registry",
            method = $method,
            caller = %$caller,
            $($($field)*,)?
            $msg
        )
    };
}
