//! # VR Telemetry
//!
//! Observability for the Vendor Registry host.
//!
//! ## Components
//!
//! - Structured logging through `tracing-subscriber` (text or JSON, to stderr)
//! - Prometheus metrics for registry calls, errors, registrations and admin transfers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vr_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // Logs and metrics are now being collected
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `vendor-registry` | Service name in logs |
//! | `VR_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter directive |
//! | `VR_CONSOLE_OUTPUT` | `true` | Install the console subscriber |
//! | `VR_JSON_LOGS` | `false` | JSON log lines |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, StructuredLogger};
pub use metrics::{
    gather_metrics, record_call, register_metrics, HistogramTimer, MetricsHandle, ADMIN_TRANSFERS,
    CALL_DURATION, REGISTRY_CALLS, REGISTRY_ERRORS, VENDORS_REGISTERED,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Metric registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Configuration value could not be used.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize metrics and structured logging.
///
/// Returns a guard that should be held for the lifetime of the host.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics_handle = register_metrics()?;
    let logger = logging::init_logging(&config)?;

    Ok(TelemetryGuard {
        service_name: config.service_name,
        logger,
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
    logger: StructuredLogger,
    _metrics: MetricsHandle,
}

impl TelemetryGuard {
    /// Service name the guard was initialized for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if self.logger.installed() {
            tracing::info!(service = %self.service_name, "Shutting down telemetry");
        }
    }
}
