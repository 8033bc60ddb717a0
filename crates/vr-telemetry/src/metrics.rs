//! Prometheus metrics for the Vendor Registry.
//!
//! Call metrics are named `vr_registry_<metric>_<unit>`; lifecycle totals `vr_<metric>_total`.

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Calls handled, by method and outcome (`ok` / `err`)
    pub static ref REGISTRY_CALLS: CounterVec = CounterVec::new(
        Opts::new("vr_registry_calls_total", "Registry calls by method and outcome"),
        &["method", "outcome"]
    ).expect("metric creation failed");

    /// Failed calls by wire error code
    pub static ref REGISTRY_ERRORS: CounterVec = CounterVec::new(
        Opts::new("vr_registry_errors_total", "Failed registry calls by error code"),
        &["code"]
    ).expect("metric creation failed");

    /// Vendors successfully registered
    pub static ref VENDORS_REGISTERED: Counter = Counter::new(
        "vr_vendors_registered_total",
        "Total number of vendor registrations"
    ).expect("metric creation failed");

    /// Successful admin transfers
    pub static ref ADMIN_TRANSFERS: Counter = Counter::new(
        "vr_admin_transfers_total",
        "Total number of admin transfers"
    ).expect("metric creation failed");

    /// Call handling latency
    pub static ref CALL_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "vr_registry_call_duration_seconds",
            "Time spent handling a registry call"
        ).buckets(exponential_buckets(0.00001, 2.0, 16).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Handle to the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(REGISTRY_CALLS.clone()),
        Box::new(REGISTRY_ERRORS.clone()),
        Box::new(VENDORS_REGISTERED.clone()),
        Box::new(ADMIN_TRANSFERS.clone()),
        Box::new(CALL_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Record the outcome of one registry call.
///
/// `error_code` is `None` for success.
pub fn record_call(method: &str, error_code: Option<u32>) {
    match error_code {
        None => {
            REGISTRY_CALLS.with_label_values(&[method, "ok"]).inc();
            match method {
                "registerVendor" => VENDORS_REGISTERED.inc(),
                "transferAdmin" => ADMIN_TRANSFERS.inc(),
                _ => {}
            }
        }
        Some(code) => {
            REGISTRY_CALLS.with_label_values(&[method, "err"]).inc();
            REGISTRY_ERRORS.with_label_values(&[&code.to_string()]).inc();
        }
    }
}

/// Encode all metrics as Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
