//! # VR Node
//!
//! Reads one JSON `AuthenticatedCall` per stdin line and writes one JSON
//! `CallReceipt` per stdout line. Logs go to stderr.

use anyhow::{Context, Result};
use tokio::io::{self, BufReader};
use tracing::{debug, info, warn};

use vendor_registry::VERSION;
use vr_node::{build_host, NodeConfig};
use vr_telemetry::{gather_metrics, init_telemetry, log_event, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::for_component("node"))
        .context("failed to initialize telemetry")?;

    let config = NodeConfig::from_env().context("failed to load node configuration")?;
    log_event!(
        info,
        "vr-node",
        "Starting vendor registry node",
        version = VERSION,
        data_dir = ?config.data_dir,
        clock = ?config.clock
    );

    let mut host = build_host(&config)?;
    let summary = host
        .serve(BufReader::new(io::stdin()), io::stdout())
        .await?;

    let stats = host.registry().stats();
    info!(
        handled = summary.handled,
        failed = summary.failed,
        registrations = stats.registrations,
        verifications = stats.verifications,
        rejections = stats.rejections,
        admin_transfers = stats.admin_transfers,
        "Input closed, shutting down"
    );

    match gather_metrics() {
        Ok(metrics) => debug!(metrics = %metrics, "Final metrics"),
        Err(err) => warn!(error = %err, "Failed to gather metrics"),
    }

    Ok(())
}
