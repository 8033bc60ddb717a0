//! # Registry Host
//!
//! Wires the registry to its adapters and serves JSON-line calls.
//!
//! One `AuthenticatedCall` per input line, one `CallReceipt` per output line,
//! strictly in arrival order. Blank lines are skipped. A line that is not
//! UTF-8 or not a call still gets a receipt (`{"err":400}`, nil correlation
//! id) and the session continues.
//!
//! With a manual clock, a mutating call's `now` field moves the clock before
//! the call executes, so verification dates follow host time.

use std::fmt::Display;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};
use vendor_registry::{
    AuthenticatedCall, CallReceipt, Clock, EventSink, FileKvStore, InMemoryKvStore, KeyValueStore,
    ManualClock, NullEventSink, RegistryHandler, SystemClock, TracingEventSink, VendorRegistry,
    VendorRegistryApi, ERR_INVALID_INPUT,
};
use vr_telemetry::{log_call_event, record_call, time_histogram, CALL_DURATION};

use crate::config::{ClockSource, NodeConfig};

/// Registry with adapters chosen at runtime.
pub type NodeRegistry =
    VendorRegistry<Arc<dyn KeyValueStore>, Arc<dyn Clock>, Arc<dyn EventSink>>;

/// Label used for lines that do not decode to a call.
const MALFORMED: &str = "malformed";

/// Totals for one serving session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ServeSummary {
    /// Lines answered with a receipt.
    pub handled: u64,
    /// Receipts carrying an error code.
    pub failed: u64,
}

/// A registry front end that executes calls in arrival order.
pub struct Host<R: VendorRegistryApi> {
    handler: RegistryHandler<R>,
    /// Set when the registry runs on host-driven time.
    clock: Option<Arc<ManualClock>>,
}

impl<R: VendorRegistryApi> Host<R> {
    /// Host on the registry's own clock; `now` fields are ignored.
    pub fn new(registry: R) -> Self {
        Self {
            handler: RegistryHandler::new(registry),
            clock: None,
        }
    }

    /// Drive `clock` from the `now` field of incoming calls.
    pub fn with_manual_clock(mut self, clock: Arc<ManualClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Borrow the registry.
    pub fn registry(&self) -> &R {
        self.handler.registry()
    }

    /// Execute one decoded line and record its metrics.
    pub fn process_line(&mut self, line: &str) -> CallReceipt {
        let _timer = time_histogram!(CALL_DURATION);
        let envelope = match serde_json::from_str::<AuthenticatedCall>(line) {
            Ok(envelope) => envelope,
            Err(err) => return reject_malformed(err),
        };

        self.apply_time(&envelope);
        let method = envelope.call.method();
        let caller = envelope.caller.clone();
        let receipt = self.handler.handle(envelope);
        if let Some(code) = receipt.result.err_code() {
            log_call_event!(debug, "Call returned error", method, caller, code);
        }
        record_call(method, receipt.result.err_code());
        receipt
    }

    fn apply_time(&self, envelope: &AuthenticatedCall) {
        let Some(now) = envelope.now else {
            return;
        };
        match &self.clock {
            Some(clock) if envelope.call.is_mutation() => clock.set(now),
            Some(_) => {}
            None => debug!(now, "Ignoring call time on system clock"),
        }
    }

    /// Serve calls from `input` until end of stream, writing receipts to `output`.
    pub async fn serve<I, O>(&mut self, mut input: I, mut output: O) -> Result<ServeSummary>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let mut summary = ServeSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .await
                .context("failed to read call")?;
            if read == 0 {
                break;
            }

            let receipt = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.process_line(line.trim()),
                Err(err) => reject_malformed(err),
            };
            summary.handled += 1;
            if !receipt.result.is_ok() {
                summary.failed += 1;
            }

            let mut encoded = serde_json::to_vec(&receipt).context("failed to encode receipt")?;
            encoded.push(b'\n');
            output
                .write_all(&encoded)
                .await
                .context("failed to write receipt")?;
            output.flush().await.context("failed to flush receipt")?;
        }

        Ok(summary)
    }
}

fn reject_malformed(reason: impl Display) -> CallReceipt {
    warn!(error = %reason, "Malformed registry call");
    record_call(MALFORMED, Some(ERR_INVALID_INPUT));
    CallReceipt::malformed()
}

/// Open the registry described by `config`, deploying it if the store is empty.
pub fn build_host(config: &NodeConfig) -> Result<Host<NodeRegistry>> {
    config.validate().context("invalid node configuration")?;

    let store: Arc<dyn KeyValueStore> = match &config.data_dir {
        Some(dir) => Arc::new(
            FileKvStore::open(dir)
                .with_context(|| format!("failed to open data directory {}", dir.display()))?,
        ),
        None => {
            warn!("VR_DATA_DIR not set, registry state will not survive restart");
            Arc::new(InMemoryKvStore::new())
        }
    };

    let manual = match config.clock {
        ClockSource::System => None,
        ClockSource::Manual(start) => Some(Arc::new(ManualClock::new(start))),
    };
    let clock: Arc<dyn Clock> = match &manual {
        Some(manual) => Arc::clone(manual) as Arc<dyn Clock>,
        None => Arc::new(SystemClock),
    };

    let events: Arc<dyn EventSink> = if config.emit_events {
        Arc::new(TracingEventSink)
    } else {
        Arc::new(NullEventSink)
    };

    let registry = VendorRegistry::open_or_deploy(config.admin.clone(), store, clock, events)
        .context("failed to open vendor registry")?;
    info!(admin = %registry.admin(), "Registry ready");

    let host = Host::new(registry);
    Ok(match manual {
        Some(clock) => host.with_manual_clock(clock),
        None => host,
    })
}
