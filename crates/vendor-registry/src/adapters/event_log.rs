//! Event Sink Adapters
//!
//! `InMemoryEventLog` keeps every event for inspection. `TracingEventSink`
//! forwards events to the structured log.

use crate::events::RegistryEvent;
use crate::ports::EventSink;
use parking_lot::Mutex;
use tracing::{info, warn};

/// Append-only in-memory event log.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: Mutex<Vec<RegistryEvent>>,
}

impl InMemoryEventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events, oldest first.
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.lock().clone()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether no events were recorded.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for InMemoryEventLog {
    fn publish(&self, event: RegistryEvent) {
        self.events.lock().push(event);
    }
}

/// Emits each event as an `info` log line with a JSON payload.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: RegistryEvent) {
        let vendor = event.vendor().map_or("-", |id| id.as_str());
        match serde_json::to_string(&event) {
            Ok(payload) => info!(
                subsystem = "vendor-registry",
                event = event.kind(),
                vendor,
                payload = %payload,
                "Registry event"
            ),
            Err(err) => warn!(
                subsystem = "vendor-registry",
                event = event.kind(),
                vendor,
                error = %err,
                "Registry event could not be encoded"
            ),
        }
    }
}
