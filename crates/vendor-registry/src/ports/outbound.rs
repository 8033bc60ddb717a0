//! # Outbound Ports
//!
//! Traits for external dependencies (persistence, time, event delivery).

use crate::domain::{StoreError, Timestamp};
use crate::events::RegistryEvent;
use std::sync::Arc;

/// Persistence substrate - outbound port.
///
/// A plain synchronous key-value mapping. Keys and values are opaque bytes;
/// encoding is the registry's concern.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<(), StoreError>;
}

/// Time source - outbound port.
pub trait Clock: Send + Sync {
    /// Current time as understood by the host.
    fn now(&self) -> Timestamp;
}

/// Event delivery - outbound port.
///
/// Receives one event per successful mutation. Delivery is fire-and-forget.
pub trait EventSink: Send + Sync {
    /// Publish an event.
    fn publish(&self, event: RegistryEvent);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn publish(&self, event: RegistryEvent) {
        (**self).publish(event)
    }
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn publish(&self, _event: RegistryEvent) {}
}
