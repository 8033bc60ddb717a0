//! # Vendor Registry
//!
//! Permissioned registry that tracks third-party vendors through a
//! verification lifecycle: vendors register themselves, a single admin
//! verifies or rejects them.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Rules
//!
//! | Rule | Enforcement |
//! |------|-------------|
//! | One record per identity | `registerVendor` fails with code `1` |
//! | Admin-only adjudication | `verifyVendor`/`rejectVendor` fail with `403` |
//! | Authorization before existence | `403` is returned even for unknown targets |
//! | Single transferable admin | `transferAdmin` takes effect immediately |
//!
//! ## Module Structure
//!
//! ```text
//! vendor-registry/
//! ├── domain/      # Identity, VendorRecord, errors, invariants
//! ├── ports/       # VendorRegistryApi, KeyValueStore, Clock, EventSink
//! ├── adapters/    # In-memory and file stores, clocks, event sinks
//! ├── events.rs    # Audit events
//! ├── ipc/         # Call envelope, {ok}/{err} encoding, handler
//! └── service.rs   # VendorRegistry state machine
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ipc;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    FileKvStore, InMemoryEventLog, InMemoryKvStore, ManualClock, SystemClock, TracingEventSink,
};
pub use domain::{
    Identity, RegistryError, StorageKey, StoreError, Timestamp, VendorRecord, VendorRegistration,
    ERR_ALREADY_REGISTERED, ERR_INVALID_INPUT, ERR_NOT_FOUND, ERR_STORAGE, ERR_UNAUTHORIZED,
};
pub use events::RegistryEvent;
pub use ipc::{
    AuthenticatedCall, CallReceipt, CallResponse, RegistryCall, RegistryHandler, ReturnValue,
};
pub use ports::{Clock, EventSink, KeyValueStore, NullEventSink, VendorRegistryApi};
pub use service::{RegistryStats, VendorRegistry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
