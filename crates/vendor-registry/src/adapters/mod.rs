//! # Adapters
//!
//! Concrete implementations of the outbound ports.

pub mod clock;
pub mod event_log;
pub mod file_store;
pub mod memory_store;

pub use clock::{ManualClock, SystemClock};
pub use event_log::{InMemoryEventLog, TracingEventSink};
pub use file_store::FileKvStore;
pub use memory_store::InMemoryKvStore;
