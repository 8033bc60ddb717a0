//! # IPC Module
//!
//! Call envelope, result encoding and the dispatching handler.

pub mod handler;
pub mod payloads;

pub use handler::RegistryHandler;
pub use payloads::{AuthenticatedCall, CallReceipt, CallResponse, RegistryCall, ReturnValue};
