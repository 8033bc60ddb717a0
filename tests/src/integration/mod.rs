//! # Integration Tests
//!
//! End-to-end flows across the registry, the IPC handler and the host loop.

pub mod flows;
