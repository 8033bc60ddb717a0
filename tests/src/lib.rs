//! # Vendor Registry Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # End-to-end flows across registry, handler and host
//!     ├── flows.rs      # Lifecycle, authorization and admin transfer
//!     ├── persistence.rs# File store reopen and deploy/open rules
//!     └── wire.rs       # JSON envelope and receipt encodings
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p vr-tests
//! cargo test -p vr-tests integration::flows
//!
//! # Benchmarks
//! cargo bench -p vr-tests
//! ```

pub mod fixtures;
pub mod integration;
