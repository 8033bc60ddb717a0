//! # VR Node
//!
//! Host runtime for the Vendor Registry.
//!
//! ## Startup Sequence
//!
//! 1. Load telemetry and node configuration from the environment
//! 2. Validate that a deployer identity is present
//! 3. Open the store (file-backed when `VR_DATA_DIR` is set)
//! 4. Open the registry, deploying it on first start
//! 5. Serve JSON-line calls from stdin until end of input

pub mod config;
pub mod host;

pub use config::{ClockSource, ConfigError, NodeConfig};
pub use host::{build_host, Host, NodeRegistry, ServeSummary};
