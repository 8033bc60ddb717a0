//! # Domain Value Objects
//!
//! Immutable value types for the Vendor Registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Point in time as supplied by the host clock (Unix seconds or block height).
pub type Timestamp = u64;

/// Externally authenticated principal.
///
/// Opaque address-like token. Two identities are equal only when their bytes
/// are identical; no normalization is applied.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wrap a principal token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Identity {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Key under which registry state lives in the key-value store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageKey {
    /// The single admin identity.
    Admin,
    /// A vendor record, keyed by the vendor's identity.
    Vendor(Identity),
}

impl StorageKey {
    /// Binary key used by the store.
    pub fn encode(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }
}
