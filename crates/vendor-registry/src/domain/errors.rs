//! # Domain Errors
//!
//! Error types for the Vendor Registry.
//!
//! Every error maps to a stable wire code. Codes `1`, `403` and `404` are part
//! of the contract surface and must never change.

use thiserror::Error;

/// Wire code: caller already has a vendor record.
pub const ERR_ALREADY_REGISTERED: u32 = 1;
/// Wire code: malformed input (empty vendor name, undecodable call).
pub const ERR_INVALID_INPUT: u32 = 400;
/// Wire code: caller is not the current admin.
pub const ERR_UNAUTHORIZED: u32 = 403;
/// Wire code: target identity has no vendor record.
pub const ERR_NOT_FOUND: u32 = 404;
/// Wire code: persistence substrate fault.
pub const ERR_STORAGE: u32 = 500;

/// Vendor Registry error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Caller already owns a vendor record.
    #[error("Vendor already registered")]
    AlreadyRegistered,

    /// Vendor name must not be empty.
    #[error("Vendor name must not be empty")]
    InvalidName,

    /// Caller lacks admin rights for an admin-only operation.
    #[error("Unauthorized: caller is not the registry admin")]
    Unauthorized,

    /// Target identity has no vendor record.
    #[error("Vendor not found")]
    NotFound,

    /// The persistence substrate failed or holds undecodable data.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RegistryError {
    /// Stable wire code for this error.
    pub fn code(&self) -> u32 {
        match self {
            Self::AlreadyRegistered => ERR_ALREADY_REGISTERED,
            Self::InvalidName => ERR_INVALID_INPUT,
            Self::Unauthorized => ERR_UNAUTHORIZED,
            Self::NotFound => ERR_NOT_FOUND,
            Self::Storage(_) => ERR_STORAGE,
        }
    }
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Errors raised by key-value store adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be encoded or decoded.
    #[error("Codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// Data directory is held by another writer.
    #[error("Store locked by another process: {0}")]
    Locked(String),
}
