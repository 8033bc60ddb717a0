//! # Domain Invariants
//!
//! Business rules for the Vendor Registry.

use super::entities::{VendorRecord, VendorRegistration};
use super::errors::RegistryError;
use super::value_objects::Identity;

/// Invariant: only the current admin may adjudicate or transfer authority.
pub fn invariant_caller_is_admin(caller: &Identity, admin: &Identity) -> Result<(), RegistryError> {
    if caller != admin {
        return Err(RegistryError::Unauthorized);
    }
    Ok(())
}

/// Invariant: one record per identity.
pub fn invariant_not_registered(existing: Option<&VendorRecord>) -> Result<(), RegistryError> {
    if existing.is_some() {
        return Err(RegistryError::AlreadyRegistered);
    }
    Ok(())
}

/// Invariant: vendor names are non-empty.
pub fn invariant_name_present(registration: &VendorRegistration) -> Result<(), RegistryError> {
    if registration.name.is_empty() {
        return Err(RegistryError::InvalidName);
    }
    Ok(())
}

/// Invariant: adjudication targets an existing record.
///
/// Must only be evaluated after [`invariant_caller_is_admin`] so that
/// unauthorized callers cannot learn which identities are registered.
pub fn invariant_vendor_exists(record: Option<VendorRecord>) -> Result<VendorRecord, RegistryError> {
    record.ok_or(RegistryError::NotFound)
}
