//! # Inbound Ports
//!
//! API trait defining what the Vendor Registry can do.
//!
//! Mutations take `&mut self`: the host serializes calls, and the borrow
//! checker guarantees a single writer per registry value. Reads return
//! `Result` only so that substrate faults surface instead of being masked.

use crate::domain::{Identity, RegistryError, VendorRecord, VendorRegistration};

/// Vendor Registry API - inbound port.
pub trait VendorRegistryApi {
    /// Register `caller` as a vendor.
    fn register_vendor(
        &mut self,
        caller: &Identity,
        registration: VendorRegistration,
    ) -> Result<(), RegistryError>;

    /// Mark `vendor` verified. Admin only.
    fn verify_vendor(&mut self, caller: &Identity, vendor: &Identity) -> Result<(), RegistryError>;

    /// Clear `vendor`'s verified flag. Admin only.
    fn reject_vendor(&mut self, caller: &Identity, vendor: &Identity) -> Result<(), RegistryError>;

    /// Whether `id` has a vendor record.
    fn is_vendor(&self, id: &Identity) -> Result<bool, RegistryError>;

    /// Whether `id` has a record and it is verified.
    fn is_verified_vendor(&self, id: &Identity) -> Result<bool, RegistryError>;

    /// Full record for `id`, if any.
    fn get_vendor_details(&self, id: &Identity) -> Result<Option<VendorRecord>, RegistryError>;

    /// Hand admin rights to `new_admin`. Admin only.
    fn transfer_admin(&mut self, caller: &Identity, new_admin: Identity)
        -> Result<(), RegistryError>;

    /// Current admin identity.
    fn admin(&self) -> &Identity;
}
