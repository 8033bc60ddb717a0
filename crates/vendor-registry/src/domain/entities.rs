//! # Domain Entities
//!
//! Core entities for the Vendor Registry.

use super::value_objects::Timestamp;
use serde::{Deserialize, Serialize};

/// Parameters supplied by a vendor when registering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRegistration {
    /// Display name (must be non-empty).
    pub name: String,
    /// Opaque registration identifier, not checked for uniqueness.
    pub registration_number: String,
    /// Opaque classification.
    pub category: String,
}

impl VendorRegistration {
    /// Create registration parameters.
    pub fn new(
        name: impl Into<String>,
        registration_number: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            registration_number: registration_number.into(),
            category: category.into(),
        }
    }
}

/// A registered vendor.
///
/// Wire keys follow the contract tuple layout (`registration-number`,
/// `verification-date`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VendorRecord {
    /// Display name.
    pub name: String,
    /// Opaque registration identifier.
    pub registration_number: String,
    /// Opaque classification.
    pub category: String,
    /// Whether the admin has verified this vendor.
    pub verified: bool,
    /// Time the vendor was last verified; `None` until first verification.
    pub verification_date: Option<Timestamp>,
}

impl VendorRecord {
    /// Fresh, unverified record.
    pub fn new(registration: VendorRegistration) -> Self {
        Self {
            name: registration.name,
            registration_number: registration.registration_number,
            category: registration.category,
            verified: false,
            verification_date: None,
        }
    }

    /// Mark verified at `now`. Re-verifying refreshes the date.
    pub fn mark_verified(&mut self, now: Timestamp) {
        self.verified = true;
        self.verification_date = Some(now);
    }

    /// Clear the verified flag. The last verification date is kept.
    pub fn mark_rejected(&mut self) {
        self.verified = false;
    }
}
