//! # Event Schema
//!
//! Events emitted after successful registry mutations.
//!
//! The registry does not retain these; they form the external audit trail.
//! In particular `VendorRejected` is the only way to tell a rejected vendor
//! apart from one that was never adjudicated, since both records read
//! `verified = false`.

use crate::domain::{Identity, Timestamp};
use serde::{Deserialize, Serialize};

/// Registry event payloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RegistryEvent {
    /// A new vendor record was created.
    VendorRegistered {
        /// Vendor identity (the registering caller).
        vendor: Identity,
        /// Registered name.
        name: String,
        /// Registered identifier.
        registration_number: String,
        /// Registered category.
        category: String,
        /// Clock time of registration.
        at: Timestamp,
    },

    /// The admin verified a vendor.
    VendorVerified {
        /// Target vendor.
        vendor: Identity,
        /// Acting admin.
        by: Identity,
        /// Clock time, also stored as the record's verification date.
        at: Timestamp,
    },

    /// The admin rejected a vendor.
    VendorRejected {
        /// Target vendor.
        vendor: Identity,
        /// Acting admin.
        by: Identity,
        /// Clock time of the rejection.
        at: Timestamp,
    },

    /// Admin rights moved to a new identity.
    AdminTransferred {
        /// Outgoing admin.
        previous: Identity,
        /// Incoming admin.
        new_admin: Identity,
        /// Clock time of the transfer.
        at: Timestamp,
    },
}

impl RegistryEvent {
    /// Short event name, used as a log and metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::VendorRegistered { .. } => "vendor_registered",
            Self::VendorVerified { .. } => "vendor_verified",
            Self::VendorRejected { .. } => "vendor_rejected",
            Self::AdminTransferred { .. } => "admin_transferred",
        }
    }

    /// Vendor the event concerns, if any.
    pub fn vendor(&self) -> Option<&Identity> {
        match self {
            Self::VendorRegistered { vendor, .. }
            | Self::VendorVerified { vendor, .. }
            | Self::VendorRejected { vendor, .. } => Some(vendor),
            Self::AdminTransferred { .. } => None,
        }
    }
}
