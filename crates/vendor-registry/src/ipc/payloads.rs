//! # Call Payloads
//!
//! Wire schema for calls into the registry and their results.
//!
//! ## Result Encoding
//!
//! | Outcome | JSON |
//! |---------|------|
//! | Mutation succeeded | `{"ok": true}` |
//! | Read succeeded | `{"ok": <bool \| record \| null \| identity>}` |
//! | Failure | `{"err": <code>}` |
//!
//! The caller identity lives in the envelope only; call payloads never carry
//! a caller field.

use crate::domain::{
    Identity, RegistryError, Timestamp, VendorRecord, VendorRegistration, ERR_INVALID_INPUT,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Operation requested by the host, tagged by its stable method name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RegistryCall {
    /// `registerVendor(name, registrationNumber, category)`.
    RegisterVendor {
        /// Display name.
        name: String,
        /// Opaque registration identifier.
        registration_number: String,
        /// Opaque classification.
        category: String,
    },
    /// `verifyVendor(vendorId)`.
    VerifyVendor {
        /// Target vendor.
        vendor_id: Identity,
    },
    /// `rejectVendor(vendorId)`.
    RejectVendor {
        /// Target vendor.
        vendor_id: Identity,
    },
    /// `isVendor(vendorId)`.
    IsVendor {
        /// Identity to look up.
        vendor_id: Identity,
    },
    /// `isVerifiedVendor(vendorId)`.
    IsVerifiedVendor {
        /// Identity to look up.
        vendor_id: Identity,
    },
    /// `getVendorDetails(vendorId)`.
    GetVendorDetails {
        /// Identity to look up.
        vendor_id: Identity,
    },
    /// `transferAdmin(newAdmin)`.
    TransferAdmin {
        /// Incoming admin.
        new_admin: Identity,
    },
    /// `getAdmin()`.
    GetAdmin,
}

impl RegistryCall {
    /// Stable method name, as it appears on the wire.
    pub fn method(&self) -> &'static str {
        match self {
            Self::RegisterVendor { .. } => "registerVendor",
            Self::VerifyVendor { .. } => "verifyVendor",
            Self::RejectVendor { .. } => "rejectVendor",
            Self::IsVendor { .. } => "isVendor",
            Self::IsVerifiedVendor { .. } => "isVerifiedVendor",
            Self::GetVendorDetails { .. } => "getVendorDetails",
            Self::TransferAdmin { .. } => "transferAdmin",
            Self::GetAdmin => "getAdmin",
        }
    }

    /// Whether the call can change registry state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::RegisterVendor { .. }
                | Self::VerifyVendor { .. }
                | Self::RejectVendor { .. }
                | Self::TransferAdmin { .. }
        )
    }

    /// Build a `registerVendor` call.
    pub fn register(registration: VendorRegistration) -> Self {
        Self::RegisterVendor {
            name: registration.name,
            registration_number: registration.registration_number,
            category: registration.category,
        }
    }
}

/// Value carried by a successful call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReturnValue {
    /// Mutation acknowledgement or boolean lookup.
    Bool(bool),
    /// Admin identity.
    Identity(Identity),
    /// Vendor record lookup (`null` when absent).
    Details(Option<VendorRecord>),
}

/// Outcome of a call: `{"ok": value}` or `{"err": code}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallResponse {
    /// Success.
    Ok(ReturnValue),
    /// Failure with a wire code.
    Err(u32),
}

impl CallResponse {
    /// `{"ok": true}`.
    pub fn ok() -> Self {
        Self::Ok(ReturnValue::Bool(true))
    }

    /// Whether the call succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Error code, if the call failed.
    pub fn err_code(&self) -> Option<u32> {
        match self {
            Self::Ok(_) => None,
            Self::Err(code) => Some(*code),
        }
    }
}

impl From<Result<ReturnValue, RegistryError>> for CallResponse {
    fn from(result: Result<ReturnValue, RegistryError>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(err) => Self::Err(err.code()),
        }
    }
}

/// Call envelope supplied by the host.
///
/// `caller` is trusted: authentication happens before the call reaches the
/// registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedCall {
    /// Verified caller identity.
    pub caller: Identity,
    /// Correlates the receipt with this call.
    pub correlation_id: Uuid,
    /// Requested operation.
    pub call: RegistryCall,
    /// Host time (e.g. block height) at which the call executes.
    ///
    /// Only hosts running a manual clock read this; absent means "unchanged".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<Timestamp>,
}

impl AuthenticatedCall {
    /// Wrap `call` with a fresh correlation id.
    pub fn new(caller: Identity, call: RegistryCall) -> Self {
        Self {
            caller,
            correlation_id: Uuid::new_v4(),
            call,
            now: None,
        }
    }

    /// Attach the host time the call executes at.
    pub fn at(mut self, now: Timestamp) -> Self {
        self.now = Some(now);
        self
    }
}

/// Reply to an [`AuthenticatedCall`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallReceipt {
    /// Copied from the call.
    pub correlation_id: Uuid,
    /// Call outcome.
    pub result: CallResponse,
}

impl CallReceipt {
    /// Receipt for input that did not decode to a call.
    pub fn malformed() -> Self {
        Self {
            correlation_id: Uuid::nil(),
            result: CallResponse::Err(ERR_INVALID_INPUT),
        }
    }
}
