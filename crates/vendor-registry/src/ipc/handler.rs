//! # IPC Handler for the Vendor Registry
//!
//! Decodes authenticated calls, dispatches them to the registry in arrival
//! order and encodes receipts. The handler owns the registry, so calls are
//! serialized by construction.

use super::payloads::{AuthenticatedCall, CallReceipt, CallResponse, RegistryCall, ReturnValue};
use crate::domain::{Identity, RegistryError, VendorRegistration};
use crate::ports::VendorRegistryApi;
use tracing::{debug, warn};

/// Request/response front end for any [`VendorRegistryApi`].
pub struct RegistryHandler<R: VendorRegistryApi> {
    registry: R,
}

impl<R: VendorRegistryApi> RegistryHandler<R> {
    /// Wrap a registry.
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Borrow the wrapped registry.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Unwrap the registry.
    pub fn into_inner(self) -> R {
        self.registry
    }

    /// Execute one call on behalf of `caller`.
    pub fn dispatch(&mut self, caller: &Identity, call: RegistryCall) -> CallResponse {
        let result: Result<ReturnValue, RegistryError> = match call {
            RegistryCall::RegisterVendor {
                name,
                registration_number,
                category,
            } => self
                .registry
                .register_vendor(
                    caller,
                    VendorRegistration {
                        name,
                        registration_number,
                        category,
                    },
                )
                .map(|()| ReturnValue::Bool(true)),
            RegistryCall::VerifyVendor { vendor_id } => self
                .registry
                .verify_vendor(caller, &vendor_id)
                .map(|()| ReturnValue::Bool(true)),
            RegistryCall::RejectVendor { vendor_id } => self
                .registry
                .reject_vendor(caller, &vendor_id)
                .map(|()| ReturnValue::Bool(true)),
            RegistryCall::IsVendor { vendor_id } => {
                self.registry.is_vendor(&vendor_id).map(ReturnValue::Bool)
            }
            RegistryCall::IsVerifiedVendor { vendor_id } => self
                .registry
                .is_verified_vendor(&vendor_id)
                .map(ReturnValue::Bool),
            RegistryCall::GetVendorDetails { vendor_id } => self
                .registry
                .get_vendor_details(&vendor_id)
                .map(ReturnValue::Details),
            RegistryCall::TransferAdmin { new_admin } => self
                .registry
                .transfer_admin(caller, new_admin)
                .map(|()| ReturnValue::Bool(true)),
            RegistryCall::GetAdmin => Ok(ReturnValue::Identity(self.registry.admin().clone())),
        };
        result.into()
    }

    /// Execute an enveloped call and produce its receipt.
    pub fn handle(&mut self, envelope: AuthenticatedCall) -> CallReceipt {
        let method = envelope.call.method();
        let result = self.dispatch(&envelope.caller, envelope.call);
        debug!(
            correlation_id = %envelope.correlation_id,
            method,
            ok = result.is_ok(),
            "Handled registry call"
        );
        CallReceipt {
            correlation_id: envelope.correlation_id,
            result,
        }
    }

    /// Decode a JSON envelope, execute it, and encode the receipt.
    ///
    /// Undecodable input yields an `{"err": 400}` receipt with a nil
    /// correlation id; the registry is not touched.
    pub fn handle_json(&mut self, line: &str) -> CallReceipt {
        match serde_json::from_str::<AuthenticatedCall>(line) {
            Ok(envelope) => self.handle(envelope),
            Err(err) => {
                warn!(error = %err, "Malformed registry call");
                CallReceipt::malformed()
            }
        }
    }
}
