//! # Vendor Registry Service
//!
//! The registry state machine, wired to its outbound ports.
//!
//! ## Atomicity
//!
//! Every mutation performs its checks, then exactly one store write (a vendor
//! record or the admin value). Owned state and stats change only after that
//! write succeeds, and the event is published last. A failed call therefore
//! leaves the store, the admin field and the event stream untouched.
//!
//! ## Check Ordering
//!
//! Admin-only operations check authorization before existence, so a
//! non-admin caller always gets `Unauthorized` and learns nothing about
//! which identities are registered.

use crate::domain::{
    invariant_caller_is_admin, invariant_name_present, invariant_not_registered,
    invariant_vendor_exists, Identity, RegistryError, StorageKey, VendorRecord,
    VendorRegistration,
};
use crate::events::RegistryEvent;
use crate::ports::{Clock, EventSink, KeyValueStore, VendorRegistryApi};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Counters for calls handled by one registry instance.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    /// Successful registrations.
    pub registrations: u64,
    /// Successful verifications.
    pub verifications: u64,
    /// Successful rejections.
    pub rejections: u64,
    /// Successful admin transfers.
    pub admin_transfers: u64,
    /// Mutations that returned an error.
    pub rejected_calls: u64,
}

/// The Vendor Registry.
pub struct VendorRegistry<S: KeyValueStore, C: Clock, E: EventSink> {
    /// Current admin, mirrored from the store.
    admin: Identity,
    /// Persistence substrate.
    store: S,
    /// Source of verification timestamps.
    clock: C,
    /// Audit event delivery.
    events: E,
    /// Per-instance counters.
    stats: RegistryStats,
}

impl<S: KeyValueStore, C: Clock, E: EventSink> VendorRegistry<S, C, E> {
    /// Initialize a fresh store with `deployer` as admin.
    ///
    /// Fails if the store already holds registry state.
    pub fn deploy(deployer: Identity, store: S, clock: C, events: E) -> Result<Self, RegistryError> {
        if load::<Identity>(&store, &StorageKey::Admin)?.is_some() {
            return Err(RegistryError::Storage(
                "registry already deployed in this store".to_string(),
            ));
        }
        save(&store, &StorageKey::Admin, &deployer)?;

        info!(admin = %deployer, "Vendor registry deployed");
        Ok(Self {
            admin: deployer,
            store,
            clock,
            events,
            stats: RegistryStats::default(),
        })
    }

    /// Resume from a store that already holds registry state.
    pub fn open(store: S, clock: C, events: E) -> Result<Self, RegistryError> {
        let admin = load::<Identity>(&store, &StorageKey::Admin)?.ok_or_else(|| {
            RegistryError::Storage("registry not deployed in this store".to_string())
        })?;

        info!(admin = %admin, "Vendor registry opened");
        Ok(Self {
            admin,
            store,
            clock,
            events,
            stats: RegistryStats::default(),
        })
    }

    /// Open if the store is initialized, otherwise deploy with `deployer`.
    pub fn open_or_deploy(
        deployer: Identity,
        store: S,
        clock: C,
        events: E,
    ) -> Result<Self, RegistryError> {
        match load::<Identity>(&store, &StorageKey::Admin)? {
            Some(_) => Self::open(store, clock, events),
            None => Self::deploy(deployer, store, clock, events),
        }
    }

    /// Counters since this instance was created.
    pub fn stats(&self) -> &RegistryStats {
        &self.stats
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn load_vendor(&self, id: &Identity) -> Result<Option<VendorRecord>, RegistryError> {
        load(&self.store, &StorageKey::Vendor(id.clone()))
    }

    fn save_vendor(&self, id: &Identity, record: &VendorRecord) -> Result<(), RegistryError> {
        save(&self.store, &StorageKey::Vendor(id.clone()), record)
    }

    fn tally<T>(&mut self, result: Result<T, RegistryError>) -> Result<T, RegistryError> {
        if let Err(err) = &result {
            self.stats.rejected_calls += 1;
            match err {
                RegistryError::Unauthorized => warn!(code = err.code(), "Rejected non-admin call"),
                _ => debug!(code = err.code(), error = %err, "Call failed"),
            }
        }
        result
    }

    fn try_register(
        &mut self,
        caller: &Identity,
        registration: VendorRegistration,
    ) -> Result<(), RegistryError> {
        invariant_not_registered(self.load_vendor(caller)?.as_ref())?;
        invariant_name_present(&registration)?;

        let record = VendorRecord::new(registration);
        self.save_vendor(caller, &record)?;
        self.stats.registrations += 1;

        info!(vendor = %caller, name = %record.name, "Vendor registered");
        self.events.publish(RegistryEvent::VendorRegistered {
            vendor: caller.clone(),
            name: record.name,
            registration_number: record.registration_number,
            category: record.category,
            at: self.clock.now(),
        });
        Ok(())
    }

    fn try_verify(&mut self, caller: &Identity, vendor: &Identity) -> Result<(), RegistryError> {
        invariant_caller_is_admin(caller, &self.admin)?;
        let mut record = invariant_vendor_exists(self.load_vendor(vendor)?)?;

        let now = self.clock.now();
        record.mark_verified(now);
        self.save_vendor(vendor, &record)?;
        self.stats.verifications += 1;

        info!(vendor = %vendor, at = now, "Vendor verified");
        self.events.publish(RegistryEvent::VendorVerified {
            vendor: vendor.clone(),
            by: caller.clone(),
            at: now,
        });
        Ok(())
    }

    fn try_reject(&mut self, caller: &Identity, vendor: &Identity) -> Result<(), RegistryError> {
        invariant_caller_is_admin(caller, &self.admin)?;
        let mut record = invariant_vendor_exists(self.load_vendor(vendor)?)?;

        record.mark_rejected();
        self.save_vendor(vendor, &record)?;
        self.stats.rejections += 1;

        info!(vendor = %vendor, "Vendor rejected");
        self.events.publish(RegistryEvent::VendorRejected {
            vendor: vendor.clone(),
            by: caller.clone(),
            at: self.clock.now(),
        });
        Ok(())
    }

    fn try_transfer(&mut self, caller: &Identity, new_admin: Identity) -> Result<(), RegistryError> {
        invariant_caller_is_admin(caller, &self.admin)?;

        save(&self.store, &StorageKey::Admin, &new_admin)?;
        let previous = std::mem::replace(&mut self.admin, new_admin);
        self.stats.admin_transfers += 1;

        info!(previous = %previous, new_admin = %self.admin, "Admin transferred");
        self.events.publish(RegistryEvent::AdminTransferred {
            previous,
            new_admin: self.admin.clone(),
            at: self.clock.now(),
        });
        Ok(())
    }
}

impl<S: KeyValueStore, C: Clock, E: EventSink> VendorRegistryApi for VendorRegistry<S, C, E> {
    #[instrument(skip_all, fields(caller = %caller))]
    fn register_vendor(
        &mut self,
        caller: &Identity,
        registration: VendorRegistration,
    ) -> Result<(), RegistryError> {
        let result = self.try_register(caller, registration);
        self.tally(result)
    }

    #[instrument(skip_all, fields(caller = %caller, vendor = %vendor))]
    fn verify_vendor(&mut self, caller: &Identity, vendor: &Identity) -> Result<(), RegistryError> {
        let result = self.try_verify(caller, vendor);
        self.tally(result)
    }

    #[instrument(skip_all, fields(caller = %caller, vendor = %vendor))]
    fn reject_vendor(&mut self, caller: &Identity, vendor: &Identity) -> Result<(), RegistryError> {
        let result = self.try_reject(caller, vendor);
        self.tally(result)
    }

    fn is_vendor(&self, id: &Identity) -> Result<bool, RegistryError> {
        Ok(self.load_vendor(id)?.is_some())
    }

    fn is_verified_vendor(&self, id: &Identity) -> Result<bool, RegistryError> {
        Ok(self.load_vendor(id)?.is_some_and(|record| record.verified))
    }

    fn get_vendor_details(&self, id: &Identity) -> Result<Option<VendorRecord>, RegistryError> {
        debug!(vendor = %id, "Vendor details lookup");
        self.load_vendor(id)
    }

    #[instrument(skip_all, fields(caller = %caller, new_admin = %new_admin))]
    fn transfer_admin(
        &mut self,
        caller: &Identity,
        new_admin: Identity,
    ) -> Result<(), RegistryError> {
        let result = self.try_transfer(caller, new_admin);
        self.tally(result)
    }

    fn admin(&self) -> &Identity {
        &self.admin
    }
}

fn load<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &StorageKey,
) -> Result<Option<T>, RegistryError> {
    let key = key.encode().map_err(|e| RegistryError::Storage(e.to_string()))?;
    store
        .get(&key)?
        .map(|bytes| bincode::deserialize(&bytes))
        .transpose()
        .map_err(|e| RegistryError::Storage(e.to_string()))
}

fn save<T: Serialize>(
    store: &impl KeyValueStore,
    key: &StorageKey,
    value: &T,
) -> Result<(), RegistryError> {
    let key = key.encode().map_err(|e| RegistryError::Storage(e.to_string()))?;
    let bytes = bincode::serialize(value).map_err(|e| RegistryError::Storage(e.to_string()))?;
    store.set(key, bytes)?;
    Ok(())
}
