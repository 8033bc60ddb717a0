//! Shared fixtures for integration tests and benchmarks.

use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;
use vendor_registry::{
    Identity, InMemoryEventLog, InMemoryKvStore, ManualClock, VendorRegistration, VendorRegistry,
};

/// Registry over in-memory adapters, with handles to the shared clock and log.
pub type MemoryRegistry =
    VendorRegistry<Arc<InMemoryKvStore>, Arc<ManualClock>, Arc<InMemoryEventLog>>;

/// A deployed in-memory registry plus its observable adapters.
pub struct TestRegistry {
    /// The registry under test.
    pub registry: MemoryRegistry,
    /// Backing store, shared with the registry.
    pub store: Arc<InMemoryKvStore>,
    /// Clock driving verification dates.
    pub clock: Arc<ManualClock>,
    /// Every event the registry published.
    pub events: Arc<InMemoryEventLog>,
}

/// Deploy a fresh registry administered by `admin`, clock starting at `start`.
pub fn deploy(admin: &str, start: u64) -> TestRegistry {
    let store = Arc::new(InMemoryKvStore::new());
    let clock = Arc::new(ManualClock::new(start));
    let events = Arc::new(InMemoryEventLog::new());
    let registry = VendorRegistry::deploy(
        Identity::new(admin),
        Arc::clone(&store),
        Arc::clone(&clock),
        Arc::clone(&events),
    )
    .expect("deploy on empty store");

    TestRegistry {
        registry,
        store,
        clock,
        events,
    }
}

/// The registration used throughout the reference scenario.
pub fn vendor_one() -> VendorRegistration {
    VendorRegistration::new("Vendor One", "REG123", "IT Services")
}

/// Random principal-like identity.
pub fn random_identity<R: Rng>(rng: &mut R) -> Identity {
    let suffix: String = rng
        .sample_iter(&Alphanumeric)
        .take(28)
        .map(char::from)
        .collect();
    Identity::new(format!("ST{}", suffix.to_uppercase()))
}

/// `count` distinct random identities.
pub fn distinct_identities<R: Rng>(rng: &mut R, count: usize) -> Vec<Identity> {
    let mut ids: Vec<Identity> = Vec::with_capacity(count);
    while ids.len() < count {
        let id = random_identity(rng);
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Random non-empty registration.
pub fn random_registration<R: Rng>(rng: &mut R) -> VendorRegistration {
    let n: u32 = rng.gen_range(1..100_000);
    let categories = ["IT Services", "Logistics", "Catering", "Consulting"];
    VendorRegistration::new(
        format!("Vendor {n}"),
        format!("REG{n:06}"),
        categories[rng.gen_range(0..categories.len())],
    )
}
