//! # Vendor Registry Benchmarks
//!
//! | Path | Operation |
//! |------|-----------|
//! | Service | register, verify, lookup over the in-memory store |
//! | Handler | JSON envelope decode, dispatch, receipt encode |
//! | File store | register with snapshot rewrite |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use vendor_registry::{
    AuthenticatedCall, FileKvStore, Identity, ManualClock, NullEventSink, RegistryCall,
    RegistryHandler, VendorRegistry, VendorRegistryApi,
};
use vr_tests::fixtures::{deploy, distinct_identities, random_registration, vendor_one};

// ============================================================================
// Service
// ============================================================================

fn bench_service_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry-service");
    group.measurement_time(Duration::from_secs(5));

    for size in [100usize, 1_000] {
        let mut rng = StdRng::seed_from_u64(size as u64);
        let vendors = distinct_identities(&mut rng, size);
        let registrations: Vec<_> = (0..size).map(|_| random_registration(&mut rng)).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("register", size), &size, |b, _| {
            b.iter(|| {
                let mut t = deploy("ADMIN", 0);
                for (vendor, registration) in vendors.iter().zip(&registrations) {
                    t.registry
                        .register_vendor(vendor, registration.clone())
                        .unwrap();
                }
                black_box(t.registry.stats().registrations)
            })
        });

        let admin = Identity::new("ADMIN");
        let mut t = deploy("ADMIN", 0);
        for (vendor, registration) in vendors.iter().zip(&registrations) {
            t.registry
                .register_vendor(vendor, registration.clone())
                .unwrap();
        }

        group.bench_with_input(BenchmarkId::new("verify", size), &size, |b, _| {
            b.iter(|| {
                for vendor in &vendors {
                    t.registry.verify_vendor(&admin, vendor).unwrap();
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("is_verified_vendor", size), &size, |b, _| {
            b.iter(|| {
                vendors
                    .iter()
                    .filter(|v| t.registry.is_verified_vendor(v).unwrap())
                    .count()
            })
        });
    }

    group.finish();
}

// ============================================================================
// Handler
// ============================================================================

fn bench_handler_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry-handler");

    let t = deploy("A", 0);
    let mut handler = RegistryHandler::new(t.registry);
    handler.dispatch(&Identity::new("B"), RegistryCall::register(vendor_one()));

    let lookup = serde_json::to_string(&AuthenticatedCall::new(
        Identity::new("C"),
        RegistryCall::GetVendorDetails {
            vendor_id: Identity::new("B"),
        },
    ))
    .unwrap();
    let denied = serde_json::to_string(&AuthenticatedCall::new(
        Identity::new("C"),
        RegistryCall::VerifyVendor {
            vendor_id: Identity::new("B"),
        },
    ))
    .unwrap();

    group.bench_function("get_vendor_details_json", |b| {
        b.iter(|| black_box(handler.handle_json(black_box(&lookup))))
    });
    group.bench_function("unauthorized_verify_json", |b| {
        b.iter(|| black_box(handler.handle_json(black_box(&denied))))
    });
    group.bench_function("malformed_json", |b| {
        b.iter(|| black_box(handler.handle_json(black_box("{\"caller\":"))))
    });

    group.finish();
}

// ============================================================================
// File store
// ============================================================================

fn bench_file_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry-file-store");
    group.sample_size(20);

    group.bench_function("register_100_durable", |b| {
        b.iter(|| {
            let dir = tempfile::tempdir().unwrap();
            let store = FileKvStore::open(dir.path()).unwrap();
            let mut registry = VendorRegistry::deploy(
                Identity::new("ADMIN"),
                store,
                ManualClock::new(0),
                NullEventSink,
            )
            .unwrap();
            for i in 0..100 {
                registry
                    .register_vendor(&Identity::new(format!("V{i}")), vendor_one())
                    .unwrap();
            }
            black_box(registry.stats().registrations)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_service_operations,
    bench_handler_json,
    bench_file_store
);
criterion_main!(benches);
