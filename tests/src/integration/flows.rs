//! # Registry Lifecycle Flows
//!
//! Drives the registry through the public API the way a host would:
//!
//! 1. **Registration**: vendors register themselves exactly once
//! 2. **Adjudication**: only the admin verifies or rejects, authorization before existence
//! 3. **Admin transfer**: rights move instantly and completely
//! 4. **Audit trail**: one event per successful mutation, none on failure

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use vendor_registry::{
        CallResponse, Identity, RegistryCall, RegistryError, RegistryEvent, RegistryHandler,
        ReturnValue, VendorRegistryApi,
    };

    use crate::fixtures::{deploy, distinct_identities, random_registration, vendor_one};

    // =============================================================================
    // REFERENCE SCENARIO
    // =============================================================================

    /// admin=A, B registers, B re-registers, A verifies B, C and D get 403 and 404.
    #[test]
    fn test_reference_scenario() {
        let t = deploy("A", 1_700_000_000);
        let mut handler = RegistryHandler::new(t.registry);
        let (a, b, c, d) = (
            Identity::new("A"),
            Identity::new("B"),
            Identity::new("C"),
            Identity::new("D"),
        );

        assert_eq!(
            handler.dispatch(&b, RegistryCall::register(vendor_one())),
            CallResponse::ok()
        );
        assert_eq!(
            handler.dispatch(&b, RegistryCall::register(vendor_one())),
            CallResponse::Err(1)
        );
        assert_eq!(
            handler.dispatch(&a, RegistryCall::VerifyVendor { vendor_id: b.clone() }),
            CallResponse::ok()
        );

        let details = handler.registry().get_vendor_details(&b).unwrap().unwrap();
        assert!(details.verified);
        assert_eq!(details.verification_date, Some(1_700_000_000));
        assert_eq!(details.name, "Vendor One");

        assert_eq!(
            handler.dispatch(&c, RegistryCall::VerifyVendor { vendor_id: b.clone() }),
            CallResponse::Err(403)
        );
        assert_eq!(
            handler.dispatch(&a, RegistryCall::VerifyVendor { vendor_id: d }),
            CallResponse::Err(404)
        );
    }

    // =============================================================================
    // REGISTRATION
    // =============================================================================

    #[test]
    fn test_random_vendors_register_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut t = deploy("ADMIN", 10);
        let vendors = distinct_identities(&mut rng, 32);

        for vendor in &vendors {
            assert!(!t.registry.is_vendor(vendor).unwrap());
            let registration = random_registration(&mut rng);
            t.registry
                .register_vendor(vendor, registration.clone())
                .unwrap();

            assert!(t.registry.is_vendor(vendor).unwrap());
            assert!(!t.registry.is_verified_vendor(vendor).unwrap());

            let second = random_registration(&mut rng);
            assert_eq!(
                t.registry.register_vendor(vendor, second),
                Err(RegistryError::AlreadyRegistered)
            );
            let record = t.registry.get_vendor_details(vendor).unwrap().unwrap();
            assert_eq!(record.name, registration.name);
            assert_eq!(record.registration_number, registration.registration_number);
        }

        assert_eq!(t.registry.stats().registrations, 32);
        assert_eq!(t.registry.stats().rejected_calls, 32);
        assert_eq!(t.store.len(), 33);
    }

    // =============================================================================
    // ADJUDICATION
    // =============================================================================

    #[test]
    fn test_non_admin_never_mutates() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut t = deploy("ADMIN", 10);
        let ids = distinct_identities(&mut rng, 20);
        let (registered, strangers) = ids.split_at(10);

        for vendor in registered {
            t.registry
                .register_vendor(vendor, random_registration(&mut rng))
                .unwrap();
        }
        let events_before = t.events.len();

        for caller in strangers {
            let target = if rng.gen_bool(0.5) {
                &registered[rng.gen_range(0..registered.len())]
            } else {
                &strangers[rng.gen_range(0..strangers.len())]
            };
            assert_eq!(
                t.registry.verify_vendor(caller, target),
                Err(RegistryError::Unauthorized)
            );
            assert_eq!(
                t.registry.reject_vendor(caller, target),
                Err(RegistryError::Unauthorized)
            );
            assert_eq!(
                t.registry.transfer_admin(caller, caller.clone()),
                Err(RegistryError::Unauthorized)
            );
        }

        assert_eq!(t.events.len(), events_before);
        assert_eq!(t.registry.admin().as_str(), "ADMIN");
        for vendor in registered {
            assert!(!t.registry.is_verified_vendor(vendor).unwrap());
        }
    }

    #[test]
    fn test_verify_reject_cycle() {
        let mut t = deploy("A", 100);
        let (a, v) = (Identity::new("A"), Identity::new("V"));
        t.registry.register_vendor(&v, vendor_one()).unwrap();

        t.registry.verify_vendor(&a, &v).unwrap();
        assert!(t.registry.is_verified_vendor(&v).unwrap());

        t.clock.set(200);
        t.registry.reject_vendor(&a, &v).unwrap();
        assert!(!t.registry.is_verified_vendor(&v).unwrap());
        let record = t.registry.get_vendor_details(&v).unwrap().unwrap();
        assert_eq!(record.verification_date, Some(100));

        t.clock.set(300);
        t.registry.verify_vendor(&a, &v).unwrap();
        let record = t.registry.get_vendor_details(&v).unwrap().unwrap();
        assert!(record.verified);
        assert_eq!(record.verification_date, Some(300));

        assert_eq!(t.registry.stats().verifications, 2);
        assert_eq!(t.registry.stats().rejections, 1);
    }

    #[test]
    fn test_admin_unknown_target_is_not_found() {
        let mut t = deploy("A", 0);
        let a = Identity::new("A");
        let ghost = Identity::new("GHOST");

        assert_eq!(
            t.registry.verify_vendor(&a, &ghost),
            Err(RegistryError::NotFound)
        );
        assert_eq!(
            t.registry.reject_vendor(&a, &ghost),
            Err(RegistryError::NotFound)
        );
        assert_eq!(t.registry.get_vendor_details(&ghost).unwrap(), None);
    }

    // =============================================================================
    // ADMIN TRANSFER
    // =============================================================================

    #[test]
    fn test_transfer_chain() {
        let mut t = deploy("A0", 5);
        let v = Identity::new("V");
        t.registry.register_vendor(&v, vendor_one()).unwrap();

        let admins: Vec<Identity> = (0..5).map(|i| Identity::new(format!("A{i}"))).collect();
        for pair in admins.windows(2) {
            let (old, new) = (&pair[0], &pair[1]);
            t.registry.transfer_admin(old, new.clone()).unwrap();

            assert_eq!(
                t.registry.verify_vendor(old, &v),
                Err(RegistryError::Unauthorized)
            );
            assert!(t.registry.verify_vendor(new, &v).is_ok());
        }

        assert_eq!(t.registry.admin().as_str(), "A4");
        assert_eq!(t.registry.stats().admin_transfers, 4);
    }

    #[test]
    fn test_vendor_can_become_admin() {
        let mut t = deploy("A", 0);
        let (a, v) = (Identity::new("A"), Identity::new("V"));
        t.registry.register_vendor(&v, vendor_one()).unwrap();
        t.registry.transfer_admin(&a, v.clone()).unwrap();

        t.registry.verify_vendor(&v, &v).unwrap();
        assert!(t.registry.is_verified_vendor(&v).unwrap());
    }

    // =============================================================================
    // AUDIT TRAIL
    // =============================================================================

    #[test]
    fn test_event_stream_matches_successes() {
        let mut t = deploy("A", 50);
        let (a, b, c) = (Identity::new("A"), Identity::new("B"), Identity::new("C"));

        t.registry.register_vendor(&b, vendor_one()).unwrap();
        let _ = t.registry.register_vendor(&b, vendor_one());
        let _ = t.registry.verify_vendor(&c, &b);
        t.registry.verify_vendor(&a, &b).unwrap();
        t.clock.advance(10);
        t.registry.reject_vendor(&a, &b).unwrap();
        t.registry.transfer_admin(&a, c.clone()).unwrap();
        let _ = t.registry.transfer_admin(&a, a.clone());

        let kinds: Vec<&str> = t.events.events().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "vendor_registered",
                "vendor_verified",
                "vendor_rejected",
                "admin_transferred"
            ]
        );

        assert_eq!(
            t.events.events()[2],
            RegistryEvent::VendorRejected {
                vendor: b,
                by: a.clone(),
                at: 60,
            }
        );
        assert_eq!(
            t.events.events()[3],
            RegistryEvent::AdminTransferred {
                previous: a,
                new_admin: c,
                at: 60,
            }
        );
    }

    #[test]
    fn test_get_admin_call() {
        let t = deploy("A", 0);
        let mut handler = RegistryHandler::new(t.registry);
        assert_eq!(
            handler.dispatch(&Identity::new("anyone"), RegistryCall::GetAdmin),
            CallResponse::Ok(ReturnValue::Identity(Identity::new("A")))
        );
    }
}
