//! # Rotation Flows
//!
//! Badge rotation end to end:
//!
//! ```text
//! advance(1) ──→ send A→B ──→ log ──→ verify (ts 1 key)   ✓
//!      │
//! advance(2) ──→ A's new key opens the ts 1 record?       ✗
//!            ──→ verify still replays with the ts 1 key   ✓
//! ```

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use sha3::{Digest, Sha3_256};

    use fleet_runtime::{FleetConfig, FleetContainer, FleetRuntime, RuntimeError};
    use qf_01_fleet_identity::{
        badge_preimage, fleet_roster, BadgeGenerator, FleetClock, FleetIdentityApi,
        FleetIdentityService, IdentityError, IdentityLedger, IdentityStore, InMemoryIdentityStore,
        SequenceSeedSource, PREIMAGE_LEN,
    };
    use qf_02_secure_channel::{SecureChannel, SecureChannelApi};
    use qf_03_communication_audit::{
        CommunicationAuditApi, InMemoryCommunicationStore, VerificationOutcome,
    };
    use shared_crypto::HashAlgorithm;
    use shared_types::{AgentSerial, BadgeSeed, Identity, StoreError, Timeslot};

    // =========================================================================
    // FIXTURES
    // =========================================================================

    fn config(num_agents: usize) -> FleetConfig {
        FleetConfig {
            system_id: "ROT".to_string(),
            num_agents,
            timeslot_secs: 1,
            ..FleetConfig::default()
        }
    }

    fn deterministic_runtime(num_agents: usize) -> FleetRuntime {
        let container = FleetContainer::with_backends(
            config(num_agents),
            Arc::new(InMemoryIdentityStore::new()),
            Arc::new(InMemoryCommunicationStore::new()),
            Arc::new(SequenceSeedSource::new()),
        )
        .unwrap();
        FleetRuntime::from_container(container)
    }

    fn serial(s: &str) -> AgentSerial {
        AgentSerial::new(s).unwrap()
    }

    /// Identity store that rejects the Nth `put` and accepts everything else.
    struct FailingPutStore {
        inner: InMemoryIdentityStore,
        puts: AtomicUsize,
        fail_on: usize,
    }

    impl FailingPutStore {
        fn new(fail_on: usize) -> Self {
            Self {
                inner: InMemoryIdentityStore::new(),
                puts: AtomicUsize::new(0),
                fail_on,
            }
        }
    }

    #[async_trait]
    impl IdentityStore for FailingPutStore {
        async fn put(&self, identity: Identity) -> Result<(), StoreError> {
            if self.puts.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on {
                return Err(StoreError::Unavailable("disk full".into()));
            }
            self.inner.put(identity).await
        }

        async fn get(
            &self,
            serial: &AgentSerial,
            timeslot: Timeslot,
        ) -> Result<Option<Identity>, StoreError> {
            self.inner.get(serial, timeslot).await
        }

        async fn latest(&self, serial: &AgentSerial) -> Result<Option<Identity>, StoreError> {
            self.inner.latest(serial).await
        }

        async fn history(&self, serial: &AgentSerial) -> Result<Vec<Identity>, StoreError> {
            self.inner.history(serial).await
        }

        async fn list_by_timeslot(&self, timeslot: Timeslot) -> Result<Vec<Identity>, StoreError> {
            self.inner.list_by_timeslot(timeslot).await
        }

        async fn count(&self) -> Result<usize, StoreError> {
            self.inner.count().await
        }

        async fn unique_agents(&self) -> Result<usize, StoreError> {
            self.inner.unique_agents().await
        }

        async fn max_timeslot(&self) -> Result<Timeslot, StoreError> {
            self.inner.max_timeslot().await
        }
    }

    // =========================================================================
    // END TO END
    // =========================================================================

    #[tokio::test]
    async fn test_rotated_key_cannot_read_previous_timeslot() {
        let runtime = deterministic_runtime(3);
        let container = runtime.container();
        let roster = container.identity.roster().to_vec();
        let (a, b) = (&roster[0], &roster[1]);

        runtime.advance_timeslot().await.unwrap();
        let id = runtime.messenger().send(a, b, b"rendezvous at dawn").await.unwrap();
        let logged = container.audit.get(id).await.unwrap();
        assert_eq!(logged.record.sender_timeslot, Timeslot::new(1));

        assert_eq!(
            runtime.messenger().verify_logged(id).await.unwrap(),
            VerificationOutcome::Verified {
                plaintext: b"rendezvous at dawn".to_vec()
            }
        );

        runtime.advance_timeslot().await.unwrap();
        let rotated = container.identity.current_identity(a).await.unwrap().unwrap();
        assert_eq!(rotated.timeslot, Timeslot::new(2));

        let opened = SecureChannel::new().open(&logged.record, &rotated.key_material());
        assert_ne!(opened.ok(), Some(b"rendezvous at dawn".to_vec()));

        // Historical replay still selects the timeslot 1 badge.
        assert!(runtime.messenger().verify_logged(id).await.unwrap().is_verified());
    }

    #[tokio::test]
    async fn test_badges_differ_across_agents_and_timeslots() {
        let runtime = deterministic_runtime(4);
        runtime.advance_timeslot().await.unwrap();
        runtime.advance_timeslot().await.unwrap();

        let container = runtime.container();
        let mut badges = HashSet::new();
        for ts in 1..=2 {
            for identity in container.identity.identities_for(Timeslot::new(ts)).await.unwrap() {
                assert!(badges.insert(*identity.badge.as_bytes()));
            }
        }
        assert_eq!(badges.len(), 8);
    }

    #[tokio::test]
    async fn test_send_requires_a_rotation() {
        let runtime = deterministic_runtime(2);
        let roster = runtime.container().identity.roster().to_vec();
        assert!(matches!(
            runtime.messenger().send(&roster[0], &roster[1], b"hi").await,
            Err(RuntimeError::NoCurrentIdentity { .. })
        ));
    }

    // =========================================================================
    // PARTIAL ADVANCE
    // =========================================================================

    #[tokio::test]
    async fn test_send_after_partial_advance_uses_established_timeslot() {
        // Timeslot 1 stores three identities; timeslot 2 stores one, then fails.
        let container = FleetContainer::with_backends(
            config(3),
            Arc::new(FailingPutStore::new(5)),
            Arc::new(InMemoryCommunicationStore::new()),
            Arc::new(SequenceSeedSource::new()),
        )
        .unwrap();
        let runtime = FleetRuntime::from_container(container);
        let container = runtime.container();
        let roster = container.identity.roster().to_vec();

        runtime.advance_timeslot().await.unwrap();
        assert!(runtime.advance_timeslot().await.is_err());

        let status = runtime.status();
        assert_eq!(status.current_timeslot, Timeslot::new(2));
        assert_eq!(status.established_timeslot, Some(Timeslot::new(1)));
        let stray = container.identity.current_identity(&roster[0]).await.unwrap().unwrap();
        assert_eq!(stray.timeslot, Timeslot::new(2));

        let id = runtime.messenger().send(&roster[0], &roster[1], b"hi").await.unwrap();
        let record = container.audit.get(id).await.unwrap().record;
        assert_eq!(record.sender_timeslot, Timeslot::new(1));
        assert_eq!(record.receiver_timeslot, record.sender_timeslot);
        assert!(Some(record.sender_timeslot) <= status.established_timeslot);
        assert!(runtime.messenger().verify_logged(id).await.unwrap().is_verified());

        // Intercept resolves the sender at timeslot 1 as well.
        let captured = container.audit.get(id).await.unwrap().record;
        let outcome = runtime.messenger().intercept(&captured, &roster[0]).await.unwrap();
        assert!(outcome.is_breach());

        let report = runtime.messenger().broadcast(&roster[0], b"all").await.unwrap();
        assert_eq!(report.successful, 2);
        let logged = container.audit.count().await.unwrap();
        assert_eq!(logged, 3);

        // A clean advance moves every agent forward together.
        runtime.advance_timeslot().await.unwrap();
        let id = runtime.messenger().send(&roster[1], &roster[2], b"next").await.unwrap();
        let record = container.audit.get(id).await.unwrap().record;
        assert_eq!(record.sender_timeslot, Timeslot::new(3));
        assert_eq!(record.receiver_timeslot, Timeslot::new(3));
    }

    // =========================================================================
    // BADGE CONSTRUCTION
    // =========================================================================

    #[test]
    fn test_preimage_layout_is_literal() {
        let mut seed_bytes = [0u8; 32];
        for (i, b) in seed_bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        let seed = BadgeSeed::from_bytes(seed_bytes);

        let preimage = badge_preimage(&serial("AGENT-0001"), Timeslot::new(0x0102), &seed);

        let mut expected = Vec::with_capacity(PREIMAGE_LEN);
        expected.extend_from_slice(b"AGENT-00");
        expected.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0x01, 0x02]);
        expected.extend_from_slice(&seed_bytes[..16]);
        assert_eq!(preimage.as_slice(), expected.as_slice());

        let badge = BadgeGenerator::with_algorithm(HashAlgorithm::Sha3)
            .generate(&serial("AGENT-0001"), Timeslot::new(0x0102), &seed);
        let direct: [u8; 32] = Sha3_256::digest(&expected).into();
        assert_eq!(badge.as_bytes(), &direct);
    }

    #[test]
    fn test_serials_sharing_prefix_collide_on_same_seed() {
        // Only eight serial bytes enter the preimage.
        let generator = BadgeGenerator::default();
        let seed = BadgeSeed::from_bytes([7; 32]);
        let left = generator.generate(&serial("AGENT-00-LEFT"), Timeslot::new(1), &seed);
        let right = generator.generate(&serial("AGENT-00-RIGHT"), Timeslot::new(1), &seed);
        assert_eq!(left, right);
    }

    // =========================================================================
    // CLOCK AND LEDGER
    // =========================================================================

    #[test]
    fn test_concurrent_advances_are_unique_and_gapless() {
        let clock = Arc::new(FleetClock::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let clock = Arc::clone(&clock);
                std::thread::spawn(move || {
                    (0..100)
                        .map(|_| clock.advance().unwrap().value())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (1..=800).collect::<Vec<_>>());
        assert_eq!(clock.current(), Timeslot::new(800));
    }

    #[tokio::test]
    async fn test_duplicate_timeslot_keeps_first_identity() {
        let store = Arc::new(InMemoryIdentityStore::new());
        let agent = serial("AGENT-DUP");
        let ledger = IdentityLedger::new(agent.clone(), Arc::clone(&store));
        let generator = BadgeGenerator::default();

        let ts = Timeslot::new(1);
        let first = generator.issue(&agent, ts, BadgeSeed::from_bytes([1; 32]), Utc::now());
        let second = generator.issue(&agent, ts, BadgeSeed::from_bytes([2; 32]), Utc::now());

        ledger.append(first.clone()).await.unwrap();
        assert!(matches!(
            ledger.append(second).await,
            Err(IdentityError::DuplicateTimeslot(_))
        ));
        assert_eq!(ledger.current().await.unwrap(), Some(first));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clock_resumes_from_persisted_identities() {
        let store: Arc<dyn IdentityStore> = Arc::new(InMemoryIdentityStore::new());
        let first = FleetContainer::with_backends(
            config(2),
            Arc::clone(&store),
            Arc::new(InMemoryCommunicationStore::new()),
            Arc::new(SequenceSeedSource::new()),
        )
        .unwrap();
        for _ in 0..3 {
            first.identity.advance().await.unwrap();
        }

        let identity = FleetIdentityService::new(
            "ROT",
            fleet_roster("ROT", 2).unwrap(),
            BadgeGenerator::default(),
            Arc::new(SequenceSeedSource::new()),
            Arc::clone(&store),
        )
        .unwrap()
        .resume_from_store()
        .await
        .unwrap();
        assert_eq!(identity.clock().established(), Some(Timeslot::new(3)));

        let report = identity.advance().await.unwrap();
        assert_eq!(report.timeslot, Timeslot::new(4));
        assert_eq!(report.stored, 2);
    }
}
