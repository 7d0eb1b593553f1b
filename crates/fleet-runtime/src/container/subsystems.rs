//! # Subsystem Container
//!
//! Holds all subsystem instances for one fleet.
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: identity store, communication store (in-memory adapters)
//! Level 1: Fleet Identity (qf-01)  - clock, generator, roster
//! Level 2: Secure Channel (qf-02)  - stateless
//! Level 3: Communication Audit + Verifier (qf-03)
//! ```
//!
//! Stores are held as trait objects so a persistent backend can replace the
//! in-memory adapters without touching the subsystems.

use std::sync::Arc;

use qf_01_fleet_identity::{
    fleet_roster, BadgeGenerator, FleetIdentityService, IdentityStore, InMemoryIdentityStore,
    OsSeedSource, SeedSource,
};
use qf_02_secure_channel::SecureChannel;
use qf_03_communication_audit::{
    CommunicationAudit, CommunicationStore, InMemoryCommunicationStore, Verifier, VerifierConfig,
};
use tracing::info;

use crate::container::config::FleetConfig;
use crate::errors::RuntimeResult;

/// Fleet identity service over a dynamic store.
pub type FleetIdentity = FleetIdentityService<dyn IdentityStore>;

/// Central container holding all subsystem instances.
pub struct FleetContainer {
    /// Configuration the container was built from.
    pub config: FleetConfig,

    /// Fleet Identity (Subsystem 1).
    pub identity: Arc<FleetIdentity>,

    /// Secure Channel (Subsystem 2).
    pub channel: SecureChannel,

    /// Communication Audit (Subsystem 3).
    pub audit: Arc<CommunicationAudit<dyn CommunicationStore>>,

    /// Replay verifier over the identity store.
    pub verifier: Arc<Verifier<dyn IdentityStore>>,

    /// Identity system of record.
    pub identity_store: Arc<dyn IdentityStore>,

    /// Communication log backend.
    pub communication_store: Arc<dyn CommunicationStore>,
}

impl FleetContainer {
    /// Build a container with in-memory stores and OS-random seeds.
    pub fn new(config: FleetConfig) -> RuntimeResult<Self> {
        Self::with_backends(
            config,
            Arc::new(InMemoryIdentityStore::new()),
            Arc::new(InMemoryCommunicationStore::new()),
            Arc::new(OsSeedSource),
        )
    }

    /// Build a container over explicit backends.
    pub fn with_backends(
        config: FleetConfig,
        identity_store: Arc<dyn IdentityStore>,
        communication_store: Arc<dyn CommunicationStore>,
        seeds: Arc<dyn SeedSource>,
    ) -> RuntimeResult<Self> {
        config.validate()?;
        let algorithm = config.hash_algorithm()?;
        let roster = fleet_roster(&config.system_id, config.num_agents)?;

        let identity = FleetIdentityService::new(
            config.system_id.clone(),
            roster,
            BadgeGenerator::with_algorithm(algorithm),
            seeds,
            Arc::clone(&identity_store),
        )?;

        let verifier = Verifier::with_config(
            Arc::clone(&identity_store),
            VerifierConfig {
                check_content_hash: config.verify_content_hash,
            },
        );

        info!(
            system_id = %config.system_id,
            agents = config.num_agents,
            badge_hash = %algorithm,
            "[fleet] subsystems initialized"
        );

        Ok(Self {
            identity: Arc::new(identity),
            channel: SecureChannel::new(),
            audit: Arc::new(CommunicationAudit::new(Arc::clone(&communication_store))),
            verifier: Arc::new(verifier),
            identity_store,
            communication_store,
            config,
        })
    }
}
