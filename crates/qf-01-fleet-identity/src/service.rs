//! # Fleet Identity Service
//!
//! Application service that implements `FleetIdentityApi`.
//!
//! ## Architecture
//!
//! - Owns the fleet roster and holds the `FleetClock` by handle
//! - Delegates badge generation to `BadgeGenerator` (parallel per timeslot)
//! - Persists through the `IdentityStore` outbound port via per-agent ledgers
//!
//! ## Advance Flow
//!
//! ```text
//! clock.advance() ──→ issue_fleet (rayon) ──→ ledger.append × N ──→ clock.establish()
//!        │                                           │
//!        └─ consumed even on failure                 └─ duplicates counted, other
//!                                                       store errors abort
//! ```

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use shared_types::{AgentSerial, Identity, Timeslot};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::badge::BadgeGenerator;
use crate::domain::clock::FleetClock;
use crate::domain::errors::{IdentityError, IdentityResult};
use crate::domain::ledger::IdentityLedger;
use crate::ports::inbound::FleetIdentityApi;
use crate::ports::outbound::{IdentityStore, SeedSource};

/// Build the canonical roster `AGENT-{system_id}-{n:03}`, n from 1.
pub fn fleet_roster(system_id: &str, num_agents: usize) -> IdentityResult<Vec<AgentSerial>> {
    if num_agents == 0 {
        return Err(IdentityError::EmptyRoster);
    }
    (1..=num_agents)
        .map(|n| AgentSerial::new(format!("AGENT-{system_id}-{n:03}")).map_err(IdentityError::from))
        .collect()
}

/// Outcome of one clock advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdvanceReport {
    /// Timeslot that was issued.
    pub timeslot: Timeslot,
    /// Badges generated.
    pub generated: usize,
    /// Identities newly persisted.
    pub stored: usize,
    /// Identities skipped because the store already had them.
    pub duplicates: usize,
}

/// Snapshot of the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetStatus {
    pub system_id: String,
    pub num_agents: usize,
    pub current_timeslot: Timeslot,
    pub established_timeslot: Option<Timeslot>,
}

/// Fleet identity service.
pub struct FleetIdentityService<S: IdentityStore + ?Sized> {
    system_id: String,
    roster: Vec<AgentSerial>,
    members: HashSet<AgentSerial>,
    clock: Arc<FleetClock>,
    generator: BadgeGenerator,
    seeds: Arc<dyn SeedSource>,
    store: Arc<S>,
}

impl<S: IdentityStore + ?Sized> FleetIdentityService<S> {
    /// Create a service with a fresh clock.
    ///
    /// # Errors
    /// * `IdentityError::EmptyRoster` - no agents
    /// * `IdentityError::DuplicateAgent` - a serial appears twice
    pub fn new(
        system_id: impl Into<String>,
        roster: Vec<AgentSerial>,
        generator: BadgeGenerator,
        seeds: Arc<dyn SeedSource>,
        store: Arc<S>,
    ) -> IdentityResult<Self> {
        if roster.is_empty() {
            return Err(IdentityError::EmptyRoster);
        }
        let mut members = HashSet::with_capacity(roster.len());
        for serial in &roster {
            if !members.insert(serial.clone()) {
                return Err(IdentityError::DuplicateAgent(serial.clone()));
            }
        }

        Ok(Self {
            system_id: system_id.into(),
            roster,
            members,
            clock: Arc::new(FleetClock::new()),
            generator,
            seeds,
            store,
        })
    }

    /// Replace the clock, e.g. with one restored from the store.
    pub fn with_clock(mut self, clock: Arc<FleetClock>) -> Self {
        self.clock = clock;
        self
    }

    /// Resume the clock from the highest persisted timeslot.
    pub async fn resume_from_store(self) -> IdentityResult<Self> {
        let high_water = self.store.max_timeslot().await?;
        if high_water > Timeslot::GENESIS {
            info!(timeslot = %high_water, "[qf-01] resuming fleet clock from store");
        }
        Ok(self.with_clock(Arc::new(FleetClock::starting_at(high_water))))
    }

    pub fn system_id(&self) -> &str {
        &self.system_id
    }

    pub fn roster(&self) -> &[AgentSerial] {
        &self.roster
    }

    pub fn clock(&self) -> &Arc<FleetClock> {
        &self.clock
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn generator(&self) -> &BadgeGenerator {
        &self.generator
    }

    /// Ledger handle for a roster member.
    pub fn ledger(&self, serial: &AgentSerial) -> IdentityResult<IdentityLedger<S>> {
        self.ensure_member(serial)?;
        Ok(IdentityLedger::new(serial.clone(), Arc::clone(&self.store)))
    }

    fn ensure_member(&self, serial: &AgentSerial) -> IdentityResult<()> {
        if self.members.contains(serial) {
            Ok(())
        } else {
            Err(IdentityError::UnknownAgent(serial.clone()))
        }
    }
}

#[async_trait]
impl<S: IdentityStore + ?Sized + 'static> FleetIdentityApi for FleetIdentityService<S> {
    async fn advance(&self) -> IdentityResult<AdvanceReport> {
        let timeslot = self.clock.advance()?;
        debug!(%timeslot, agents = self.roster.len(), "[qf-01] timeslot issued");

        let identities =
            self.generator
                .issue_fleet(&self.roster, timeslot, self.seeds.as_ref(), Utc::now());
        let generated = identities.len();

        let mut stored = 0;
        let mut duplicates = 0;
        for identity in identities {
            let ledger = IdentityLedger::new(identity.serial.clone(), Arc::clone(&self.store));
            match ledger.append(identity).await {
                Ok(()) => stored += 1,
                Err(IdentityError::DuplicateTimeslot(dup)) => {
                    warn!(serial = %dup.serial, %timeslot, "[qf-01] identity already exists, skipping");
                    duplicates += 1;
                }
                Err(e) => {
                    warn!(%timeslot, error = %e, "[qf-01] identity generation aborted");
                    return Err(e);
                }
            }
        }

        self.clock.establish(timeslot)?;
        info!(
            %timeslot,
            generated,
            stored,
            duplicates,
            "[qf-01] timeslot established"
        );

        Ok(AdvanceReport {
            timeslot,
            generated,
            stored,
            duplicates,
        })
    }

    async fn current_identity(&self, serial: &AgentSerial) -> IdentityResult<Option<Identity>> {
        self.ledger(serial)?.current().await
    }

    async fn established_identity(
        &self,
        serial: &AgentSerial,
    ) -> IdentityResult<Option<Identity>> {
        let ledger = self.ledger(serial)?;
        match self.clock.established() {
            Some(timeslot) => ledger.at(timeslot).await,
            None => Ok(None),
        }
    }

    async fn identity_at(
        &self,
        serial: &AgentSerial,
        timeslot: Timeslot,
    ) -> IdentityResult<Option<Identity>> {
        self.ledger(serial)?.at(timeslot).await
    }

    async fn identities_for(&self, timeslot: Timeslot) -> IdentityResult<Vec<Identity>> {
        Ok(self.store.list_by_timeslot(timeslot).await?)
    }

    async fn history(&self, serial: &AgentSerial) -> IdentityResult<Vec<Identity>> {
        self.ledger(serial)?.history().await
    }

    fn status(&self) -> FleetStatus {
        let state = self.clock.snapshot();
        FleetStatus {
            system_id: self.system_id.clone(),
            num_agents: self.roster.len(),
            current_timeslot: state.current,
            established_timeslot: state.established,
        }
    }
}
