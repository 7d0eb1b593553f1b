use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{AgentSerial, DuplicateTimeslotError, Identity, StoreError, Timeslot};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ports::outbound::IdentityStore;

/// In-memory identity store.
///
/// Keyed by (serial, timeslot) in a `BTreeMap`, so per-agent history and
/// the latest identity come straight out of an ordered range scan.
/// Insert-if-absent happens under a single write lock.
#[derive(Default)]
pub struct InMemoryIdentityStore {
    rows: RwLock<BTreeMap<(AgentSerial, Timeslot), Identity>>,
    unavailable: AtomicBool,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a backend outage. While set, every call fails with
    /// `StoreError::Unavailable` and nothing is written.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("identity store offline".into()));
        }
        Ok(())
    }

    fn agent_rows<'a>(
        rows: &'a BTreeMap<(AgentSerial, Timeslot), Identity>,
        serial: &AgentSerial,
    ) -> impl DoubleEndedIterator<Item = &'a Identity> {
        let start = (serial.clone(), Timeslot::GENESIS);
        let end = (serial.clone(), Timeslot::new(u64::MAX));
        rows.range(start..=end).map(|(_, identity)| identity)
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn put(&self, identity: Identity) -> Result<(), StoreError> {
        self.check_available()?;
        let mut rows = self.rows.write();
        match rows.entry((identity.serial.clone(), identity.timeslot)) {
            Entry::Occupied(_) => Err(DuplicateTimeslotError {
                serial: identity.serial,
                timeslot: identity.timeslot,
            }
            .into()),
            Entry::Vacant(slot) => {
                slot.insert(identity);
                Ok(())
            }
        }
    }

    async fn get(
        &self,
        serial: &AgentSerial,
        timeslot: Timeslot,
    ) -> Result<Option<Identity>, StoreError> {
        self.check_available()?;
        Ok(self.rows.read().get(&(serial.clone(), timeslot)).cloned())
    }

    async fn latest(&self, serial: &AgentSerial) -> Result<Option<Identity>, StoreError> {
        self.check_available()?;
        let rows = self.rows.read();
        let latest = Self::agent_rows(&rows, serial).next_back().cloned();
        Ok(latest)
    }

    async fn history(&self, serial: &AgentSerial) -> Result<Vec<Identity>, StoreError> {
        self.check_available()?;
        let rows = self.rows.read();
        let history = Self::agent_rows(&rows, serial).cloned().collect();
        Ok(history)
    }

    async fn list_by_timeslot(&self, timeslot: Timeslot) -> Result<Vec<Identity>, StoreError> {
        self.check_available()?;
        // Map order is (serial, timeslot), so results are already serial-sorted.
        Ok(self
            .rows
            .read()
            .values()
            .filter(|identity| identity.timeslot == timeslot)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.check_available()?;
        Ok(self.rows.read().len())
    }

    async fn unique_agents(&self) -> Result<usize, StoreError> {
        self.check_available()?;
        let rows = self.rows.read();
        let agents: BTreeSet<&AgentSerial> = rows.keys().map(|(serial, _)| serial).collect();
        Ok(agents.len())
    }

    async fn max_timeslot(&self) -> Result<Timeslot, StoreError> {
        self.check_available()?;
        Ok(self
            .rows
            .read()
            .keys()
            .map(|(_, timeslot)| *timeslot)
            .max()
            .unwrap_or(Timeslot::GENESIS))
    }
}
