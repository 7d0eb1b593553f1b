use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use shared_types::{
    CommunicationFilter, CommunicationRecord, LoggedCommunication, RecordId, StoreError,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::ports::outbound::CommunicationStore;

/// In-memory communication log.
///
/// Ids come from one atomic sequence starting at 1; rows are only ever
/// inserted, never replaced.
pub struct InMemoryCommunicationStore {
    rows: RwLock<BTreeMap<RecordId, LoggedCommunication>>,
    next_id: AtomicU64,
    unavailable: AtomicBool,
}

impl Default for InMemoryCommunicationStore {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            unavailable: AtomicBool::new(false),
        }
    }
}

impl InMemoryCommunicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a backend outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("communication store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CommunicationStore for InMemoryCommunicationStore {
    async fn append(&self, record: CommunicationRecord) -> Result<LoggedCommunication, StoreError> {
        self.check_available()?;
        // Id and timestamp are taken under the write lock so log order,
        // id order and timestamp order agree.
        let mut rows = self.rows.write();
        let logged = LoggedCommunication {
            id: RecordId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            logged_at: Utc::now(),
            record,
        };
        rows.insert(logged.id, logged.clone());
        Ok(logged)
    }

    async fn get(&self, id: RecordId) -> Result<Option<LoggedCommunication>, StoreError> {
        self.check_available()?;
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn query(
        &self,
        filter: &CommunicationFilter,
    ) -> Result<Vec<LoggedCommunication>, StoreError> {
        self.check_available()?;
        let mut rows: Vec<LoggedCommunication> = self
            .rows
            .read()
            .values()
            .filter(|logged| filter.matches(&logged.record))
            .cloned()
            .collect();

        rows.sort_by(|a, b| b.logged_at.cmp(&a.logged_at).then(b.id.cmp(&a.id)));
        rows.truncate(filter.limit);
        Ok(rows)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.check_available()?;
        Ok(self.rows.read().len())
    }
}
