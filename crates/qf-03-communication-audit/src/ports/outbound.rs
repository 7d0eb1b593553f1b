//! # Outbound Ports (Driven Ports / SPI)

use async_trait::async_trait;
use shared_types::{
    CommunicationFilter, CommunicationRecord, LoggedCommunication, RecordId, StoreError,
};

/// Append-only communication log backend.
#[async_trait]
pub trait CommunicationStore: Send + Sync {
    /// Persist a record under a new, strictly increasing id.
    ///
    /// Never overwrites. All-or-nothing: on error nothing is logged and no
    /// id is visible to readers.
    async fn append(&self, record: CommunicationRecord) -> Result<LoggedCommunication, StoreError>;

    /// Fetch one logged record.
    async fn get(&self, id: RecordId) -> Result<Option<LoggedCommunication>, StoreError>;

    /// Matching records, newest first (logged timestamp, then id, both
    /// descending), at most `filter.limit` rows.
    async fn query(
        &self,
        filter: &CommunicationFilter,
    ) -> Result<Vec<LoggedCommunication>, StoreError>;

    /// Total logged records.
    async fn count(&self) -> Result<usize, StoreError>;
}
