//! # Inbound Ports (Driving Ports / API)

use async_trait::async_trait;
use shared_types::{CommunicationFilter, CommunicationRecord, LoggedCommunication, RecordId};

use crate::domain::errors::AuditResult;

/// Communication audit API.
#[async_trait]
pub trait CommunicationAuditApi: Send + Sync {
    /// Append a record to the log and return its id.
    async fn log(&self, record: CommunicationRecord) -> AuditResult<RecordId>;

    /// Query the log, newest first.
    async fn query(&self, filter: CommunicationFilter) -> AuditResult<Vec<LoggedCommunication>>;

    /// Fetch one record for targeted replay.
    ///
    /// # Errors
    /// * `AuditError::NotFound` - no record with this id
    async fn get(&self, id: RecordId) -> AuditResult<LoggedCommunication>;

    /// Total logged records.
    async fn count(&self) -> AuditResult<usize>;
}
