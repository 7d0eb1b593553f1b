//! # Communication Audit Service
//!
//! Implements `CommunicationAuditApi` over a `CommunicationStore`. The log
//! is append-only: there is no update or delete path.

use async_trait::async_trait;
use shared_types::{CommunicationFilter, CommunicationRecord, LoggedCommunication, RecordId};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::errors::{AuditError, AuditResult};
use crate::ports::inbound::CommunicationAuditApi;
use crate::ports::outbound::CommunicationStore;

/// Append-only communication log.
pub struct CommunicationAudit<C: CommunicationStore + ?Sized> {
    store: Arc<C>,
}

impl<C: CommunicationStore + ?Sized> CommunicationAudit<C> {
    pub fn new(store: Arc<C>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<C> {
        &self.store
    }
}

#[async_trait]
impl<C: CommunicationStore + ?Sized + 'static> CommunicationAuditApi for CommunicationAudit<C> {
    async fn log(&self, record: CommunicationRecord) -> AuditResult<RecordId> {
        let sender = record.sender.clone();
        let receiver = record.receiver.clone();
        match self.store.append(record).await {
            Ok(logged) => {
                debug!(id = %logged.id, %sender, %receiver, "[qf-03] communication logged");
                Ok(logged.id)
            }
            Err(e) => {
                warn!(%sender, %receiver, error = %e, "[qf-03] failed to log communication");
                Err(e.into())
            }
        }
    }

    async fn query(&self, filter: CommunicationFilter) -> AuditResult<Vec<LoggedCommunication>> {
        Ok(self.store.query(&filter).await?)
    }

    async fn get(&self, id: RecordId) -> AuditResult<LoggedCommunication> {
        self.store.get(id).await?.ok_or(AuditError::NotFound(id))
    }

    async fn count(&self) -> AuditResult<usize> {
        Ok(self.store.count().await?)
    }
}
