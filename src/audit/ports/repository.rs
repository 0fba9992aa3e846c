//! Read-side repository port for the audit trail.
//!
//! There is no append method here: entries are only written through
//! [`crate::ticket::ports::TicketRepository::commit`], together with the
//! ticket change they describe.

use crate::audit::domain::AuditLogEntry;
use crate::ticket::domain::TicketId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for audit repository operations.
pub type AuditRepositoryResult<T> = Result<T, AuditRepositoryError>;

/// Audit trail query contract.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Returns every entry, newest first.
    async fn list_entries(&self) -> AuditRepositoryResult<Vec<AuditLogEntry>>;

    /// Returns the entries for one ticket, newest first.
    async fn list_entries_for_ticket(
        &self,
        ticket_id: TicketId,
    ) -> AuditRepositoryResult<Vec<AuditLogEntry>>;
}

/// Errors returned by audit repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AuditRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuditRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
