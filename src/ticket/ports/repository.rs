//! Repository port for ticket persistence and atomic lifecycle commits.

use crate::audit::{domain::AuditLogEntry, ports::AuditLogRepository};
use crate::catalog::domain::ErrorTypeId;
use crate::notification::{domain::PendingNotification, ports::NotificationRepository};
use crate::ticket::domain::{Ticket, TicketId, Uid};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for ticket repository operations.
pub type TicketRepositoryResult<T> = Result<T, TicketRepositoryError>;

/// Whether a commit inserts a new ticket or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    /// Insert a ticket that does not exist yet.
    Create,
    /// Replace the stored state of an existing ticket.
    Update,
}

/// Everything one lifecycle operation writes.
///
/// Implementations apply the ticket write, the audit entry and the
/// notifications as a single unit: either all of them become visible or
/// none do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketCommit {
    /// Ticket state after the operation.
    pub ticket: Ticket,
    /// Insert or replace.
    pub kind: CommitKind,
    /// Audit entry describing the operation.
    pub audit_entry: AuditLogEntry,
    /// Notifications triggered by the operation.
    pub notifications: Vec<PendingNotification>,
}

/// Ticket persistence contract.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Applies a lifecycle commit atomically.
    ///
    /// # Errors
    ///
    /// Returns [`TicketRepositoryError::DuplicateTicket`] when creating a
    /// ticket whose identifier exists, [`TicketRepositoryError::NotFound`]
    /// when updating a ticket that does not, or a persistence error. Nothing
    /// is written when an error is returned.
    async fn commit(&self, commit: &TicketCommit) -> TicketRepositoryResult<()>;

    /// Finds a ticket by identifier.
    ///
    /// Returns `None` when the ticket does not exist.
    async fn find_by_id(&self, id: TicketId) -> TicketRepositoryResult<Option<Ticket>>;

    /// Returns every ticket, newest first.
    async fn list_all(&self) -> TicketRepositoryResult<Vec<Ticket>>;

    /// Returns the tickets filed under `uid` for `error_type_id`, newest
    /// first.
    async fn find_by_uid_and_error_type(
        &self,
        uid: &Uid,
        error_type_id: ErrorTypeId,
    ) -> TicketRepositoryResult<Vec<Ticket>>;
}

/// A backend that stores tickets together with their audit trail and
/// notification feeds.
pub trait TicketStore: TicketRepository + AuditLogRepository + NotificationRepository {}

impl<T> TicketStore for T where T: TicketRepository + AuditLogRepository + NotificationRepository
{}

/// Errors returned by ticket repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TicketRepositoryError {
    /// A ticket with the same identifier already exists.
    #[error("duplicate ticket identifier: {0}")]
    DuplicateTicket(TicketId),

    /// The ticket was not found.
    #[error("ticket not found: {0}")]
    NotFound(TicketId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TicketRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
