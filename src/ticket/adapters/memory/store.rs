//! Thread-safe in-memory ticket store.
//!
//! Tickets, audit entries and both notification feeds share one lock so that
//! a [`TicketCommit`] is applied as a unit and readers never observe half of
//! it. Nothing survives a restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::audit::{
    adapters::memory::AuditTrail,
    domain::AuditLogEntry,
    ports::{AuditLogRepository, AuditRepositoryError, AuditRepositoryResult},
};
use crate::catalog::domain::ErrorTypeId;
use crate::notification::{
    adapters::memory::NotificationFeed,
    domain::{
        AdminNotification, Notification, NotificationId, PendingNotification, SystemNotification,
    },
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::ticket::{
    domain::{Ticket, TicketId, Uid, UserId},
    ports::{
        CommitKind, TicketCommit, TicketRepository, TicketRepositoryError, TicketRepositoryResult,
    },
};

/// In-memory backend for tickets, their audit trail and notifications.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTicketStore {
    state: Arc<RwLock<InMemoryTicketState>>,
}

#[derive(Debug, Default)]
struct InMemoryTicketState {
    tickets: HashMap<TicketId, Ticket>,
    /// Ticket ids, newest first.
    order: Vec<TicketId>,
    audit: AuditTrail,
    system_feed: NotificationFeed<SystemNotification>,
    admin_feed: NotificationFeed<AdminNotification>,
}

impl InMemoryTicketState {
    fn ordered_tickets<'a>(&'a self) -> impl Iterator<Item = &'a Ticket> + 'a {
        self.order.iter().filter_map(|id| self.tickets.get(id))
    }

    fn check(&self, commit: &TicketCommit) -> TicketRepositoryResult<()> {
        let id = commit.ticket.id();
        match commit.kind {
            CommitKind::Create if self.tickets.contains_key(&id) => {
                Err(TicketRepositoryError::DuplicateTicket(id))
            }
            CommitKind::Update if !self.tickets.contains_key(&id) => {
                Err(TicketRepositoryError::NotFound(id))
            }
            CommitKind::Create | CommitKind::Update => Ok(()),
        }
    }

    fn apply(&mut self, commit: &TicketCommit) {
        let ticket = &commit.ticket;
        if commit.kind == CommitKind::Create {
            self.order.insert(0, ticket.id());
        }
        self.tickets.insert(ticket.id(), ticket.clone());
        self.audit.append(commit.audit_entry.clone());
        for notification in &commit.notifications {
            match notification {
                PendingNotification::System(system) => {
                    debug_assert_eq!(system.ticket_id(), ticket.id());
                    self.system_feed.append(system.clone());
                }
                PendingNotification::Admin(admin) => {
                    debug_assert_eq!(admin.ticket_id(), ticket.id());
                    self.admin_feed.append(admin.clone());
                }
            }
        }
    }
}

impl InMemoryTicketStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

#[async_trait]
impl TicketRepository for InMemoryTicketStore {
    async fn commit(&self, commit: &TicketCommit) -> TicketRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TicketRepositoryError::persistence(poisoned(err)))?;
        state.check(commit)?;
        state.apply(commit);
        Ok(())
    }

    async fn find_by_id(&self, id: TicketId) -> TicketRepositoryResult<Option<Ticket>> {
        let state = self
            .state
            .read()
            .map_err(|err| TicketRepositoryError::persistence(poisoned(err)))?;
        Ok(state.tickets.get(&id).cloned())
    }

    async fn list_all(&self) -> TicketRepositoryResult<Vec<Ticket>> {
        let state = self
            .state
            .read()
            .map_err(|err| TicketRepositoryError::persistence(poisoned(err)))?;
        Ok(state.ordered_tickets().cloned().collect())
    }

    async fn find_by_uid_and_error_type(
        &self,
        uid: &Uid,
        error_type_id: ErrorTypeId,
    ) -> TicketRepositoryResult<Vec<Ticket>> {
        let state = self
            .state
            .read()
            .map_err(|err| TicketRepositoryError::persistence(poisoned(err)))?;
        Ok(state
            .ordered_tickets()
            .filter(|ticket| ticket.uid() == uid && ticket.error_type_id() == error_type_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryTicketStore {
    async fn list_entries(&self) -> AuditRepositoryResult<Vec<AuditLogEntry>> {
        let state = self
            .state
            .read()
            .map_err(|err| AuditRepositoryError::persistence(poisoned(err)))?;
        Ok(state.audit.list_all())
    }

    async fn list_entries_for_ticket(
        &self,
        ticket_id: TicketId,
    ) -> AuditRepositoryResult<Vec<AuditLogEntry>> {
        let state = self
            .state
            .read()
            .map_err(|err| AuditRepositoryError::persistence(poisoned(err)))?;
        Ok(state.audit.list_for_ticket(ticket_id))
    }
}

#[async_trait]
impl NotificationRepository for InMemoryTicketStore {
    async fn list_for_submitter(
        &self,
        submitter_id: UserId,
    ) -> NotificationRepositoryResult<Vec<SystemNotification>> {
        let state = self
            .state
            .read()
            .map_err(|err| NotificationRepositoryError::persistence(poisoned(err)))?;
        Ok(state
            .system_feed
            .list_where(|item| item.submitter_id() == submitter_id))
    }

    async fn list_admin(&self) -> NotificationRepositoryResult<Vec<AdminNotification>> {
        let state = self
            .state
            .read()
            .map_err(|err| NotificationRepositoryError::persistence(poisoned(err)))?;
        Ok(state.admin_feed.list_where(|_| true))
    }

    async fn count_unread_for_submitter(
        &self,
        submitter_id: UserId,
    ) -> NotificationRepositoryResult<usize> {
        let state = self
            .state
            .read()
            .map_err(|err| NotificationRepositoryError::persistence(poisoned(err)))?;
        Ok(state
            .system_feed
            .count_unread_where(|item| item.submitter_id() == submitter_id))
    }

    async fn count_unread_admin(&self) -> NotificationRepositoryResult<usize> {
        let state = self
            .state
            .read()
            .map_err(|err| NotificationRepositoryError::persistence(poisoned(err)))?;
        Ok(state.admin_feed.count_unread_where(|_| true))
    }

    async fn mark_system_read(&self, id: NotificationId) -> NotificationRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| NotificationRepositoryError::persistence(poisoned(err)))?;
        if state.system_feed.mark_read(id) {
            Ok(())
        } else {
            Err(NotificationRepositoryError::NotFound(id))
        }
    }

    async fn mark_admin_read(&self, id: NotificationId) -> NotificationRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| NotificationRepositoryError::persistence(poisoned(err)))?;
        if state.admin_feed.mark_read(id) {
            Ok(())
        } else {
            Err(NotificationRepositoryError::NotFound(id))
        }
    }
}
