//! Read-side operations over tickets, the audit trail and notifications.

use super::lifecycle::{TicketLifecycleResult, TicketLifecycleService};
use crate::audit::domain::AuditLogEntry;
use crate::catalog::{domain::ErrorTypeId, ports::CatalogRepository};
use crate::notification::domain::{AdminNotification, NotificationId, SystemNotification};
use crate::ticket::{
    domain::{Ticket, TicketId, TicketStatus, UserId},
    ports::TicketStore,
};
use mockable::Clock;
use std::collections::HashMap;

/// Criteria for listing tickets. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    status: Option<TicketStatus>,
    submitter_id: Option<UserId>,
    error_type_id: Option<ErrorTypeId>,
    search: Option<String>,
}

impl TicketFilter {
    /// Creates a filter that matches every ticket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to tickets in `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to tickets filed by `submitter_id`.
    #[must_use]
    pub const fn with_submitter(mut self, submitter_id: UserId) -> Self {
        self.submitter_id = Some(submitter_id);
        self
    }

    /// Restricts to tickets filed against `error_type_id`.
    #[must_use]
    pub const fn with_error_type(mut self, error_type_id: ErrorTypeId) -> Self {
        self.error_type_id = Some(error_type_id);
        self
    }

    /// Restricts to tickets whose uid or error type name contains `term`,
    /// ignoring case. A blank term is ignored.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let raw = term.into();
        let trimmed = raw.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());
        self
    }

    const fn needs_error_type_names(&self) -> bool {
        self.search.is_some()
    }

    fn matches(&self, ticket: &Ticket, names: &HashMap<ErrorTypeId, String>) -> bool {
        if self.status.is_some_and(|status| ticket.status() != status) {
            return false;
        }
        if self
            .submitter_id
            .is_some_and(|submitter| ticket.submitter_id() != submitter)
        {
            return false;
        }
        if self
            .error_type_id
            .is_some_and(|error_type| ticket.error_type_id() != error_type)
        {
            return false;
        }
        self.search.as_deref().is_none_or(|term| {
            ticket.uid().as_str().to_lowercase().contains(term)
                || names
                    .get(&ticket.error_type_id())
                    .is_some_and(|name| name.to_lowercase().contains(term))
        })
    }
}

/// Ticket count for one error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorTypeCount {
    /// Error type identifier.
    pub error_type_id: ErrorTypeId,
    /// Error type name, or `None` when the catalog no longer lists it.
    pub name: Option<String>,
    /// Number of tickets filed against the error type.
    pub count: usize,
}

/// Dashboard figures over all tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketSummary {
    /// Number of tickets.
    pub total: usize,
    /// Number of tickets in [`TicketStatus::InProgress`].
    pub in_progress: usize,
    /// Ticket counts per error type, largest first.
    pub by_error_type: Vec<ErrorTypeCount>,
    /// The error type with the most tickets, if any ticket exists.
    pub most_frequent: Option<ErrorTypeCount>,
}

impl<S, K, C> TicketLifecycleService<S, K, C>
where
    S: TicketStore,
    K: CatalogRepository,
    C: Clock + Send + Sync,
{
    /// Lists tickets matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_tickets(&self, filter: &TicketFilter) -> TicketLifecycleResult<Vec<Ticket>> {
        let names = if filter.needs_error_type_names() {
            self.error_type_names().await?
        } else {
            HashMap::new()
        };
        let tickets = self.store.list_all().await?;
        Ok(tickets
            .into_iter()
            .filter(|ticket| filter.matches(ticket, &names))
            .collect())
    }

    /// Fetches one ticket.
    ///
    /// # Errors
    ///
    /// Returns [`super::TicketLifecycleError::NotFound`] for an unknown
    /// ticket, or repository errors.
    pub async fn get_ticket(&self, ticket_id: TicketId) -> TicketLifecycleResult<Ticket> {
        self.find_ticket_or_error(ticket_id).await
    }

    /// Lists audit entries newest first, for one ticket or for all.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_audit_log(
        &self,
        ticket_id: Option<TicketId>,
    ) -> TicketLifecycleResult<Vec<AuditLogEntry>> {
        let entries = match ticket_id {
            Some(id) => self.store.list_entries_for_ticket(id).await?,
            None => self.store.list_entries().await?,
        };
        Ok(entries)
    }

    /// Lists a submitter's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_notifications(
        &self,
        submitter_id: UserId,
    ) -> TicketLifecycleResult<Vec<SystemNotification>> {
        Ok(self.store.list_for_submitter(submitter_id).await?)
    }

    /// Lists the admin feed, newest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_admin_notifications(&self) -> TicketLifecycleResult<Vec<AdminNotification>> {
        Ok(self.store.list_admin().await?)
    }

    /// Counts a submitter's unread notifications.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn unread_notification_count(
        &self,
        submitter_id: UserId,
    ) -> TicketLifecycleResult<usize> {
        Ok(self.store.count_unread_for_submitter(submitter_id).await?)
    }

    /// Counts unread admin notifications.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn unread_admin_notification_count(&self) -> TicketLifecycleResult<usize> {
        Ok(self.store.count_unread_admin().await?)
    }

    /// Marks a submitter notification as read.
    ///
    /// # Errors
    ///
    /// Returns a notification error for an unknown id.
    pub async fn mark_notification_read(&self, id: NotificationId) -> TicketLifecycleResult<()> {
        Ok(self.store.mark_system_read(id).await?)
    }

    /// Marks an admin notification as read.
    ///
    /// # Errors
    ///
    /// Returns a notification error for an unknown id.
    pub async fn mark_admin_notification_read(
        &self,
        id: NotificationId,
    ) -> TicketLifecycleResult<()> {
        Ok(self.store.mark_admin_read(id).await?)
    }

    /// Computes dashboard figures over every ticket.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn summarize(&self) -> TicketLifecycleResult<TicketSummary> {
        let tickets = self.store.list_all().await?;
        let names = self.error_type_names().await?;

        let mut counts: HashMap<ErrorTypeId, usize> = HashMap::new();
        for ticket in &tickets {
            *counts.entry(ticket.error_type_id()).or_default() += 1;
        }
        let mut by_error_type: Vec<ErrorTypeCount> = counts
            .into_iter()
            .map(|(error_type_id, count)| ErrorTypeCount {
                error_type_id,
                name: names.get(&error_type_id).cloned(),
                count,
            })
            .collect();
        // Ties break on name so the ordering is stable across runs.
        by_error_type.sort_by(|left, right| {
            right
                .count
                .cmp(&left.count)
                .then_with(|| left.name.cmp(&right.name))
                .then_with(|| left.error_type_id.to_string().cmp(&right.error_type_id.to_string()))
        });

        Ok(TicketSummary {
            total: tickets.len(),
            in_progress: tickets
                .iter()
                .filter(|ticket| ticket.status() == TicketStatus::InProgress)
                .count(),
            most_frequent: by_error_type.first().cloned(),
            by_error_type,
        })
    }

    async fn error_type_names(&self) -> TicketLifecycleResult<HashMap<ErrorTypeId, String>> {
        let error_types = self.catalog.list_error_types().await?;
        Ok(error_types
            .into_iter()
            .map(|error_type| (error_type.id(), error_type.name().to_owned()))
            .collect())
    }
}
