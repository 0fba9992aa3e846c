//! Service layer for ticket submission and updates.

use super::locks::UidLocks;
use crate::audit::{domain::AuditLogEntry, ports::AuditRepositoryError};
use crate::catalog::{
    domain::{AutomatedMessage, ErrorTypeId},
    ports::{CatalogRepository, CatalogRepositoryError},
};
use crate::config::LifecycleConfig;
use crate::notification::{
    domain::{AdminNotification, PendingNotification, SystemNotification, TemplateError},
    ports::NotificationRepositoryError,
};
use crate::ticket::{
    domain::{
        Actor, NewTicket, Role, StatusTransition, Ticket, TicketDomainError, TicketId,
        TicketStatus, Uid, UserId,
    },
    ports::{CommitKind, TicketCommit, TicketRepositoryError, TicketStore},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for submitting a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicketRequest {
    uid: String,
    error_type_id: ErrorTypeId,
    description: String,
    comment: Option<String>,
    actor: Actor,
}

impl SubmitTicketRequest {
    /// Creates a request with the required submission fields.
    #[must_use]
    pub fn new(
        actor: Actor,
        uid: impl Into<String>,
        error_type_id: ErrorTypeId,
        description: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            error_type_id,
            description: description.into(),
            comment: None,
            actor,
        }
    }

    /// Sets the submitter's initial comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Request payload for updating a ticket.
///
/// Status and comment are independent; a request carrying neither is a
/// valid no-op that still leaves an audit entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTicketRequest {
    ticket_id: TicketId,
    status: Option<TicketStatus>,
    comment: Option<String>,
    actor: Actor,
}

impl UpdateTicketRequest {
    /// Creates an update request that changes nothing yet.
    #[must_use]
    pub const fn new(actor: Actor, ticket_id: TicketId) -> Self {
        Self {
            ticket_id,
            status: None,
            comment: None,
            actor,
        }
    }

    /// Sets the requested status.
    #[must_use]
    pub const fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets resolver text to append to the comment thread.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Service-level errors for ticket lifecycle operations.
#[derive(Debug, Error)]
pub enum TicketLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TicketDomainError),
    /// Ticket repository operation failed.
    #[error(transparent)]
    Repository(#[from] TicketRepositoryError),
    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogRepositoryError),
    /// Audit trail query failed.
    #[error(transparent)]
    Audit(#[from] AuditRepositoryError),
    /// Notification feed operation failed.
    #[error(transparent)]
    Notification(#[from] NotificationRepositoryError),
    /// A notification message could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// The submission names an error type missing from the catalog.
    #[error("unknown error type: {0}")]
    UnknownErrorType(ErrorTypeId),
    /// No ticket exists with the given identifier.
    #[error("ticket {0} not found")]
    NotFound(TicketId),
    /// The actor's role may not perform the operation.
    #[error("user {actor} with role {role} may not update tickets")]
    Forbidden {
        /// Acting user.
        actor: UserId,
        /// The actor's role.
        role: Role,
    },
}

impl TicketLifecycleError {
    /// Returns whether the error stems from invalid caller input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_) | Self::UnknownErrorType(_))
    }
}

/// Result type for ticket lifecycle service operations.
pub type TicketLifecycleResult<T> = Result<T, TicketLifecycleError>;

/// How a submission is triaged.
enum Triage {
    /// No automated resolution exists; a human works the ticket.
    Manual,
    /// First ticket for this uid and error type; closed with the canned text.
    FirstOccurrence(AutomatedMessage),
    /// The same uid hit the same error type again after auto-resolution.
    Resubmission,
}

impl Triage {
    const fn status(&self) -> TicketStatus {
        match self {
            Self::Manual => TicketStatus::InProgress,
            Self::FirstOccurrence(_) => TicketStatus::Closed,
            Self::Resubmission => TicketStatus::Escalated,
        }
    }
}

/// Ticket lifecycle orchestration service.
pub struct TicketLifecycleService<S, K, C>
where
    S: TicketStore,
    K: CatalogRepository,
    C: Clock + Send + Sync,
{
    pub(super) store: Arc<S>,
    pub(super) catalog: Arc<K>,
    clock: Arc<C>,
    config: Arc<LifecycleConfig>,
    locks: Arc<UidLocks>,
}

impl<S, K, C> Clone for TicketLifecycleService<S, K, C>
where
    S: TicketStore,
    K: CatalogRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            catalog: Arc::clone(&self.catalog),
            clock: Arc::clone(&self.clock),
            config: Arc::clone(&self.config),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<S, K, C> TicketLifecycleService<S, K, C>
where
    S: TicketStore,
    K: CatalogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default configuration.
    #[must_use]
    pub fn new(store: Arc<S>, catalog: Arc<K>, clock: Arc<C>) -> Self {
        Self {
            store,
            catalog,
            clock,
            config: Arc::new(LifecycleConfig::default()),
            locks: Arc::new(UidLocks::new()),
        }
    }

    /// Replaces the service configuration.
    #[must_use]
    pub fn with_config(mut self, config: LifecycleConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub(super) async fn find_ticket_or_error(
        &self,
        ticket_id: TicketId,
    ) -> TicketLifecycleResult<Ticket> {
        self.store
            .find_by_id(ticket_id)
            .await?
            .ok_or(TicketLifecycleError::NotFound(ticket_id))
    }

    /// Submits a new ticket.
    ///
    /// Error types with an automated message are triaged automatically: the
    /// first ticket for a uid is closed and the submitter receives the
    /// canned text, while a repeat is escalated to the admins.
    ///
    /// # Errors
    ///
    /// Returns [`TicketLifecycleError::Domain`] for blank uid or description,
    /// [`TicketLifecycleError::UnknownErrorType`] when the error type is not
    /// in the catalog, or repository and template errors. Nothing is written
    /// when an error is returned.
    pub async fn submit(&self, request: SubmitTicketRequest) -> TicketLifecycleResult<Ticket> {
        let SubmitTicketRequest {
            uid: raw_uid,
            error_type_id,
            description,
            comment,
            actor,
        } = request;

        let uid = Uid::new(raw_uid)?;
        let mut new_ticket = NewTicket::new(uid, actor.id(), error_type_id, description)?;
        if let Some(text) = comment {
            new_ticket = new_ticket.with_comment(text);
        }
        if self.catalog.find_error_type(error_type_id).await?.is_none() {
            return Err(TicketLifecycleError::UnknownErrorType(error_type_id));
        }

        let _guard = self.locks.lock(new_ticket.uid()).await;
        let triage = self.triage(new_ticket.uid(), error_type_id).await?;
        let status = triage.status();
        let ticket = Ticket::submit(new_ticket, status, &*self.clock);
        let notifications = self.submission_notifications(&ticket, &triage)?;
        let audit_entry =
            AuditLogEntry::created(ticket.id(), actor.id(), ticket.uid(), status, &*self.clock);

        self.store
            .commit(&TicketCommit {
                ticket: ticket.clone(),
                kind: CommitKind::Create,
                audit_entry,
                notifications,
            })
            .await?;

        info!(
            ticket_id = %ticket.id(),
            uid = %ticket.uid(),
            error_type_id = %error_type_id,
            status = %status,
            "ticket submitted"
        );
        Ok(ticket)
    }

    /// Updates a ticket's status and/or appends to its comment thread.
    ///
    /// Notifications fire only on the edge into the new status: escalation
    /// alerts the admins, forwarding to NBFC and resolution notify the
    /// submitter.
    ///
    /// # Errors
    ///
    /// Returns [`TicketLifecycleError::Forbidden`] when the actor may not
    /// resolve tickets, [`TicketLifecycleError::NotFound`] for an unknown
    /// ticket, [`TicketLifecycleError::Domain`] when the transition policy
    /// rejects the change, or repository and template errors. Nothing is
    /// written when an error is returned.
    pub async fn update(&self, request: UpdateTicketRequest) -> TicketLifecycleResult<Ticket> {
        let UpdateTicketRequest {
            ticket_id,
            status,
            comment,
            actor,
        } = request;
        ensure_can_resolve(actor)?;

        let uid = self.find_ticket_or_error(ticket_id).await?.uid().clone();
        let _guard = self.locks.lock(&uid).await;
        let mut ticket = self.find_ticket_or_error(ticket_id).await?;

        let comment_changed = comment
            .as_deref()
            .is_some_and(|text| ticket.append_comment(text));
        let transition = match status {
            Some(target) => ticket
                .change_status(target, self.config.transition_policy)
                .inspect_err(|err| warn!(ticket_id = %ticket_id, error = %err, "update rejected"))?,
            None => None,
        };
        ticket.touch(&*self.clock);

        let notifications = self.transition_notifications(&ticket, transition)?;
        let audit_entry = AuditLogEntry::updated(
            ticket_id,
            actor.id(),
            transition.map(|edge| edge.to),
            &*self.clock,
        );

        self.store
            .commit(&TicketCommit {
                ticket: ticket.clone(),
                kind: CommitKind::Update,
                audit_entry,
                notifications,
            })
            .await?;

        info!(
            ticket_id = %ticket_id,
            status = %ticket.status(),
            status_changed = transition.is_some(),
            comment_changed,
            "ticket updated"
        );
        Ok(ticket)
    }

    /// Marks a ticket completed, notifying its submitter.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::update`].
    pub async fn complete(
        &self,
        actor: Actor,
        ticket_id: TicketId,
    ) -> TicketLifecycleResult<Ticket> {
        self.update(UpdateTicketRequest::new(actor, ticket_id).with_status(TicketStatus::Completed))
            .await
    }

    async fn triage(&self, uid: &Uid, error_type_id: ErrorTypeId) -> TicketLifecycleResult<Triage> {
        let Some(message) = self.catalog.find_automated_message(error_type_id).await? else {
            return Ok(Triage::Manual);
        };
        if self.has_prior_submission(uid, error_type_id).await? {
            Ok(Triage::Resubmission)
        } else {
            Ok(Triage::FirstOccurrence(message))
        }
    }

    async fn has_prior_submission(
        &self,
        uid: &Uid,
        error_type_id: ErrorTypeId,
    ) -> TicketLifecycleResult<bool> {
        let prior = self
            .store
            .find_by_uid_and_error_type(uid, error_type_id)
            .await?;
        let cutoff = self
            .config
            .resubmission_window()
            .and_then(|window| self.clock.utc().checked_sub_signed(window));
        let found = match cutoff {
            Some(since) => prior.iter().any(|ticket| ticket.created_at() >= since),
            None => !prior.is_empty(),
        };
        debug!(
            uid = %uid,
            error_type_id = %error_type_id,
            prior = prior.len(),
            found,
            "re-submission check"
        );
        Ok(found)
    }

    fn submission_notifications(
        &self,
        ticket: &Ticket,
        triage: &Triage,
    ) -> TicketLifecycleResult<Vec<PendingNotification>> {
        let templates = &self.config.templates;
        let uid = ticket.uid().as_str();
        let notifications = match triage {
            Triage::Manual => Vec::new(),
            Triage::FirstOccurrence(message) => vec![
                PendingNotification::System(SystemNotification::new(
                    ticket,
                    templates.render_submitter_auto_resolved(uid, message.message())?,
                    &*self.clock,
                )),
                PendingNotification::Admin(AdminNotification::new(
                    ticket.id(),
                    templates.render_admin_created(uid)?,
                    &*self.clock,
                )),
            ],
            Triage::Resubmission => vec![PendingNotification::Admin(AdminNotification::new(
                ticket.id(),
                templates.render_admin_resubmitted(uid)?,
                &*self.clock,
            ))],
        };
        Ok(notifications)
    }

    fn transition_notifications(
        &self,
        ticket: &Ticket,
        transition: Option<StatusTransition>,
    ) -> TicketLifecycleResult<Vec<PendingNotification>> {
        let Some(edge) = transition else {
            return Ok(Vec::new());
        };
        let templates = &self.config.templates;
        let uid = ticket.uid().as_str();
        let notification = match edge.to {
            TicketStatus::InProgress => return Ok(Vec::new()),
            TicketStatus::Escalated => PendingNotification::Admin(AdminNotification::new(
                ticket.id(),
                templates.render_admin_escalated(uid)?,
                &*self.clock,
            )),
            TicketStatus::AwaitingNbfc => PendingNotification::System(SystemNotification::new(
                ticket,
                templates.render_submitter_awaiting_nbfc(uid, ticket.comment())?,
                &*self.clock,
            )),
            TicketStatus::Completed | TicketStatus::Closed => {
                PendingNotification::System(SystemNotification::new(
                    ticket,
                    templates.render_submitter_resolved(uid, ticket.comment())?,
                    &*self.clock,
                ))
            }
        };
        Ok(vec![notification])
    }
}

fn ensure_can_resolve(actor: Actor) -> TicketLifecycleResult<()> {
    if actor.role().can_resolve() {
        return Ok(());
    }
    warn!(actor = %actor.id(), role = %actor.role(), "ticket update forbidden");
    Err(TicketLifecycleError::Forbidden {
        actor: actor.id(),
        role: actor.role(),
    })
}
