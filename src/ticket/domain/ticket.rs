//! Ticket aggregate root.

use super::{
    StatusTransition, TicketDomainError, TicketId, TicketStatus, TransitionPolicy, Uid, UserId,
};
use crate::catalog::domain::ErrorTypeId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Separator placed between successive resolver comments.
pub const COMMENT_SEPARATOR: &str = "\n---\n";

/// Validated submission data for a ticket that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    uid: Uid,
    submitter_id: UserId,
    error_type_id: ErrorTypeId,
    description: String,
    comment: Option<String>,
}

impl NewTicket {
    /// Creates validated submission data.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::EmptyDescription`] when the description
    /// is blank.
    pub fn new(
        uid: Uid,
        submitter_id: UserId,
        error_type_id: ErrorTypeId,
        description: impl Into<String>,
    ) -> Result<Self, TicketDomainError> {
        let raw = description.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TicketDomainError::EmptyDescription);
        }
        Ok(Self {
            uid,
            submitter_id,
            error_type_id,
            description: trimmed.to_owned(),
            comment: None,
        })
    }

    /// Sets the submitter's initial comment. Blank comments are dropped.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let raw = comment.into();
        let trimmed = raw.trim();
        self.comment = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Returns the external uid.
    #[must_use]
    pub const fn uid(&self) -> &Uid {
        &self.uid
    }

    /// Returns the error type reference.
    #[must_use]
    pub const fn error_type_id(&self) -> ErrorTypeId {
        self.error_type_id
    }
}

/// Ticket aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    id: TicketId,
    uid: Uid,
    submitter_id: UserId,
    error_type_id: ErrorTypeId,
    description: String,
    comment: Option<String>,
    status: TicketStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTicketData {
    /// Persisted ticket identifier.
    pub id: TicketId,
    /// Persisted external uid.
    pub uid: Uid,
    /// Persisted submitter reference.
    pub submitter_id: UserId,
    /// Persisted error type reference.
    pub error_type_id: ErrorTypeId,
    /// Persisted description.
    pub description: String,
    /// Persisted accumulated comment, if any.
    pub comment: Option<String>,
    /// Persisted status.
    pub status: TicketStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Creates a ticket from a submission with its computed initial status.
    #[must_use]
    pub fn submit(new_ticket: NewTicket, status: TicketStatus, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let NewTicket {
            uid,
            submitter_id,
            error_type_id,
            description,
            comment,
        } = new_ticket;

        Self {
            id: TicketId::new(),
            uid,
            submitter_id,
            error_type_id,
            description,
            comment,
            status,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a ticket from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTicketData) -> Self {
        Self {
            id: data.id,
            uid: data.uid,
            submitter_id: data.submitter_id,
            error_type_id: data.error_type_id,
            description: data.description,
            comment: data.comment,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the ticket identifier.
    #[must_use]
    pub const fn id(&self) -> TicketId {
        self.id
    }

    /// Returns the external uid.
    #[must_use]
    pub const fn uid(&self) -> &Uid {
        &self.uid
    }

    /// Returns the submitter reference.
    #[must_use]
    pub const fn submitter_id(&self) -> UserId {
        self.submitter_id
    }

    /// Returns the error type reference.
    #[must_use]
    pub const fn error_type_id(&self) -> ErrorTypeId {
        self.error_type_id
    }

    /// Returns the submitter's description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the accumulated comment thread, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TicketStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Appends resolver text to the comment thread.
    ///
    /// Text is trimmed first; blank text leaves the thread untouched. Returns
    /// whether the thread changed.
    pub fn append_comment(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.comment = Some(match self.comment.take() {
            Some(existing) if !existing.is_empty() => {
                format!("{existing}{COMMENT_SEPARATOR}{trimmed}")
            }
            _ => trimmed.to_owned(),
        });
        true
    }

    /// Moves the ticket to `target` when the policy allows it.
    ///
    /// Returns the transition that happened, or `None` when the ticket is
    /// already in `target`.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::InvalidStatusTransition`] when the policy
    /// rejects the edge.
    pub fn change_status(
        &mut self,
        target: TicketStatus,
        policy: TransitionPolicy,
    ) -> Result<Option<StatusTransition>, TicketDomainError> {
        let from = self.status;
        if from == target {
            return Ok(None);
        }
        if !policy.permits(from, target) {
            return Err(TicketDomainError::InvalidStatusTransition {
                ticket_id: self.id,
                from,
                to: target,
            });
        }
        self.status = target;
        Ok(Some(StatusTransition { from, to: target }))
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
