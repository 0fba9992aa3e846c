//! Audit log entry types.

use crate::ticket::domain::{TicketId, TicketStatus, Uid, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for an audit log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditEntryId(Uuid);

impl AuditEntryId {
    /// Creates a new random entry identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an entry identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for AuditEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AuditEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of action recorded against a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// The ticket was submitted.
    Create,
    /// The ticket's status or comment was updated.
    Update,
}

impl AuditAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing a stored audit action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown audit action: {0}")]
pub struct ParseAuditActionError(pub String);

impl TryFrom<&str> for AuditAction {
    type Error = ParseAuditActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "CREATE" => Ok(Self::Create),
            "UPDATE" => Ok(Self::Update),
            _ => Err(ParseAuditActionError(value.to_owned())),
        }
    }
}

/// One immutable record in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    id: AuditEntryId,
    ticket_id: TicketId,
    actor_id: UserId,
    action: AuditAction,
    timestamp: DateTime<Utc>,
    details: String,
}

impl AuditLogEntry {
    /// Records the creation of a ticket.
    #[must_use]
    pub fn created(
        ticket_id: TicketId,
        actor_id: UserId,
        uid: &Uid,
        status: TicketStatus,
        clock: &impl Clock,
    ) -> Self {
        Self::new(
            ticket_id,
            actor_id,
            AuditAction::Create,
            format!("Ticket created for UID {uid} with status {status}."),
            clock,
        )
    }

    /// Records an update to a ticket.
    ///
    /// `new_status` is the status the ticket moved to, or `None` when only
    /// other details changed.
    #[must_use]
    pub fn updated(
        ticket_id: TicketId,
        actor_id: UserId,
        new_status: Option<TicketStatus>,
        clock: &impl Clock,
    ) -> Self {
        let details = match new_status {
            Some(status) => format!("Status changed to {status} for ticket {ticket_id}."),
            None => format!("Ticket details updated for {ticket_id}."),
        };
        Self::new(ticket_id, actor_id, AuditAction::Update, details, clock)
    }

    fn new(
        ticket_id: TicketId,
        actor_id: UserId,
        action: AuditAction,
        details: String,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: AuditEntryId::new(),
            ticket_id,
            actor_id,
            action,
            timestamp: clock.utc(),
            details,
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(
        id: AuditEntryId,
        ticket_id: TicketId,
        actor_id: UserId,
        action: AuditAction,
        timestamp: DateTime<Utc>,
        details: String,
    ) -> Self {
        Self {
            id,
            ticket_id,
            actor_id,
            action,
            timestamp,
            details,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> AuditEntryId {
        self.id
    }

    /// Returns the ticket the entry refers to.
    #[must_use]
    pub const fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn actor_id(&self) -> UserId {
        self.actor_id
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> AuditAction {
        self.action
    }

    /// Returns when the action happened.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the human-readable detail line.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }
}
