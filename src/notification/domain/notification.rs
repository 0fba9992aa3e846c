//! Submitter-facing and admin-facing notification records.

use crate::ticket::domain::{Ticket, TicketId, Uid, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a notification in either channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(Uuid);

impl NotificationId {
    /// Creates a new random notification identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a notification identifier from an existing UUID.
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

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Behaviour shared by both notification channels.
pub trait Notification {
    /// Returns the notification identifier.
    fn id(&self) -> NotificationId;

    /// Returns the ticket the notification is about.
    fn ticket_id(&self) -> TicketId;

    /// Returns whether the notification has been read.
    fn is_read(&self) -> bool;

    /// Marks the notification as read.
    fn mark_read(&mut self);
}

/// Notification addressed to the submitter of a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemNotification {
    id: NotificationId,
    ticket_id: TicketId,
    submitter_id: UserId,
    uid: Uid,
    message: String,
    timestamp: DateTime<Utc>,
    is_read: bool,
}

impl SystemNotification {
    /// Creates an unread notification for the ticket's submitter.
    #[must_use]
    pub fn new(ticket: &Ticket, message: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: NotificationId::new(),
            ticket_id: ticket.id(),
            submitter_id: ticket.submitter_id(),
            uid: ticket.uid().clone(),
            message: message.into(),
            timestamp: clock.utc(),
            is_read: false,
        }
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(
        id: NotificationId,
        ticket_id: TicketId,
        submitter_id: UserId,
        uid: Uid,
        message: String,
        timestamp: DateTime<Utc>,
        is_read: bool,
    ) -> Self {
        Self {
            id,
            ticket_id,
            submitter_id,
            uid,
            message,
            timestamp,
            is_read,
        }
    }

    /// Returns the addressed submitter.
    #[must_use]
    pub const fn submitter_id(&self) -> UserId {
        self.submitter_id
    }

    /// Returns the ticket's uid, copied for display.
    #[must_use]
    pub const fn uid(&self) -> &Uid {
        &self.uid
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when the notification was emitted.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Notification for SystemNotification {
    fn id(&self) -> NotificationId {
        self.id
    }

    fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    fn is_read(&self) -> bool {
        self.is_read
    }

    fn mark_read(&mut self) {
        self.is_read = true;
    }
}

/// Notification addressed to the admin audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminNotification {
    id: NotificationId,
    ticket_id: TicketId,
    message: String,
    timestamp: DateTime<Utc>,
    is_read: bool,
}

impl AdminNotification {
    /// Creates an unread admin notification about a ticket.
    #[must_use]
    pub fn new(ticket_id: TicketId, message: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: NotificationId::new(),
            ticket_id,
            message: message.into(),
            timestamp: clock.utc(),
            is_read: false,
        }
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(
        id: NotificationId,
        ticket_id: TicketId,
        message: String,
        timestamp: DateTime<Utc>,
        is_read: bool,
    ) -> Self {
        Self {
            id,
            ticket_id,
            message,
            timestamp,
            is_read,
        }
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when the notification was emitted.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Notification for AdminNotification {
    fn id(&self) -> NotificationId {
        self.id
    }

    fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    fn is_read(&self) -> bool {
        self.is_read
    }

    fn mark_read(&mut self) {
        self.is_read = true;
    }
}

/// A notification produced by a lifecycle operation and not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingNotification {
    /// Addressed to the ticket's submitter.
    System(SystemNotification),
    /// Addressed to the admin audience.
    Admin(AdminNotification),
}
