//! Diesel row models for ticket persistence.

use super::schema::{admin_notifications, audit_log_entries, system_notifications, tickets};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for ticket records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tickets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TicketRow {
    /// Internal ticket identifier.
    pub id: uuid::Uuid,
    /// External uid.
    pub uid: String,
    /// Submitting user.
    pub submitter_id: uuid::Uuid,
    /// Catalogued error type.
    pub error_type_id: uuid::Uuid,
    /// Submitter's description.
    pub description: String,
    /// Accumulated comment thread.
    pub comment: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for ticket records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tickets)]
pub struct NewTicketRow {
    /// Internal ticket identifier.
    pub id: uuid::Uuid,
    /// External uid.
    pub uid: String,
    /// Submitting user.
    pub submitter_id: uuid::Uuid,
    /// Catalogued error type.
    pub error_type_id: uuid::Uuid,
    /// Submitter's description.
    pub description: String,
    /// Accumulated comment thread.
    pub comment: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model carrying the mutable ticket columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tickets)]
#[diesel(treat_none_as_null = true)]
pub struct TicketChangeset {
    /// Accumulated comment thread.
    pub comment: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Audit trail row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = audit_log_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Ticket the entry concerns.
    pub ticket_id: uuid::Uuid,
    /// Acting user.
    pub actor_id: uuid::Uuid,
    /// Recorded action.
    pub action: String,
    /// When the action happened.
    pub occurred_at: DateTime<Utc>,
    /// Human-readable summary.
    pub details: String,
}

/// Submitter notification row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = system_notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SystemNotificationRow {
    /// Notification identifier.
    pub id: uuid::Uuid,
    /// Ticket the notification concerns.
    pub ticket_id: uuid::Uuid,
    /// Addressed submitter.
    pub submitter_id: uuid::Uuid,
    /// Ticket uid.
    pub uid: String,
    /// Message text.
    pub message: String,
    /// Read flag.
    pub is_read: bool,
    /// Emission timestamp.
    pub created_at: DateTime<Utc>,
}

/// Admin notification row, used for both reads and inserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = admin_notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AdminNotificationRow {
    /// Notification identifier.
    pub id: uuid::Uuid,
    /// Ticket the notification concerns.
    pub ticket_id: uuid::Uuid,
    /// Message text.
    pub message: String,
    /// Read flag.
    pub is_read: bool,
    /// Emission timestamp.
    pub created_at: DateTime<Utc>,
}
