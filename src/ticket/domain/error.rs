//! Error types for ticket domain validation and parsing.

use super::{TicketId, TicketStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating tickets.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TicketDomainError {
    /// The external uid is empty after trimming.
    #[error("ticket uid must not be empty")]
    EmptyUid,

    /// The ticket description is empty after trimming.
    #[error("ticket description must not be empty")]
    EmptyDescription,

    /// The requested status change is not allowed by the transition policy.
    #[error("invalid status transition for ticket {ticket_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Ticket being updated.
        ticket_id: TicketId,
        /// Current status.
        from: TicketStatus,
        /// Requested status.
        to: TicketStatus,
    },
}

/// Error returned while parsing ticket statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown ticket status: {0}")]
pub struct ParseTicketStatusError(pub String);

/// Error returned while parsing actor roles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
