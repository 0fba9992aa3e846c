//! Ticket status, transition edges and the transition policy.

use super::ParseTicketStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticket lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Waiting on, or being worked by, a resolver.
    InProgress,
    /// Raised for human attention.
    Escalated,
    /// Forwarded to the NBFC support team.
    #[serde(rename = "AWAITING_NBFC")]
    AwaitingNbfc,
    /// Resolved by a resolver.
    Completed,
    /// Closed, either automatically or by a resolver.
    Closed,
}

impl TicketStatus {
    /// Every status in display order.
    pub const ALL: [Self; 5] = [
        Self::InProgress,
        Self::Escalated,
        Self::AwaitingNbfc,
        Self::Completed,
        Self::Closed,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Escalated => "ESCALATED",
            Self::AwaitingNbfc => "AWAITING_NBFC",
            Self::Completed => "COMPLETED",
            Self::Closed => "CLOSED",
        }
    }

    /// Returns whether the ticket is resolved.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Closed)
    }

    /// Returns whether the strict transition table allows moving to `target`.
    ///
    /// Staying in the same status is not a transition and always returns
    /// `false`; callers treat it as a no-op instead.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        match (self, target) {
            (Self::InProgress, Self::InProgress)
            | (Self::Escalated, Self::Escalated)
            | (Self::AwaitingNbfc, Self::AwaitingNbfc)
            | (Self::Completed, Self::Completed)
            | (Self::Closed, Self::Closed) => false,
            (Self::InProgress | Self::Escalated | Self::AwaitingNbfc, _) => true,
            (Self::Completed, Self::Escalated | Self::Closed) => true,
            (Self::Completed, _) => false,
            (Self::Closed, Self::Escalated) => true,
            (Self::Closed, _) => false,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TicketStatus {
    type Error = ParseTicketStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "IN_PROGRESS" => Ok(Self::InProgress),
            "ESCALATED" => Ok(Self::Escalated),
            "AWAITING_NBFC" => Ok(Self::AwaitingNbfc),
            "COMPLETED" => Ok(Self::Completed),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(ParseTicketStatusError(value.to_owned())),
        }
    }
}

/// A status change that actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransition {
    /// Status before the change.
    pub from: TicketStatus,
    /// Status after the change.
    pub to: TicketStatus,
}

/// Rule set deciding which status changes an update may make.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may be set to any other.
    #[default]
    Permissive,
    /// Only edges allowed by [`TicketStatus::can_transition_to`].
    Strict,
}

impl TransitionPolicy {
    /// Returns whether the policy allows moving from `from` to `to`.
    #[must_use]
    pub const fn permits(self, from: TicketStatus, to: TicketStatus) -> bool {
        match self {
            Self::Permissive => true,
            Self::Strict => from.can_transition_to(to),
        }
    }
}
