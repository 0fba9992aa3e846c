//! Authenticated actors and their roles.

use super::{ParseRoleError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Front-line user who files tickets.
    Pre,
    /// Administrator.
    Admin,
    /// Data-correction staff.
    #[serde(rename = "DATACR")]
    DataCr,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pre => "PRE",
            Self::Admin => "ADMIN",
            Self::DataCr => "DATACR",
        }
    }

    /// Returns whether the role may triage and resolve tickets.
    #[must_use]
    pub const fn can_resolve(self) -> bool {
        matches!(self, Self::Admin | Self::DataCr)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "PRE" => Ok(Self::Pre),
            "ADMIN" => Ok(Self::Admin),
            "DATACR" => Ok(Self::DataCr),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// An authenticated user acting on the ticket system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    id: UserId,
    role: Role,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the actor's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}
