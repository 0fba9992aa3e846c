//! Error types and the automated messages attached to them.

use super::{AutomatedMessageId, CatalogDomainError, ErrorTypeId};
use serde::{Deserialize, Serialize};

/// A category of problem a submitter can raise a ticket for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorType {
    id: ErrorTypeId,
    name: String,
    description: String,
}

impl ErrorType {
    /// Creates a new error type with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::EmptyErrorTypeName`] when the name is
    /// blank.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, CatalogDomainError> {
        Self::with_id(ErrorTypeId::new(), name, description)
    }

    /// Creates an error type with a caller-supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::EmptyErrorTypeName`] when the name is
    /// blank.
    pub fn with_id(
        id: ErrorTypeId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, CatalogDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(CatalogDomainError::EmptyErrorTypeName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
            description: description.into(),
        })
    }

    /// Returns the error type identifier.
    #[must_use]
    pub const fn id(&self) -> ErrorTypeId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Canned resolution text sent to a submitter whose ticket is auto-closed.
///
/// The existence of a message for an error type is what switches ticket
/// submission into auto-triage; its text is only surfaced to the submitter
/// on the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatedMessage {
    id: AutomatedMessageId,
    error_type_id: ErrorTypeId,
    message: String,
}

impl AutomatedMessage {
    /// Creates an automated message for the given error type.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::EmptyAutomatedMessage`] when the text is
    /// blank.
    pub fn new(
        error_type_id: ErrorTypeId,
        message: impl Into<String>,
    ) -> Result<Self, CatalogDomainError> {
        let raw = message.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CatalogDomainError::EmptyAutomatedMessage);
        }
        Ok(Self {
            id: AutomatedMessageId::new(),
            error_type_id,
            message: trimmed.to_owned(),
        })
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> AutomatedMessageId {
        self.id
    }

    /// Returns the error type this message resolves.
    #[must_use]
    pub const fn error_type_id(&self) -> ErrorTypeId {
        self.error_type_id
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
