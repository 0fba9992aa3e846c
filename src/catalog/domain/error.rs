//! Error types for catalog validation.

use thiserror::Error;

/// Errors returned while constructing catalog values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogDomainError {
    /// The error type name is empty after trimming.
    #[error("error type name must not be empty")]
    EmptyErrorTypeName,

    /// The automated message text is empty after trimming.
    #[error("automated message text must not be empty")]
    EmptyAutomatedMessage,
}
