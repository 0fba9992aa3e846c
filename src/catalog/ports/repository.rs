//! Repository port for catalog lookup and registration.

use crate::catalog::domain::{AutomatedMessage, ErrorType, ErrorTypeId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalog repository operations.
pub type CatalogRepositoryResult<T> = Result<T, CatalogRepositoryError>;

/// Catalog persistence contract.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Registers a new error type.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogRepositoryError::DuplicateErrorType`] when the
    /// identifier is already registered.
    async fn register_error_type(&self, error_type: &ErrorType) -> CatalogRepositoryResult<()>;

    /// Registers the automated message for an error type.
    ///
    /// At most one message may be attached to an error type.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogRepositoryError::UnknownErrorType`] when the error
    /// type is not registered, or
    /// [`CatalogRepositoryError::DuplicateAutomatedMessage`] when it already
    /// has a message.
    async fn register_automated_message(
        &self,
        message: &AutomatedMessage,
    ) -> CatalogRepositoryResult<()>;

    /// Finds an error type by identifier.
    async fn find_error_type(&self, id: ErrorTypeId)
    -> CatalogRepositoryResult<Option<ErrorType>>;

    /// Returns every registered error type in registration order.
    async fn list_error_types(&self) -> CatalogRepositoryResult<Vec<ErrorType>>;

    /// Finds the automated message attached to an error type.
    ///
    /// Returns `None` when the error type has no automated resolution.
    async fn find_automated_message(
        &self,
        error_type_id: ErrorTypeId,
    ) -> CatalogRepositoryResult<Option<AutomatedMessage>>;
}

/// Errors returned by catalog repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CatalogRepositoryError {
    /// An error type with the same identifier already exists.
    #[error("duplicate error type: {0}")]
    DuplicateErrorType(ErrorTypeId),

    /// The referenced error type is not registered.
    #[error("unknown error type: {0}")]
    UnknownErrorType(ErrorTypeId),

    /// The error type already has an automated message.
    #[error("error type {0} already has an automated message")]
    DuplicateAutomatedMessage(ErrorTypeId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CatalogRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
