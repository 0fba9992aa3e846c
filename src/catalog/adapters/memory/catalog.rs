//! Thread-safe in-memory catalog.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::catalog::{
    domain::{AutomatedMessage, ErrorType, ErrorTypeId},
    ports::{CatalogRepository, CatalogRepositoryError, CatalogRepositoryResult},
};

/// In-memory catalog of error types and automated messages.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    error_types: Vec<ErrorType>,
    messages: HashMap<ErrorTypeId, AutomatedMessage>,
}

impl InMemoryCatalogState {
    fn contains(&self, id: ErrorTypeId) -> bool {
        self.error_types.iter().any(|error_type| error_type.id() == id)
    }
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> CatalogRepositoryError {
    CatalogRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn register_error_type(&self, error_type: &ErrorType) -> CatalogRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains(error_type.id()) {
            return Err(CatalogRepositoryError::DuplicateErrorType(error_type.id()));
        }
        state.error_types.push(error_type.clone());
        Ok(())
    }

    async fn register_automated_message(
        &self,
        message: &AutomatedMessage,
    ) -> CatalogRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let error_type_id = message.error_type_id();
        if !state.contains(error_type_id) {
            return Err(CatalogRepositoryError::UnknownErrorType(error_type_id));
        }
        if state.messages.contains_key(&error_type_id) {
            return Err(CatalogRepositoryError::DuplicateAutomatedMessage(
                error_type_id,
            ));
        }
        state.messages.insert(error_type_id, message.clone());
        Ok(())
    }

    async fn find_error_type(
        &self,
        id: ErrorTypeId,
    ) -> CatalogRepositoryResult<Option<ErrorType>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .error_types
            .iter()
            .find(|error_type| error_type.id() == id)
            .cloned())
    }

    async fn list_error_types(&self) -> CatalogRepositoryResult<Vec<ErrorType>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.error_types.clone())
    }

    async fn find_automated_message(
        &self,
        error_type_id: ErrorTypeId,
    ) -> CatalogRepositoryResult<Option<AutomatedMessage>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.messages.get(&error_type_id).cloned())
    }
}
