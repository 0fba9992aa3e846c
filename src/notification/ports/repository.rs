//! Repository port for listing and acknowledging notifications.
//!
//! Notifications are appended only through
//! [`crate::ticket::ports::TicketRepository::commit`], so that they are
//! written if and only if the ticket change that caused them is.

use crate::notification::domain::{AdminNotification, NotificationId, SystemNotification};
use crate::ticket::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification repository operations.
pub type NotificationRepositoryResult<T> = Result<T, NotificationRepositoryError>;

/// Notification feed contract.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Returns the submitter's notifications, newest first.
    async fn list_for_submitter(
        &self,
        submitter_id: UserId,
    ) -> NotificationRepositoryResult<Vec<SystemNotification>>;

    /// Returns the admin feed, newest first.
    async fn list_admin(&self) -> NotificationRepositoryResult<Vec<AdminNotification>>;

    /// Returns the number of unread notifications addressed to a submitter.
    async fn count_unread_for_submitter(
        &self,
        submitter_id: UserId,
    ) -> NotificationRepositoryResult<usize>;

    /// Returns the number of unread admin notifications.
    async fn count_unread_admin(&self) -> NotificationRepositoryResult<usize>;

    /// Marks a submitter notification as read. Marking twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::NotFound`] for an unknown id.
    async fn mark_system_read(&self, id: NotificationId) -> NotificationRepositoryResult<()>;

    /// Marks an admin notification as read. Marking twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::NotFound`] for an unknown id.
    async fn mark_admin_read(&self, id: NotificationId) -> NotificationRepositoryResult<()>;
}

/// Errors returned by notification repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationRepositoryError {
    /// No notification with the identifier exists in the channel.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
