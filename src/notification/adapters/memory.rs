//! In-memory append structure for one notification channel.

use crate::notification::domain::{Notification, NotificationId};

/// Newest-first, append-only feed of notifications.
///
/// Holds no lock of its own; the in-memory ticket store guards it together
/// with the tickets the notifications refer to.
#[derive(Debug, Clone)]
pub struct NotificationFeed<N> {
    items: Vec<N>,
}

impl<N> Default for NotificationFeed<N> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<N> NotificationFeed<N>
where
    N: Notification + Clone,
{
    /// Creates an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notification so that it is listed first.
    pub fn append(&mut self, notification: N) {
        self.items.insert(0, notification);
    }

    /// Returns the notifications matching `predicate`, newest first.
    pub fn list_where(&self, predicate: impl Fn(&N) -> bool) -> Vec<N> {
        self.items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    /// Counts unread notifications matching `predicate`.
    pub fn count_unread_where(&self, predicate: impl Fn(&N) -> bool) -> usize {
        self.items
            .iter()
            .filter(|item| !item.is_read() && predicate(item))
            .count()
    }

    /// Marks a notification as read.
    ///
    /// Returns `false` when no notification has the identifier.
    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.mark_read();
                true
            }
            None => false,
        }
    }
}
