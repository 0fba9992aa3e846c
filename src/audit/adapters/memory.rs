//! In-memory append structure for audit entries.

use crate::audit::domain::AuditLogEntry;
use crate::ticket::domain::TicketId;

/// Newest-first, append-only list of audit entries.
///
/// Holds no lock of its own; owners such as the in-memory ticket store guard
/// it together with the tickets it describes.
#[derive(Debug, Clone, Default)]
pub struct AuditTrail {
    entries: Vec<AuditLogEntry>,
}

impl AuditTrail {
    /// Creates an empty trail.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry so that it is listed first.
    pub fn append(&mut self, entry: AuditLogEntry) {
        self.entries.insert(0, entry);
    }

    /// Returns every entry, newest first.
    #[must_use]
    pub fn list_all(&self) -> Vec<AuditLogEntry> {
        self.entries.clone()
    }

    /// Returns the entries for one ticket, newest first.
    #[must_use]
    pub fn list_for_ticket(&self, ticket_id: TicketId) -> Vec<AuditLogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.ticket_id() == ticket_id)
            .cloned()
            .collect()
    }
}
