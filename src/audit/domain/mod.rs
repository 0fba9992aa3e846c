//! Domain model for audit log entries.

mod entry;

pub use entry::{AuditAction, AuditEntryId, AuditLogEntry, ParseAuditActionError};
