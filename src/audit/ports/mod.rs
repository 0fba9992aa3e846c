//! Port contracts for reading the audit trail.

pub mod repository;

pub use repository::{AuditLogRepository, AuditRepositoryError, AuditRepositoryResult};
