//! Port contracts for ticket persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by ticket services.

pub mod repository;

pub use repository::{
    CommitKind, TicketCommit, TicketRepository, TicketRepositoryError, TicketRepositoryResult,
    TicketStore,
};
