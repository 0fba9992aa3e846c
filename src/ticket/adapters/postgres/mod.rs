//! `PostgreSQL` adapters for ticket lifecycle persistence.
//!
//! One [`TicketCommit`](crate::ticket::ports::TicketCommit) maps to one
//! database transaction spanning the ticket row, its audit entry and any
//! notification rows.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTicketStore, TicketPgPool};
