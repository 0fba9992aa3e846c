//! Support-ticket lifecycle engine.
//!
//! Submitters file tickets against catalogued error types. Error types with
//! an automated resolution are triaged on submission: the first ticket for a
//! uid closes immediately with the canned answer and a repeat escalates to
//! the admins. Resolvers then move tickets between statuses and append to
//! the comment thread. Every mutation writes its audit entry and
//! notifications in the same commit as the ticket itself.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
