//! Error-type catalog consulted by the ticket lifecycle engine.
//!
//! The catalog holds the fixed set of error types a submitter can file a
//! ticket against, together with the automated resolution messages attached
//! to some of them. The lifecycle engine only reads from it; registration
//! exists for the catalog-management collaborator and for test seeding.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
