//! Append-only audit trail of actions taken against tickets.
//!
//! Entries are written by the ticket lifecycle engine as part of each
//! ticket commit and are read-only to everything else.

pub mod adapters;
pub mod domain;
pub mod ports;
