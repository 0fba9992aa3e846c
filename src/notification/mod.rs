//! Notification channels fed by the ticket lifecycle engine.
//!
//! Two independent append-only feeds exist: one addressed to the admin
//! audience collectively and one addressed to each ticket's submitter.
//! Delivery is pull-based; the read flag is the only mutable field.

pub mod adapters;
pub mod domain;
pub mod ports;
