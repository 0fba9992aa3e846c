//! Adapter building blocks for the audit trail.

pub mod memory;
