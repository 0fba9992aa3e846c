//! Adapter implementations for the ticket ports.

pub mod memory;
pub mod postgres;
