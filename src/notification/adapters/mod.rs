//! Adapter building blocks for the notification channels.

pub mod memory;
