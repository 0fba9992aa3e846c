//! In-memory ticket store.

mod store;

pub use store::InMemoryTicketStore;
