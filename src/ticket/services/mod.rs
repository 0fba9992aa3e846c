//! Application services for the ticket lifecycle.

mod lifecycle;
mod locks;
mod queries;

pub use lifecycle::{
    SubmitTicketRequest, TicketLifecycleError, TicketLifecycleResult, TicketLifecycleService,
    UpdateTicketRequest,
};
pub use queries::{ErrorTypeCount, TicketFilter, TicketSummary};
