//! Domain model for the ticket lifecycle.
//!
//! Tickets are created once by a submission and afterwards mutated only
//! through comment appends and status changes. Infrastructure concerns stay
//! outside this boundary.

mod actor;
mod error;
mod ids;
mod status;
mod ticket;

pub use actor::{Actor, Role};
pub use error::{ParseRoleError, ParseTicketStatusError, TicketDomainError};
pub use ids::{TicketId, Uid, UserId};
pub use status::{StatusTransition, TicketStatus, TransitionPolicy};
pub use ticket::{COMMENT_SEPARATOR, NewTicket, PersistedTicketData, Ticket};
