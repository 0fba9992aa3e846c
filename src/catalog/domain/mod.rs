//! Domain model for the error-type catalog.

mod entry;
mod error;
mod ids;

pub use entry::{AutomatedMessage, ErrorType};
pub use error::CatalogDomainError;
pub use ids::{AutomatedMessageId, ErrorTypeId};
