//! QRT: support-ticket lifecycle engine.
//!
//! Submitters report errors against a catalog of known error types.
//! Some error types carry an automated resolution that closes a first report
//! immediately; a repeat report for the same uid is escalated to the admins
//! instead. Resolvers then work tickets through their statuses, and every
//! change leaves an audit entry and, where relevant, a notification.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`catalog`]: Error types and their automated messages
//! - [`ticket`]: Submission, triage, updates and queries
//! - [`audit`]: Append-only record of ticket actions
//! - [`notification`]: Submitter and admin notification feeds
//! - [`config`]: Lifecycle engine settings

pub mod audit;
pub mod catalog;
pub mod config;
pub mod notification;
pub mod ticket;
