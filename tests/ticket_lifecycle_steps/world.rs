//! Shared world state for ticket lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use qrt::{
    catalog::{adapters::memory::InMemoryCatalog, domain::ErrorTypeId},
    config::LifecycleConfig,
    ticket::{
        adapters::memory::InMemoryTicketStore,
        domain::{Actor, Role, Ticket, UserId},
        services::{TicketLifecycleError, TicketLifecycleService},
    },
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTicketService =
    TicketLifecycleService<InMemoryTicketStore, InMemoryCatalog, DefaultClock>;

/// Scenario world for ticket lifecycle behaviour tests.
pub struct TicketWorld {
    pub store: Arc<InMemoryTicketStore>,
    pub catalog: Arc<InMemoryCatalog>,
    pub service: TestTicketService,
    pub submitter: Actor,
    pub resolver: Actor,
    pub error_types: HashMap<String, ErrorTypeId>,
    pub last_ticket: Option<Ticket>,
    pub last_update_result: Option<Result<Ticket, TicketLifecycleError>>,
}

impl TicketWorld {
    /// Creates a world with an empty catalog and store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTicketStore::new());
        let catalog = Arc::new(InMemoryCatalog::new());
        let service = TicketLifecycleService::new(
            Arc::clone(&store),
            Arc::clone(&catalog),
            Arc::new(DefaultClock),
        );

        Self {
            store,
            catalog,
            service,
            submitter: Actor::new(UserId::new(), Role::Pre),
            resolver: Actor::new(UserId::new(), Role::DataCr),
            error_types: HashMap::new(),
            last_ticket: None,
            last_update_result: None,
        }
    }

    /// Rebuilds the service over the same store and catalog.
    pub fn reconfigure(&mut self, config: LifecycleConfig) {
        self.service = TicketLifecycleService::new(
            Arc::clone(&self.store),
            Arc::clone(&self.catalog),
            Arc::new(DefaultClock),
        )
        .with_config(config);
    }

    /// Looks up an error type registered earlier in the scenario.
    pub fn error_type(&self, name: &str) -> Result<ErrorTypeId, eyre::Report> {
        self.error_types
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("error type {name} was not registered in this scenario"))
    }

    /// Returns the ticket the scenario is working on.
    pub fn ticket(&self) -> Result<&Ticket, eyre::Report> {
        self.last_ticket
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing ticket in scenario world"))
    }
}

impl Default for TicketWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TicketWorld {
    TicketWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
