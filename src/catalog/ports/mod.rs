//! Port contracts for the error-type catalog.

pub mod repository;

pub use repository::{CatalogRepository, CatalogRepositoryError, CatalogRepositoryResult};
