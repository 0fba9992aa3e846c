//! Unit tests for the catalog context.
