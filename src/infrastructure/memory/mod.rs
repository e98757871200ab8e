//! In-memory repository implementations.
//!
//! Backs the service when no database is configured, and keeps the HTTP
//! integration tests independent from PostgreSQL.

mod catalog;

pub use catalog::InMemoryCatalog;
