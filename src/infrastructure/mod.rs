//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence.
//!
//! # Modules
//!
//! - [`memory`] - In-process catalog store
//! - [`persistence`] - PostgreSQL repository implementations

pub mod memory;
pub mod persistence;
