//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls
//! and turning missing rows into typed errors. Services consume repository
//! traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::book_service::BookService`] - Book listing, storage and removal
//! - [`services::author_service::AuthorService`] - Author lookup and registration

pub mod services;
