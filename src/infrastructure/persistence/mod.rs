//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgBookRepository`] - Book storage and author links
//! - [`PgAuthorRepository`] - Author storage and lookup

pub mod pg_author_repository;
pub mod pg_book_repository;

pub use pg_author_repository::PgAuthorRepository;
pub use pg_book_repository::PgBookRepository;
