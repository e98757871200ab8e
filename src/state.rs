//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthorService, BookService};
use crate::domain::repositories::{AuthorRepository, BookRepository};
use crate::infrastructure::memory::InMemoryCatalog;

/// Services available to every request.
///
/// Repositories are type-erased so the same router serves both the
/// PostgreSQL and the in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub book_service: Arc<BookService<dyn BookRepository>>,
    pub author_service: Arc<AuthorService<dyn AuthorRepository>>,
}

impl AppState {
    /// Builds the state from a pair of repositories.
    pub fn new(
        book_repository: Arc<dyn BookRepository>,
        author_repository: Arc<dyn AuthorRepository>,
    ) -> Self {
        Self {
            book_service: Arc::new(BookService::new(book_repository)),
            author_service: Arc::new(AuthorService::new(author_repository)),
        }
    }

    /// Builds the state over a fresh in-memory catalog.
    pub fn in_memory() -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        Self::new(catalog.clone(), catalog)
    }
}
