//! Repository trait for book data access.

use crate::domain::entities::{Book, NewBook};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing books and their author links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryCatalog`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Lists every book, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self) -> Result<Vec<Book>, AppError>;

    /// Lists books whose title contains `title`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_title(&self, title: &str) -> Result<Vec<Book>, AppError>;

    /// Finds a book by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError>;

    /// Stores a new book linked to its initial author.
    ///
    /// The author is registered first if the store does not know it yet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the requested id is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError>;

    /// Overwrites a stored book, including its author set.
    ///
    /// Authors unknown to the store are registered from the entity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no book has this id.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, book: Book) -> Result<Book, AppError>;

    /// Deletes a book and its author links. Authors are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no book has this id.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Counts stored books.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
