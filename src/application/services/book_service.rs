//! Book catalog service.

use std::sync::Arc;

use crate::domain::entities::{Book, NewBook};
use crate::domain::repositories::BookRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for listing, storing and removing books.
///
/// Missing books are reported as [`AppError::NotFound`]; callers decide the
/// wording shown to clients.
pub struct BookService<R: BookRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: BookRepository + ?Sized> BookService<R> {
    /// Creates a new book service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists every book in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list(&self) -> Result<Vec<Book>, AppError> {
        self.repository.list().await
    }

    /// Lists books whose title contains `query`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn find_by_title(&self, query: &str) -> Result<Vec<Book>, AppError> {
        self.repository.find_by_title(query).await
    }

    /// Retrieves a book by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get(&self, id: i64) -> Result<Book, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Book not found", json!({ "id": id })))
    }

    /// Stores a new book under its initial author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the requested id is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn save(&self, new_book: NewBook) -> Result<Book, AppError> {
        let author_id = new_book.author.id;
        let book = self.repository.create(new_book).await?;

        tracing::info!(book_id = book.id, author_id, "Book created");

        Ok(book)
    }

    /// Persists changes to an existing book.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn update(&self, book: Book) -> Result<Book, AppError> {
        let book = self.repository.update(book).await?;

        tracing::info!(book_id = book.id, authors = book.authors().len(), "Book updated");

        Ok(book)
    }

    /// Deletes a book by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete(id).await?;

        tracing::info!(book_id = id, "Book deleted");

        Ok(())
    }

    /// Counts books in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Author, BookDetails, Language};
    use crate::domain::repositories::MockBookRepository;

    fn create_test_book(id: i64, title: &str) -> Book {
        Book::assemble(
            id,
            BookDetails {
                title: title.to_string(),
                isbn: 123_456_789,
                year: 1954,
                language: Some(Language::English),
            },
            vec![Author::new(1, "J. R. R. Tolkien".to_string())],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_book_success() {
        let mut mock_repo = MockBookRepository::new();

        let book = create_test_book(3, "The Two Towers");
        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 3)
            .times(1)
            .returning(move |_| Ok(Some(book.clone())));

        let service = BookService::new(Arc::new(mock_repo));

        let result = service.get(3).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().title, "The Two Towers");
    }

    #[tokio::test]
    async fn test_get_book_not_found() {
        let mut mock_repo = MockBookRepository::new();

        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = BookService::new(Arc::new(mock_repo));

        let result = service.get(42).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_by_title_delegates_query() {
        let mut mock_repo = MockBookRepository::new();

        let book = create_test_book(1, "The Hobbit");
        mock_repo
            .expect_find_by_title()
            .withf(|q| q == "hob")
            .times(1)
            .returning(move |_| Ok(vec![book.clone()]));
        mock_repo.expect_list().never();

        let service = BookService::new(Arc::new(mock_repo));

        let books = service.find_by_title("hob").await.unwrap();

        assert_eq!(books.len(), 1);
    }

    #[tokio::test]
    async fn test_list_books() {
        let mut mock_repo = MockBookRepository::new();

        let books = vec![
            create_test_book(1, "The Hobbit"),
            create_test_book(2, "The Silmarillion"),
        ];
        mock_repo
            .expect_list()
            .times(1)
            .returning(move || Ok(books.clone()));

        let service = BookService::new(Arc::new(mock_repo));

        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_returns_stored_book() {
        let mut mock_repo = MockBookRepository::new();

        let stored = create_test_book(10, "Unfinished Tales");
        mock_repo
            .expect_create()
            .withf(|new_book| new_book.id.is_none() && new_book.author.id == 1)
            .times(1)
            .returning(move |_| Ok(stored.clone()));

        let service = BookService::new(Arc::new(mock_repo));

        let new_book = NewBook {
            id: None,
            details: create_test_book(0, "Unfinished Tales").details(),
            author: Author::new(1, "J. R. R. Tolkien".to_string()),
        };
        let book = service.save(new_book).await.unwrap();

        assert_eq!(book.id, 10);
    }

    #[tokio::test]
    async fn test_save_propagates_conflict() {
        let mut mock_repo = MockBookRepository::new();

        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Book id already taken", json!({}))));

        let service = BookService::new(Arc::new(mock_repo));

        let new_book = NewBook {
            id: Some(1),
            details: create_test_book(1, "Duplicate").details(),
            author: Author::new(1, "J. R. R. Tolkien".to_string()),
        };

        assert!(matches!(
            service.save(new_book).await.unwrap_err(),
            AppError::Conflict { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_book() {
        let mut mock_repo = MockBookRepository::new();

        mock_repo
            .expect_delete()
            .times(1)
            .returning(|id| Err(AppError::not_found("Book not found", json!({ "id": id }))));

        let service = BookService::new(Arc::new(mock_repo));

        assert!(matches!(
            service.delete(9).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }
}
