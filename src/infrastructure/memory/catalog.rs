//! In-process catalog store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{Author, Book, BookDetails, NewAuthor, NewBook};
use crate::domain::repositories::{AuthorRepository, BookRepository};
use crate::error::AppError;

/// Stored shape of a book: authors are kept by id, like a join table.
#[derive(Debug, Clone)]
struct BookRow {
    id: i64,
    details: BookDetails,
    author_ids: Vec<i64>,
}

#[derive(Debug, Default)]
struct CatalogData {
    books: BTreeMap<i64, BookRow>,
    authors: BTreeMap<i64, Author>,
}

impl CatalogData {
    fn hydrate(&self, row: &BookRow) -> Result<Book, AppError> {
        let authors = row
            .author_ids
            .iter()
            .filter_map(|id| self.authors.get(id).cloned())
            .collect();

        Book::assemble(row.id, row.details.clone(), authors)
    }

    fn hydrate_all<'a>(
        &self,
        rows: impl Iterator<Item = &'a BookRow>,
    ) -> Result<Vec<Book>, AppError> {
        rows.map(|row| self.hydrate(row)).collect()
    }

    /// Registers `author` unless its id is already known; known authors win.
    fn register_author(&mut self, author: &Author) {
        self.authors
            .entry(author.id)
            .or_insert_with(|| author.clone());
    }

    fn next_book_id(&self) -> Result<i64, AppError> {
        next_id(self.books.keys().next_back().copied(), "books")
    }

    fn next_author_id(&self) -> Result<i64, AppError> {
        next_id(self.authors.keys().next_back().copied(), "authors")
    }
}

/// Id following `highest`, or a conflict once `i64::MAX` is taken.
fn next_id(highest: Option<i64>, table: &str) -> Result<i64, AppError> {
    match highest {
        None => Ok(1),
        Some(id) => id.checked_add(1).ok_or_else(|| {
            AppError::conflict(
                "No free id left, pass an explicit id",
                json!({ "table": table, "highest_id": id }),
            )
        }),
    }
}

/// Catalog store kept in process memory.
///
/// Implements both [`BookRepository`] and [`AuthorRepository`] over a single
/// lock so that book/author links stay consistent. Used when no database is
/// configured and by the integration tests.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    data: RwLock<CatalogData>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        debug!("Using in-memory catalog (no database configured)");
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryCatalog {
    async fn list(&self) -> Result<Vec<Book>, AppError> {
        let data = self.data.read().await;
        data.hydrate_all(data.books.values())
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Book>, AppError> {
        let needle = title.to_lowercase();
        let data = self.data.read().await;
        data.hydrate_all(
            data.books
                .values()
                .filter(|row| row.details.title.to_lowercase().contains(&needle)),
        )
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError> {
        let data = self.data.read().await;
        data.books.get(&id).map(|row| data.hydrate(row)).transpose()
    }

    async fn create(&self, new_book: NewBook) -> Result<Book, AppError> {
        let mut data = self.data.write().await;

        let id = match new_book.id {
            Some(id) if data.books.contains_key(&id) => {
                return Err(AppError::conflict(
                    "Book id already taken",
                    json!({ "id": id }),
                ));
            }
            Some(id) => id,
            None => data.next_book_id()?,
        };

        data.register_author(&new_book.author);
        let row = BookRow {
            id,
            details: new_book.details,
            author_ids: vec![new_book.author.id],
        };
        let book = data.hydrate(&row)?;
        data.books.insert(id, row);

        Ok(book)
    }

    async fn update(&self, book: Book) -> Result<Book, AppError> {
        let mut data = self.data.write().await;

        if !data.books.contains_key(&book.id) {
            return Err(AppError::not_found(
                "Book not found",
                json!({ "id": book.id }),
            ));
        }

        for author in book.authors() {
            data.register_author(author);
        }
        let row = BookRow {
            id: book.id,
            details: book.details(),
            author_ids: book.authors().iter().map(|a| a.id).collect(),
        };
        let stored = data.hydrate(&row)?;
        data.books.insert(book.id, row);

        Ok(stored)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut data = self.data.write().await;

        data.books
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Book not found", json!({ "id": id })))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let data = self.data.read().await;
        Ok(data.books.len() as i64)
    }
}

#[async_trait]
impl AuthorRepository for InMemoryCatalog {
    async fn create(&self, new_author: NewAuthor) -> Result<Author, AppError> {
        let mut data = self.data.write().await;

        let author = Author::new(data.next_author_id()?, new_author.full_name);
        data.authors.insert(author.id, author.clone());

        Ok(author)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, AppError> {
        let data = self.data.read().await;
        Ok(data.authors.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Author>, AppError> {
        let data = self.data.read().await;
        Ok(data.authors.values().cloned().collect())
    }
}
