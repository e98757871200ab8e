//! DTOs for books.

use serde::{Deserialize, Serialize};

use crate::api::dto::author::AuthorDto;
use crate::domain::entities::Book;

/// Wire representation of a book.
///
/// Missing numeric fields read as `0`, which the creation gates reject.
/// `authors` is filled on responses and ignored on every write path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub isbn: i64,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub authors: Vec<AuthorDto>,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        let authors = book
            .authors()
            .iter()
            .cloned()
            .map(AuthorDto::from)
            .collect();

        Self {
            id: Some(book.id),
            title: Some(book.title),
            isbn: book.isbn,
            year: book.year,
            language: book.language.map(|l| l.code().to_string()),
            authors,
        }
    }
}

/// Query parameters for `GET /api/v1/books`.
#[derive(Debug, Default, Deserialize)]
pub struct BookListQuery {
    /// Title filter. Absent means every book.
    pub q: Option<String>,
}
