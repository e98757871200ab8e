//! Book entity and its author set.

use serde_json::json;

use crate::domain::entities::{Author, Language};
use crate::error::AppError;

/// Scalar fields of a book, as supplied by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    pub title: String,
    pub isbn: i64,
    /// Publication year. Negative values are years BCE.
    pub year: i32,
    pub language: Option<Language>,
}

/// A catalogued book.
///
/// A book always references at least one author. The author set is unique by
/// author id and can only be changed through [`Book::add_author`] and
/// [`Book::replace_authors`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub isbn: i64,
    pub year: i32,
    pub language: Option<Language>,
    authors: Vec<Author>,
}

impl Book {
    /// Assembles a book from its details and a non-empty author list.
    ///
    /// Duplicate authors (same id) are collapsed, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if `authors` is empty.
    pub fn assemble(id: i64, details: BookDetails, authors: Vec<Author>) -> Result<Self, AppError> {
        if authors.is_empty() {
            return Err(AppError::internal(
                "Book has no authors",
                json!({ "book_id": id }),
            ));
        }

        let mut book = Self {
            id,
            title: details.title,
            isbn: details.isbn,
            year: details.year,
            language: details.language,
            authors: Vec::with_capacity(authors.len()),
        };
        for author in authors {
            book.add_author(author);
        }

        Ok(book)
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Adds an author to the set.
    ///
    /// Returns `false` and leaves the set untouched when an author with the
    /// same id is already present.
    pub fn add_author(&mut self, author: Author) -> bool {
        if self.authors.iter().any(|a| a.id == author.id) {
            return false;
        }
        self.authors.push(author);
        true
    }

    /// Replaces the whole author set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if `authors` is empty; the book keeps
    /// its previous authors in that case.
    pub fn replace_authors(&mut self, authors: Vec<Author>) -> Result<(), AppError> {
        if authors.is_empty() {
            return Err(AppError::internal(
                "Book has no authors",
                json!({ "book_id": self.id }),
            ));
        }

        self.authors.clear();
        for author in authors {
            self.add_author(author);
        }
        Ok(())
    }

    pub fn details(&self) -> BookDetails {
        BookDetails {
            title: self.title.clone(),
            isbn: self.isbn,
            year: self.year,
            language: self.language,
        }
    }
}

/// Input data for cataloguing a new book.
///
/// Carries exactly one author: the one the book is created under.
#[derive(Debug, Clone)]
pub struct NewBook {
    /// Requested id. `None` lets the store pick the next free one.
    pub id: Option<i64>,
    pub details: BookDetails,
    pub author: Author,
}
