//! PostgreSQL implementation of book repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::domain::entities::{Author, Book, BookDetails, Language, NewBook};
use crate::domain::repositories::BookRepository;
use crate::error::{AppError, map_sqlx_error};

#[derive(Debug, FromRow)]
struct BookRecord {
    id: i64,
    title: String,
    isbn: i64,
    year: i32,
    language: Option<String>,
}

#[derive(Debug, FromRow)]
struct BookAuthorRecord {
    book_id: i64,
    author_id: i64,
    full_name: String,
}

impl BookRecord {
    fn details(self) -> Result<(i64, BookDetails), AppError> {
        let language = self
            .language
            .map(|code| code.parse::<Language>())
            .transpose()
            .map_err(|e| {
                AppError::internal(
                    "Stored book has an unknown language",
                    json!({ "book_id": self.id, "reason": e.to_string() }),
                )
            })?;

        Ok((
            self.id,
            BookDetails {
                title: self.title,
                isbn: self.isbn,
                year: self.year,
                language,
            },
        ))
    }
}

/// Builds an `ILIKE` pattern matching titles that contain `query`.
fn contains_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// PostgreSQL repository for books.
///
/// Authors are linked through the `book_authors` join table; `position`
/// keeps the order in which they were attached.
pub struct PgBookRepository {
    pool: Arc<PgPool>,
}

impl PgBookRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Loads authors for the given books, grouped by book id.
    async fn load_authors(&self, book_ids: &[i64]) -> Result<HashMap<i64, Vec<Author>>, AppError> {
        let rows = sqlx::query_as::<_, BookAuthorRecord>(
            r#"
            SELECT ba.book_id, a.id AS author_id, a.full_name
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = ANY($1)
            ORDER BY ba.book_id, ba.position
            "#,
        )
        .bind(book_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut authors: HashMap<i64, Vec<Author>> = HashMap::new();
        for row in rows {
            authors
                .entry(row.book_id)
                .or_default()
                .push(Author::new(row.author_id, row.full_name));
        }

        Ok(authors)
    }

    async fn hydrate(&self, records: Vec<BookRecord>) -> Result<Vec<Book>, AppError> {
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        let mut authors = self.load_authors(&ids).await?;

        records
            .into_iter()
            .map(|record| {
                let (id, details) = record.details()?;
                Book::assemble(id, details, authors.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    async fn fetch(&self, id: i64) -> Result<Option<Book>, AppError> {
        let record = sqlx::query_as::<_, BookRecord>(
            "SELECT id, title, isbn, year, language FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match record {
            Some(record) => Ok(self.hydrate(vec![record]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn fetch_stored(&self, id: i64) -> Result<Book, AppError> {
        self.fetch(id).await?.ok_or_else(|| {
            AppError::internal("Stored book vanished", json!({ "book_id": id }))
        })
    }
}

/// Inserts `author` unless its id is already known; known authors win.
///
/// Returns whether a row was inserted.
async fn register_author(
    tx: &mut Transaction<'_, Postgres>,
    author: &Author,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        "INSERT INTO authors (id, full_name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING",
    )
    .bind(author.id)
    .bind(&author.full_name)
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Moves a serial sequence past explicitly inserted ids.
///
/// `setval` is not transactional, so the sequence only ever moves forward:
/// ids handed out to concurrent, uncommitted inserts are never reissued.
async fn sync_sequence(
    tx: &mut Transaction<'_, Postgres>,
    table: &'static str,
) -> Result<(), AppError> {
    let sql = format!(
        "SELECT setval('{table}_id_seq', GREATEST((SELECT MAX(id) FROM {table}), (SELECT last_value FROM {table}_id_seq)))"
    );
    sqlx::query(&sql).execute(&mut **tx).await?;
    Ok(())
}

async fn link_authors(
    tx: &mut Transaction<'_, Postgres>,
    book_id: i64,
    authors: &[Author],
) -> Result<(), AppError> {
    for (position, author) in authors.iter().enumerate() {
        sqlx::query("INSERT INTO book_authors (book_id, author_id, position) VALUES ($1, $2, $3)")
            .bind(book_id)
            .bind(author.id)
            .bind(position as i32)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn list(&self) -> Result<Vec<Book>, AppError> {
        let records = sqlx::query_as::<_, BookRecord>(
            "SELECT id, title, isbn, year, language FROM books ORDER BY id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        self.hydrate(records).await
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Book>, AppError> {
        let records = sqlx::query_as::<_, BookRecord>(
            r#"
            SELECT id, title, isbn, year, language
            FROM books
            WHERE title ILIKE $1 ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(contains_pattern(title))
        .fetch_all(self.pool.as_ref())
        .await?;

        self.hydrate(records).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError> {
        self.fetch(id).await
    }

    async fn create(&self, new_book: NewBook) -> Result<Book, AppError> {
        let NewBook {
            id,
            details,
            author,
        } = new_book;
        let mut tx = self.pool.begin().await?;

        if register_author(&mut tx, &author).await? {
            sync_sequence(&mut tx, "authors").await?;
        }

        let language = details.language.map(Language::code);
        let book_id: i64 = match id {
            Some(id) => {
                let inserted: i64 = sqlx::query_scalar(
                    r#"
                    INSERT INTO books (id, title, isbn, year, language)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id
                    "#,
                )
                .bind(id)
                .bind(&details.title)
                .bind(details.isbn)
                .bind(details.year)
                .bind(language)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| match map_sqlx_error(e) {
                    AppError::Conflict { .. } => {
                        AppError::conflict("Book id already taken", json!({ "id": id }))
                    }
                    other => other,
                })?;
                sync_sequence(&mut tx, "books").await?;
                inserted
            }
            None => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO books (title, isbn, year, language)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    "#,
                )
                .bind(&details.title)
                .bind(details.isbn)
                .bind(details.year)
                .bind(language)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        link_authors(&mut tx, book_id, std::slice::from_ref(&author)).await?;
        tx.commit().await?;

        self.fetch_stored(book_id).await
    }

    async fn update(&self, book: Book) -> Result<Book, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, isbn = $3, year = $4, language = $5
            WHERE id = $1
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(book.isbn)
        .bind(book.year)
        .bind(book.language.map(Language::code))
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Book not found",
                json!({ "id": book.id }),
            ));
        }

        let mut registered = false;
        for author in book.authors() {
            registered |= register_author(&mut tx, author).await?;
        }
        if registered {
            sync_sequence(&mut tx, "authors").await?;
        }

        sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
            .bind(book.id)
            .execute(&mut *tx)
            .await?;
        link_authors(&mut tx, book.id, book.authors()).await?;

        tx.commit().await?;

        self.fetch_stored(book.id).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Book not found", json!({ "id": id })));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(count)
    }
}
