//! PostgreSQL repository tests. Run against a database with:
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test -- --ignored
//! ```

mod common;

use library_catalog::domain::entities::{Author, BookDetails, Language, NewAuthor, NewBook};
use library_catalog::domain::repositories::{AuthorRepository, BookRepository};
use library_catalog::error::AppError;
use library_catalog::infrastructure::persistence::{PgAuthorRepository, PgBookRepository};
use sqlx::PgPool;
use std::sync::Arc;

fn details(title: &str) -> BookDetails {
    BookDetails {
        title: title.to_string(),
        isbn: 207_040_850,
        year: 1862,
        language: Some(Language::French),
    }
}

async fn seed_author(pool: &PgPool, full_name: &str) -> Author {
    let id = common::create_test_author(pool, full_name).await;
    Author::new(id, full_name.to_string())
}

async fn seed_book(repo: &PgBookRepository, id: Option<i64>, title: &str, author: &Author) -> i64 {
    repo.create(NewBook {
        id,
        details: details(title),
        author: author.clone(),
    })
    .await
    .unwrap()
    .id
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_find_book(pool: PgPool) {
    let author = seed_author(&pool, "Victor Hugo").await;
    let repo = PgBookRepository::new(Arc::new(pool));

    let book = repo
        .create(NewBook {
            id: None,
            details: details("Les Misérables"),
            author: author.clone(),
        })
        .await
        .unwrap();

    assert_eq!(book.title, "Les Misérables");
    assert_eq!(book.language, Some(Language::French));
    assert_eq!(book.authors(), std::slice::from_ref(&author));

    let found = repo.find_by_id(book.id).await.unwrap().unwrap();
    assert_eq!(found, book);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_id_not_found(pool: PgPool) {
    let repo = PgBookRepository::new(Arc::new(pool));

    assert!(repo.find_by_id(999).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_explicit_id_then_generated(pool: PgPool) {
    let author = seed_author(&pool, "Victor Hugo").await;
    let repo = PgBookRepository::new(Arc::new(pool));

    let explicit = seed_book(&repo, Some(40), "Explicit", &author).await;
    let generated = seed_book(&repo, None, "Generated", &author).await;

    assert_eq!(explicit, 40);
    assert!(generated > 40);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_duplicate_id_conflicts(pool: PgPool) {
    let author = seed_author(&pool, "Victor Hugo").await;
    let repo = PgBookRepository::new(Arc::new(pool));
    seed_book(&repo, Some(7), "First", &author).await;

    let result = repo
        .create(NewBook {
            id: Some(7),
            details: details("Second"),
            author,
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_title_is_case_insensitive_substring(pool: PgPool) {
    let author = seed_author(&pool, "Victor Hugo").await;
    let repo = PgBookRepository::new(Arc::new(pool));
    seed_book(&repo, None, "Les Misérables", &author).await;
    seed_book(&repo, None, "Notre-Dame de Paris", &author).await;
    seed_book(&repo, None, "100% Hugo", &author).await;

    let found = repo.find_by_title("DAME").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Notre-Dame de Paris");

    // Wildcards in the query match literally.
    let found = repo.find_by_title("%").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "100% Hugo");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_registers_co_author(pool: PgPool) {
    let author = seed_author(&pool, "Victor Hugo").await;
    let pool = Arc::new(pool);
    let repo = PgBookRepository::new(pool.clone());
    let authors = PgAuthorRepository::new(pool);
    let id = seed_book(&repo, None, "Les Misérables", &author).await;

    let mut book = repo.find_by_id(id).await.unwrap().unwrap();
    assert!(book.add_author(Author::new(500, "Paul Meurice".to_string())));
    let updated = repo.update(book).await.unwrap();

    assert_eq!(updated.authors().len(), 2);
    assert_eq!(updated.authors()[0], author);
    assert_eq!(
        authors.find_by_id(500).await.unwrap().map(|a| a.full_name),
        Some("Paul Meurice".to_string())
    );

    // Generated author ids skip past the explicitly inserted one.
    let next = authors
        .create(NewAuthor {
            full_name: "Alexandre Dumas".to_string(),
        })
        .await
        .unwrap();
    assert!(next.id > 500);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_missing_book(pool: PgPool) {
    let author = seed_author(&pool, "Victor Hugo").await;
    let repo = PgBookRepository::new(Arc::new(pool));
    let id = seed_book(&repo, None, "Les Misérables", &author).await;
    let mut book = repo.find_by_id(id).await.unwrap().unwrap();
    repo.delete(id).await.unwrap();

    book.title = "Gone".to_string();
    let result = repo.update(book).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_keeps_authors(pool: PgPool) {
    let author = seed_author(&pool, "Victor Hugo").await;
    let pool = Arc::new(pool);
    let repo = PgBookRepository::new(pool.clone());
    let authors = PgAuthorRepository::new(pool);
    let id = seed_book(&repo, None, "Les Misérables", &author).await;

    repo.delete(id).await.unwrap();

    assert!(repo.find_by_id(id).await.unwrap().is_none());
    assert!(authors.find_by_id(author.id).await.unwrap().is_some());
    assert!(matches!(
        repo.delete(id).await,
        Err(AppError::NotFound { .. })
    ));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_sequences_never_move_backwards(pool: PgPool) {
    let author = seed_author(&pool, "Victor Hugo").await;

    // Ids handed out to inserts that have not committed yet.
    let reserved_author: i64 = sqlx::query_scalar("SELECT nextval('authors_id_seq')")
        .fetch_one(&pool)
        .await
        .unwrap();
    let reserved_book: i64 = sqlx::query_scalar("SELECT nextval('books_id_seq')")
        .fetch_one(&pool)
        .await
        .unwrap();

    let pool = Arc::new(pool);
    let repo = PgBookRepository::new(pool.clone());
    let authors = PgAuthorRepository::new(pool);

    // Known author and an explicit id below the reserved one.
    seed_book(&repo, Some(reserved_book - 1), "Explicit", &author).await;
    let id = seed_book(&repo, None, "Les Misérables", &author).await;
    let mut book = repo.find_by_id(id).await.unwrap().unwrap();
    book.title = "Les Misérables (édition intégrale)".to_string();
    repo.update(book).await.unwrap();

    assert!(id > reserved_book);

    let next = authors
        .create(NewAuthor {
            full_name: "Alexandre Dumas".to_string(),
        })
        .await
        .unwrap();
    assert!(next.id > reserved_author);
}
