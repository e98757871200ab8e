//! Handlers for book endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Datelike, Local};
use serde_json::json;

use crate::api::dto::author::AuthorDto;
use crate::api::dto::book::{BookDto, BookListQuery};
use crate::api::extract::ApiJson;
use crate::api::messages::{AUTHOR_MISSING, BOOK_MISSING, BOOK_NOT_FOUND, ID_MISMATCH};
use crate::api::validation::{book_details, validate_new_book};
use crate::domain::entities::{Book, NewBook};
use crate::error::AppError;
use crate::state::AppState;


/// Lists books, optionally filtered by title.
///
/// # Endpoint
///
/// `GET /api/v1/books?q=`
///
/// Without `q` every book is returned. With `q`, only books whose title
/// contains it (ignoring case).
pub async fn list_books_handler(
    State(state): State<AppState>,
    Query(query): Query<BookListQuery>,
) -> Result<Json<Vec<BookDto>>, AppError> {
    let books = match query.q.as_deref() {
        Some(q) => state.book_service.find_by_title(q).await?,
        None => state.book_service.list().await?,
    };

    Ok(Json(books.into_iter().map(BookDto::from).collect()))
}

/// Returns a single book.
///
/// # Endpoint
///
/// `GET /api/v1/books/{id}`
///
/// # Errors
///
/// Returns 404 if the book does not exist.
pub async fn get_book_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<BookDto>, AppError> {
    let book = state
        .book_service
        .get(id)
        .await
        .map_err(|e| e.relabel_not_found(BOOK_NOT_FOUND))?;

    Ok(Json(BookDto::from(book)))
}

/// Catalogues a new book under an existing author.
///
/// # Endpoint
///
/// `POST /api/v1/authors/{author_id}/books`
///
/// The author becomes the book's only author. Any `authors` in the body are
/// ignored. The book id is taken from the body when given.
///
/// # Errors
///
/// Returns 404 if the author does not exist.
/// Returns 400 if the title, isbn, language or year is invalid.
/// Returns 409 if the requested book id is already taken.
pub async fn create_book_handler(
    Path(author_id): Path<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BookDto>,
) -> Result<(StatusCode, Json<BookDto>), AppError> {
    let author = state
        .author_service
        .get(author_id)
        .await
        .map_err(|e| e.relabel_not_found(AUTHOR_MISSING))?;

    let details = validate_new_book(&payload, Local::now().year()).inspect_err(|e| {
        tracing::warn!(author_id, error = %e, "Book rejected");
    })?;

    let book = state
        .book_service
        .save(NewBook {
            id: payload.id,
            details,
            author,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(BookDto::from(book))))
}

/// Replaces a book's fields, keeping its authors.
///
/// # Endpoint
///
/// `PUT /api/v1/books/{book_id}`
///
/// The body `id` must match the path. Authors in the body are ignored: the
/// stored author set is carried over unchanged.
///
/// # Errors
///
/// Returns 404 if the book does not exist.
/// Returns 400 if the body id differs from the path id, or the language is unknown.
pub async fn update_book_handler(
    Path(book_id): Path<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BookDto>,
) -> Result<Json<BookDto>, AppError> {
    let original = state
        .book_service
        .get(book_id)
        .await
        .map_err(|e| e.relabel_not_found(BOOK_MISSING))?;

    if payload.id != Some(book_id) {
        tracing::warn!(book_id, body_id = ?payload.id, "Book update id mismatch");
        return Err(AppError::bad_request(
            ID_MISMATCH,
            json!({ "path_id": book_id, "body_id": payload.id }),
        ));
    }

    let book = Book::assemble(
        book_id,
        book_details(&payload)?,
        original.authors().to_vec(),
    )?;

    let updated = state
        .book_service
        .update(book)
        .await
        .map_err(|e| e.relabel_not_found(BOOK_MISSING))?;

    Ok(Json(BookDto::from(updated)))
}

/// Deletes a book.
///
/// # Endpoint
///
/// `DELETE /api/v1/books/{id}`
///
/// # Errors
///
/// Returns 404 if the book does not exist.
pub async fn delete_book_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state
        .book_service
        .get(id)
        .await
        .map_err(|e| e.relabel_not_found(BOOK_MISSING))?;

    state
        .book_service
        .delete(id)
        .await
        .map_err(|e| e.relabel_not_found(BOOK_MISSING))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Adds a co-author to a book.
///
/// # Endpoint
///
/// `PUT /api/v1/books/{book_id}/authors`
///
/// Adding an author the book already has is a no-op. Authors the catalog
/// does not know yet are registered from the body.
///
/// # Errors
///
/// Returns 404 if the book does not exist.
pub async fn add_author_handler(
    Path(book_id): Path<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AuthorDto>,
) -> Result<StatusCode, AppError> {
    let mut book = state
        .book_service
        .get(book_id)
        .await
        .map_err(|e| e.relabel_not_found(BOOK_MISSING))?;

    let author_id = payload.id;
    if !book.add_author(payload.into()) {
        tracing::debug!(book_id, author_id, "Author already attached");
    }

    state
        .book_service
        .update(book)
        .await
        .map_err(|e| e.relabel_not_found(BOOK_MISSING))?;

    Ok(StatusCode::OK)
}
