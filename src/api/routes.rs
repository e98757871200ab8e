//! API route configuration.
//!
//! Routes are mounted under `/api/v1` by [`crate::routes::app_router`].

use crate::api::handlers::{
    add_author_handler, create_author_handler, create_book_handler, delete_book_handler,
    get_author_handler, get_book_handler, list_authors_handler, list_books_handler,
    update_book_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Catalog API routes.
///
/// # Endpoints
///
/// - `GET    /books?q=`                  - List books, optionally by title
/// - `GET    /books/{id}`                - Get a book
/// - `PUT    /books/{id}`                - Update a book (authors are kept)
/// - `DELETE /books/{id}`                - Delete a book
/// - `PUT    /books/{id}/authors`        - Add a co-author to a book
/// - `POST   /authors/{author_id}/books` - Create a book under an author
/// - `GET    /authors`                   - List authors
/// - `POST   /authors`                   - Register an author
/// - `GET    /authors/{id}`              - Get an author
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books_handler))
        .route(
            "/books/{id}",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
        .route("/books/{id}/authors", put(add_author_handler))
        .route(
            "/authors",
            get(list_authors_handler).post(create_author_handler),
        )
        .route("/authors/{id}", get(get_author_handler))
        .route("/authors/{id}/books", post(create_book_handler))
}
