#![allow(dead_code)]

use axum_test::TestServer;
use library_catalog::routes::api_router;
use library_catalog::state::AppState;
use serde_json::{Value, json};
use sqlx::PgPool;

/// Name of the author seeded by [`create_test_server`].
pub const SEEDED_AUTHOR: &str = "Victor Hugo";

/// Builds a server over a fresh in-memory catalog holding one author.
///
/// Returns the server and the seeded author's id.
pub async fn create_test_server() -> (TestServer, i64) {
    let state = AppState::in_memory();
    let author = state.author_service.create(SEEDED_AUTHOR).await.unwrap();

    let server = TestServer::new(api_router(state)).unwrap();

    (server, author.id)
}

pub fn book_payload(title: &str, isbn: i64, year: i32, language: &str) -> Value {
    json!({
        "title": title,
        "isbn": isbn,
        "year": year,
        "language": language,
    })
}

/// Creates a book through the API and returns its id.
pub async fn create_test_book(server: &TestServer, author_id: i64, payload: Value) -> i64 {
    let response = server
        .post(&format!("/api/v1/authors/{author_id}/books"))
        .json(&payload)
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

pub async fn create_test_author(pool: &PgPool, full_name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO authors (full_name) VALUES ($1) RETURNING id")
        .bind(full_name)
        .fetch_one(pool)
        .await
        .unwrap()
}
