//! Handlers for author endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::author::{AuthorDto, CreateAuthorRequest};
use crate::api::extract::ApiJson;
use crate::api::messages::AUTHOR_MISSING;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every author.
///
/// # Endpoint
///
/// `GET /api/v1/authors`
pub async fn list_authors_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<AuthorDto>>, AppError> {
    let authors = state.author_service.list().await?;

    Ok(Json(authors.into_iter().map(AuthorDto::from).collect()))
}

/// Returns a single author.
///
/// # Endpoint
///
/// `GET /api/v1/authors/{id}`
///
/// # Errors
///
/// Returns 404 if the author does not exist.
pub async fn get_author_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<AuthorDto>, AppError> {
    let author = state
        .author_service
        .get(id)
        .await
        .map_err(|e| e.relabel_not_found(AUTHOR_MISSING))?;

    Ok(Json(AuthorDto::from(author)))
}

/// Registers a new author.
///
/// # Endpoint
///
/// `POST /api/v1/authors`
///
/// # Errors
///
/// Returns 400 if the name is empty, blank or longer than 255 characters.
pub async fn create_author_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateAuthorRequest>,
) -> Result<(StatusCode, Json<AuthorDto>), AppError> {
    payload.validate()?;

    let author = state.author_service.create(&payload.full_name).await?;

    Ok((StatusCode::CREATED, Json(AuthorDto::from(author))))
}
