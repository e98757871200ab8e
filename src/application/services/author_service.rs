//! Author lookup and registration service.

use std::sync::Arc;

use crate::domain::entities::{Author, NewAuthor};
use crate::domain::repositories::AuthorRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for looking up and registering authors.
pub struct AuthorService<R: AuthorRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: AuthorRepository + ?Sized> AuthorService<R> {
    /// Creates a new author service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Retrieves an author by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get(&self, id: i64) -> Result<Author, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Author not found", json!({ "id": id })))
    }

    /// Lists every author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list(&self) -> Result<Vec<Author>, AppError> {
        self.repository.list().await
    }

    /// Registers a new author. The name is trimmed before storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the trimmed name is empty.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create(&self, full_name: &str) -> Result<Author, AppError> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(AppError::bad_request(
                "Author name must not be blank",
                json!({ "field": "full_name" }),
            ));
        }

        let author = self
            .repository
            .create(NewAuthor {
                full_name: full_name.to_string(),
            })
            .await?;

        tracing::info!(author_id = author.id, "Author created");

        Ok(author)
    }
}
