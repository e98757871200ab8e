//! Request extractors reporting failures through [`AppError`].

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use serde_json::json;

use crate::api::messages::BODY_UNREADABLE;
use crate::error::AppError;

/// JSON body extractor.
///
/// Behaves like [`axum::Json`], but malformed, mistyped or out-of-range
/// bodies are rejected with a 400 in the API error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        AppError::bad_request(
            BODY_UNREADABLE,
            json!({ "reason": rejection.body_text() }),
        )
    }
}
