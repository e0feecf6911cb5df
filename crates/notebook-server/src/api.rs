//! Shared plumbing for the API handlers: the error type and blocking
//! database access.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use notebook_db::DbPool;
use notebook_pages::PageError;
use notebook_sentiment::SentimentError;
use rusqlite::Connection;
use thiserror::Error;

/// Message returned whenever a page ID does not exist.
pub const PAGE_NOT_FOUND: &str = "Page not found";

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl ApiError {
    pub fn page_not_found() -> Self {
        ApiError::NotFound(PAGE_NOT_FOUND.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<PageError> for ApiError {
    fn from(e: PageError) -> Self {
        match e {
            PageError::Invalid(msg) => ApiError::BadRequest(msg),
            PageError::Database(err) => {
                tracing::error!(error = %err, "page storage operation failed");
                ApiError::InternalServerError("database error".to_string())
            }
        }
    }
}

impl From<SentimentError> for ApiError {
    fn from(e: SentimentError) -> Self {
        tracing::error!(error = %e, "sentiment analysis failed");
        ApiError::InternalServerError("sentiment analysis failed".to_string())
    }
}

/// Runs a storage operation on a pooled connection off the async runtime.
///
/// The connection goes back to the pool as soon as `f` returns. `op` names
/// the operation in log output.
pub(crate) async fn with_conn<T, F>(pool: &DbPool, op: &'static str, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T, PageError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let conn = pool.get().map_err(|e| {
            tracing::error!(error = %e, op, "failed to get db connection");
            ApiError::InternalServerError("database unavailable".to_string())
        })?;
        f(&*conn).map_err(ApiError::from)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, op, "database task join error");
        ApiError::InternalServerError("internal error".to_string())
    })?
}
