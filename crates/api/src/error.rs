//! Unified error handling for the HTTP boundary.
//!
//! Every failure is converted to the structured envelope wire format here:
//! `{"error": {<kind>: <message>}}` with an HTTP status per kind. All route
//! handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;

/// Message returned with every `Forbidden` rejection.
pub const FORBIDDEN_MESSAGE: &str =
    "Sorry, that's not allowed. Make sure you have the correct api_key.";

/// Message returned when a listing ID does not exist.
pub const UNKNOWN_ID_MESSAGE: &str = "Sorry, a cafe with that id was not found in the database.";

/// Message returned when random selection finds nothing to sample.
pub const EMPTY_COLLECTION_MESSAGE: &str = "Sorry, there are no cafes in the database yet.";

/// Application-level error type for the listing service.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request did not present the configured shared secret.
    #[error("forbidden")]
    Forbidden,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// There are no records to sample from.
    #[error("empty collection")]
    EmptyCollection,

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "Forbidden",
                FORBIDDEN_MESSAGE.to_owned(),
            ),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, "Not Found", message),
            Self::EmptyCollection => (
                StatusCode::NOT_FOUND,
                "Empty Collection",
                EMPTY_COLLECTION_MESSAGE.to_owned(),
            ),
            // A repository miss carries the same wire contract as any
            // other unknown-id lookup.
            Self::Repository(RepositoryError::NotFound) => (
                StatusCode::NOT_FOUND,
                "Not Found",
                UNKNOWN_ID_MESSAGE.to_owned(),
            ),
            Self::Repository(err) => {
                // Don't expose internal error details to clients
                tracing::error!(error = %err, "request failed on the store");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal",
                    "internal server error".to_owned(),
                )
            }
        };

        (status, error_body(kind, &message)).into_response()
    }
}

/// Build the `{"error": {<kind>: <message>}}` envelope.
fn error_body(kind: &str, message: &str) -> Json<serde_json::Value> {
    let mut inner = serde_json::Map::new();
    inner.insert(
        kind.to_owned(),
        serde_json::Value::String(message.to_owned()),
    );

    let mut body = serde_json::Map::new();
    body.insert("error".to_owned(), serde_json::Value::Object(inner));

    Json(serde_json::Value::Object(body))
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    async fn get_body(err: AppError) -> serde_json::Value {
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(get_status(AppError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(get_status(AppError::EmptyCollection), StatusCode::NOT_FOUND);
        assert_eq!(
            get_status(AppError::Repository(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Repository(RepositoryError::Database(
                sqlx::Error::PoolClosed
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_forbidden_envelope_shape() {
        let body = get_body(AppError::Forbidden).await;
        assert_eq!(body["error"]["Forbidden"], FORBIDDEN_MESSAGE);
    }

    #[tokio::test]
    async fn test_not_found_envelope_carries_the_message() {
        let body = get_body(AppError::NotFound("no such cafe".to_string())).await;
        assert_eq!(body["error"]["Not Found"], "no such cafe");
    }

    #[tokio::test]
    async fn test_repository_miss_uses_the_unknown_id_message() {
        let body = get_body(AppError::Repository(RepositoryError::NotFound)).await;
        assert_eq!(body["error"]["Not Found"], UNKNOWN_ID_MESSAGE);
    }

    #[tokio::test]
    async fn test_internal_errors_are_not_leaked() {
        let body = get_body(AppError::Repository(RepositoryError::DataCorruption(
            "secret detail".to_string(),
        )))
        .await;
        assert_eq!(body["error"]["Internal"], "internal server error");
    }
}
