//! Server-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use marcbench_common::BenchError;
use serde_json::json;
use thiserror::Error;

use crate::db::DbError;

/// Result type alias for handlers
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A local dataset file could not be parsed
    #[error("{0}")]
    Unprocessable(String),

    /// The dataset hub failed or does not know the dataset
    #[error("{0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BenchError> for AppError {
    fn from(err: BenchError) -> Self {
        match err {
            BenchError::Validation(message) => AppError::Validation(message),
            BenchError::NotFound(message) => AppError::NotFound(message),
            e @ BenchError::MalformedDataset { .. } => AppError::Unprocessable(e.to_string()),
            e @ BenchError::SourceFetch { .. } => AppError::Upstream(e.to_string()),
            BenchError::Io(e) => AppError::Io(e),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(e) => AppError::Database(e),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "A database error occurred".to_string())
            },
            AppError::NotFound(ref message) => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Validation(ref message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Unprocessable(ref message) => {
                (StatusCode::UNPROCESSABLE_ENTITY, message.clone())
            },
            AppError::Upstream(ref message) => {
                tracing::warn!("Dataset hub error: {}", message);
                (StatusCode::BAD_GATEWAY, message.clone())
            },
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            },
            AppError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An IO error occurred".to_string())
            },
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: BenchError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn test_bench_error_status_mapping() {
        assert_eq!(status_of(BenchError::validation("bad")), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(BenchError::not_found("missing")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(BenchError::malformed("doc_001/page_texts.json", "eof")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(BenchError::source_fetch("acme/scans", "404")),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(BenchError::Config("broken".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
