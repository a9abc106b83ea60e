//! Application error type.
//!
//! Every failure a handler can produce maps onto one HTTP status and a
//! `{"message": ...}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::response::ErrorResponse;

/// Result alias used across the workspace.
pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed id or filter value.
    #[error("{0}")]
    Validation(String),

    /// A listing query returned no rows.
    #[error("{0}")]
    NotFound(String),

    /// The driver rejected or failed a statement.
    #[error("{0}")]
    DatabaseQuery(String),

    /// The database could not be opened or a connection acquired.
    #[error("{0}")]
    DatabaseConnection(String),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseQuery(_) | AppError::DatabaseConnection(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::DatabaseConnection(err.to_string())
            }
            other => AppError::DatabaseQuery(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_is_bad_request() {
        let (status, body) = render(AppError::Validation("Invalid Dish ID".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "message": "Invalid Dish ID" }));
    }

    #[tokio::test]
    async fn test_not_found_keeps_message_verbatim() {
        let (status, body) = render(AppError::NotFound("No resutarant found!".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No resutarant found!");
    }

    #[tokio::test]
    async fn test_driver_error_is_internal() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        let expected = sqlx::Error::RowNotFound.to_string();
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], expected);
    }
}
