//! Error types for Bookshelf server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Application error codes exposed in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 2,
    BadValue = 3,
    NoSuchBook = 4,
    BookAlreadyStocked = 5,
    BookAlreadyCheckedOut = 6,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Book with id {0} could not be found")]
    BookNotFound(Uuid),

    #[error("Book \"{0}\" is already in stock")]
    BookAlreadyStocked(String),

    #[error("Book \"{0}\" is already checked out")]
    BookAlreadyCheckedOut(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and error code for this error
    pub fn status(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::BookNotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchBook),
            AppError::BookAlreadyStocked(_) => (StatusCode::LOCKED, ErrorCode::BookAlreadyStocked),
            AppError::BookAlreadyCheckedOut(_) => {
                (StatusCode::LOCKED, ErrorCode::BookAlreadyCheckedOut)
            }
            AppError::Validation(_) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue)
            }
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DbFailure),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Validation(msg) | AppError::BadRequest(msg) => msg.clone(),
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_book_errors_map_to_distinct_statuses() {
        let (status, code) = AppError::BookNotFound(Uuid::nil()).status();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, ErrorCode::NoSuchBook);

        let (status, code) = AppError::BookAlreadyStocked("Dune".into()).status();
        assert_eq!(status, StatusCode::LOCKED);
        assert_eq!(code, ErrorCode::BookAlreadyStocked);
    }

    #[test]
    fn database_errors_hide_their_detail() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn messages_name_the_book() {
        let id = Uuid::new_v4();
        assert_eq!(
            AppError::BookNotFound(id).to_string(),
            format!("Book with id {} could not be found", id)
        );
        assert_eq!(
            AppError::BookAlreadyStocked("Dune".into()).to_string(),
            "Book \"Dune\" is already in stock"
        );
    }
}
