//! Error types for the book API.
//!
//! [`ApiError`] unifies all request failure modes into a single enum that
//! converts into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error body has the shape `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookshelf_db::DbError;
use bookshelf_types::{BookId, ValidationError};

/// Body sent for store failures. Details stay in the log.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors that can occur while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A create request failed presence or rating checks.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body was not a usable JSON object.
    #[error("{0}")]
    InvalidBody(String),

    /// A query parameter could not be parsed.
    #[error("{0}")]
    InvalidQuery(String),

    /// A book id in the path was not an integer.
    #[error("invalid book id: {0}")]
    InvalidId(String),

    /// No book has the requested id.
    #[error("Book not found")]
    BookNotFound(BookId),

    /// The store failed.
    #[error("store error: {0}")]
    Store(#[from] DbError),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::InvalidBody(_)
            | Self::InvalidQuery(_)
            | Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::BookNotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Store(e) => {
                tracing::error!(error = %e, "Store operation failed");
                String::from(INTERNAL_ERROR_MESSAGE)
            }
            Self::BookNotFound(id) => {
                tracing::debug!(book_id = %id, "Book not found");
                self.to_string()
            }
            _ => self.to_string(),
        };

        let body = serde_json::json!({ "error": message });

        (status, axum::Json(body)).into_response()
    }
}
