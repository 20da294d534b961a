//! REST API endpoint handlers for the book service.
//!
//! Each handler borrows a [`BookStore`](bookshelf_db::BookStore) from the
//! shared [`AppState`] and runs at most one statement against it.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Welcome text |
//! | `GET` | `/books` | List books (`page`, `limit`, `genre`, `rating`) |
//! | `POST` | `/books` | Create a book |
//! | `GET` | `/books/{id}` | Get a single book |
//! | `DELETE` | `/books/{id}` | Delete a book |

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use bookshelf_types::{Book, BookId, ListBooksParams, NewBookRequest};

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `GET /`.
pub const WELCOME_TEXT: &str = "Welcome to the Book Library API! <br>
             Explore, add, and manage your literary collection. ";

// ---------------------------------------------------------------------------
// GET / -- welcome text
// ---------------------------------------------------------------------------

/// Serve the welcome text.
pub async fn index() -> Html<&'static str> {
    Html(WELCOME_TEXT)
}

// ---------------------------------------------------------------------------
// GET /books -- list books
// ---------------------------------------------------------------------------

/// List one page of books, optionally filtered.
///
/// # Query Parameters
///
/// - `page`: one-based page number (default 1)
/// - `limit`: page size (default 10)
/// - `genre`: exact, case-sensitive genre
/// - `rating`: inclusive minimum rating
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListBooksParams>, QueryRejection>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let query = params
        .parse()
        .map_err(|e| ApiError::InvalidQuery(e.to_string()))?;

    let books = state.books().list(&query.filter, query.page).await?;
    Ok(Json(books))
}

// ---------------------------------------------------------------------------
// POST /books -- create a book
// ---------------------------------------------------------------------------

/// Create a book from a JSON body and return it with status 201.
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewBookRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let new_book = request.validate()?;

    let book = state.books().insert(&new_book).await?;
    tracing::info!(book_id = %book.id, title = %book.title, "Book created");

    Ok((StatusCode::CREATED, Json(book)))
}

// ---------------------------------------------------------------------------
// GET /books/{id} -- single book
// ---------------------------------------------------------------------------

/// Return a single book.
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_book_id(&id_str)?;

    state
        .books()
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::BookNotFound(id))
}

// ---------------------------------------------------------------------------
// DELETE /books/{id} -- delete a book
// ---------------------------------------------------------------------------

/// Delete a book and confirm with status 200 and a message body.
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_book_id(&id_str)?;

    if !state.books().delete(id).await? {
        return Err(ApiError::BookNotFound(id));
    }
    tracing::info!(book_id = %id, "Book deleted");

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": format!("Book {id} deleted successfully"),
        })),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a book id from a path segment, returning an [`ApiError`] on failure.
fn parse_book_id(s: &str) -> Result<BookId, ApiError> {
    s.parse::<BookId>()
        .map_err(|e| ApiError::InvalidId(format!("{s}: {e}")))
}
