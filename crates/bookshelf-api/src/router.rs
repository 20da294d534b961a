//! Axum router construction for the book API.
//!
//! Assembles all routes into a single [`Router`] with a permissive CORS
//! layer, so browser clients on any origin can call the API and their
//! pre-flight requests are answered.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the book service.
///
/// The router includes:
/// - `GET /` -- welcome text
/// - `GET /books` -- list books
/// - `POST /books` -- create a book
/// - `GET /books/{id}` -- single book
/// - `DELETE /books/{id}` -- delete a book
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/books",
            get(handlers::list_books).post(handlers::create_book),
        )
        .route(
            "/books/{id}",
            get(handlers::get_book).delete(handlers::delete_book),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
