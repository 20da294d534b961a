//! Book API server for the Bookshelf book service.
//!
//! This crate provides an Axum HTTP server exposing CRUD endpoints over
//! a single `book` table:
//!
//! - `GET /` -- welcome text
//! - `GET /books` -- paginated, filtered listing
//! - `POST /books` -- create
//! - `GET /books/{id}` -- fetch
//! - `DELETE /books/{id}` -- delete
//!
//! # Architecture
//!
//! ```text
//! router (CORS + trace) --> handlers --> BookStore --> SQLite
//! ```
//!
//! The only shared state is the [`AppState`] database handle; every
//! request runs independently against the store.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, bind, serve, start_server};
pub use state::AppState;
