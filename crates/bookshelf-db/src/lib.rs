//! Data layer (`SQLite`) for the Bookshelf book service.
//!
//! The store is the only owner of book state; nothing is cached in
//! process between requests.
//!
//! ```text
//! HTTP handler
//!     |
//!     +-- Database (SqlitePool, owned by AppState)
//!         +-- BookStore   (borrowed view per request)
//! ```
//!
//! # Modules
//!
//! - [`sqlite`] -- Connection pool configuration and schema bootstrap
//! - [`book_store`] -- Insert, lookup, filtered listing, and deletion
//! - [`error`] -- Shared error types

pub mod book_store;
pub mod error;
pub mod sqlite;

// Re-export primary types for convenience.
pub use book_store::{BookRow, BookStore};
pub use error::DbError;
pub use sqlite::{Database, SqliteConfig};
