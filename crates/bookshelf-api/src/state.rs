//! Shared application state for the book API.
//!
//! [`AppState`] owns the database handle. It is built once at startup,
//! wrapped in [`Arc`](std::sync::Arc), and injected into every handler
//! via Axum's `State` extractor. No book data is held in process.

use bookshelf_db::{BookStore, Database};

/// Shared state for the Axum application.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The book database. Cloning shares the underlying pool.
    pub db: Database,
}

impl AppState {
    /// Create application state around an open database.
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Borrow a [`BookStore`] for the duration of a request.
    pub const fn books(&self) -> BookStore<'_> {
        BookStore::new(self.db.pool())
    }
}
