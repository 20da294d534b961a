//! Shared type definitions for the Bookshelf book service.
//!
//! This crate is the single source of truth for the types exchanged
//! between the HTTP layer and the store. [`Book`] and [`BookId`] flow
//! downstream to `TypeScript` via `ts-rs` for browser clients.
//!
//! # Modules
//!
//! - [`ids`] -- Store-assigned book identifier
//! - [`book`] -- The book record, create payload, and presence validation
//! - [`query`] -- List filters and pagination

pub mod book;
pub mod ids;
pub mod query;

// Re-export all public types at crate root for convenience.
pub use book::{Book, NewBook, NewBookRequest, RatingInput, ValidationError};
pub use ids::BookId;
pub use query::{BookFilter, BookQuery, ListBooksParams, PageRequest, QueryError};
