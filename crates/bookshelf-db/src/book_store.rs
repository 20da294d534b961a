//! Book persistence: insert, lookup, filtered listing, and deletion.
//!
//! Every operation runs a single statement, so there is no multi-statement
//! transaction to coordinate. Identifier assignment is left to `SQLite`
//! (`AUTOINCREMENT`), which keeps concurrent inserts distinct and never
//! hands out an id twice.

use bookshelf_types::{Book, BookFilter, BookId, NewBook, PageRequest};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::DbError;

/// Columns selected for every book read, in [`BookRow`] order.
const BOOK_COLUMNS: &str = "id, title, author, genre, rating";

/// Operations on the `book` table.
pub struct BookStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BookStore<'a> {
    /// Create a new book store bound to a connection pool.
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a validated book and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the insert fails.
    pub async fn insert(&self, book: &NewBook) -> Result<Book, DbError> {
        let row = sqlx::query_as::<_, BookRow>(
            r"INSERT INTO book (title, author, genre, rating)
              VALUES (?, ?, ?, ?)
              RETURNING id, title, author, genre, rating",
        )
        .bind(book.title())
        .bind(book.author())
        .bind(book.genre())
        .bind(book.rating())
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(book_id = row.id, genre = %row.genre, "Inserted book");

        Ok(row.into())
    }

    /// Load a single book by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn get(&self, id: BookId) -> Result<Option<Book>, DbError> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {BOOK_COLUMNS} FROM book WHERE id = ?"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Book::from))
    }

    /// List one page of books matching `filter`, in id order.
    ///
    /// Only the predicates present in the filter are added to the
    /// `WHERE` clause. A page past the end yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn list(&self, filter: &BookFilter, page: PageRequest) -> Result<Vec<Book>, DbError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {BOOK_COLUMNS} FROM book"));
        push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = builder
            .build_query_as::<BookRow>()
            .fetch_all(self.pool)
            .await?;

        tracing::debug!(
            page = page.page(),
            limit = page.limit(),
            genre = ?filter.genre,
            min_rating = ?filter.min_rating,
            returned = rows.len(),
            "Listed books"
        );

        Ok(rows.into_iter().map(Book::from).collect())
    }

    /// Count books matching `filter`, ignoring pagination.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn count(&self, filter: &BookFilter) -> Result<i64, DbError> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM book");
        push_filter(&mut builder, filter);

        let row: (i64,) = builder.build_query_as().fetch_one(self.pool).await?;
        Ok(row.0)
    }

    /// Delete a book by id.
    ///
    /// Returns `true` if a row was removed, `false` if no book had that id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the delete fails.
    pub async fn delete(&self, id: BookId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM book WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        tracing::debug!(book_id = %id, deleted, "Delete book");

        Ok(deleted)
    }
}

/// Append the filter's predicates as a conjunctive `WHERE` clause.
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &BookFilter) {
    if filter.is_empty() {
        return;
    }

    let mut separator = " WHERE ";

    if let Some(genre) = &filter.genre {
        builder.push(separator).push("genre = ").push_bind(genre.clone());
        separator = " AND ";
    }

    if let Some(min_rating) = filter.min_rating {
        builder.push(separator).push("rating >= ").push_bind(min_rating);
    }
}

/// A row from the `book` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookRow {
    /// Store-assigned id.
    pub id: i64,
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Genre label.
    pub genre: String,
    /// Optional rating.
    pub rating: Option<f64>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: BookId(row.id),
            title: row.title,
            author: row.author,
            genre: row.genre,
            rating: row.rating,
        }
    }
}
