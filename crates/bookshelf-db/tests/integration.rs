//! Integration tests for the `bookshelf-db` data layer.
//!
//! Each test opens its own private in-memory `SQLite` database, so no
//! external services are required and tests do not share state. The
//! file-backed tests use a throwaway temp directory.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::indexing_slicing,
    clippy::missing_panics_doc
)]

use std::collections::BTreeSet;

use bookshelf_db::{BookStore, Database, SqliteConfig};
use bookshelf_types::{BookFilter, BookId, NewBook, PageRequest};

// =============================================================================
// Helpers
// =============================================================================

async fn setup() -> Database {
    Database::in_memory()
        .await
        .expect("Failed to open in-memory database")
}

fn new_book(title: &str, genre: &str, rating: Option<f64>) -> NewBook {
    NewBook::new(title.to_owned(), String::from("Author"), genre.to_owned(), rating)
        .expect("valid book")
}

/// Insert the shared fixture: five books across two genres, one unrated.
async fn seed(store: &BookStore<'_>) -> Vec<BookId> {
    let fixtures = [
        ("Dune", "SciFi", Some(4.8)),
        ("Emma", "Romance", Some(3.9)),
        ("Neuromancer", "SciFi", Some(4.1)),
        ("Hyperion", "SciFi", None),
        ("Persuasion", "Romance", Some(4.5)),
    ];
    let mut ids = Vec::new();
    for (title, genre, rating) in fixtures {
        let book = store
            .insert(&new_book(title, genre, rating))
            .await
            .expect("insert");
        ids.push(book.id);
    }
    ids
}

fn titles(books: &[bookshelf_types::Book]) -> Vec<&str> {
    books.iter().map(|b| b.title.as_str()).collect()
}

// =============================================================================
// Insert / get
// =============================================================================

#[tokio::test]
async fn insert_assigns_ids_and_roundtrips() {
    let db = setup().await;
    let store = BookStore::new(db.pool());

    let created = store
        .insert(&new_book("Dune", "SciFi", Some(4.8)))
        .await
        .expect("insert");
    assert_eq!(created.id, BookId(1));
    assert_eq!(created.title, "Dune");
    assert_eq!(created.rating, Some(4.8));

    let fetched = store.get(created.id).await.expect("get").expect("present");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn insert_keeps_null_rating() {
    let db = setup().await;
    let store = BookStore::new(db.pool());

    let created = store
        .insert(&new_book("Hyperion", "SciFi", None))
        .await
        .expect("insert");
    let fetched = store.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.rating, None);
}

#[tokio::test]
async fn get_missing_returns_none() {
    let db = setup().await;
    let store = BookStore::new(db.pool());

    assert!(store.get(BookId(99)).await.unwrap().is_none());
}

#[tokio::test]
async fn ids_are_unique_and_never_reused() {
    let db = setup().await;
    let store = BookStore::new(db.pool());

    let ids = seed(&store).await;
    let distinct: BTreeSet<_> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), ids.len());

    // Removing the highest id must not let the next insert reclaim it.
    let last = *ids.last().unwrap();
    assert!(store.delete(last).await.unwrap());
    let next = store
        .insert(&new_book("Foundation", "SciFi", None))
        .await
        .unwrap();
    assert!(next.id > last);
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn list_returns_insertion_order() {
    let db = setup().await;
    let store = BookStore::new(db.pool());
    seed(&store).await;

    let books = store
        .list(&BookFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(
        titles(&books),
        ["Dune", "Emma", "Neuromancer", "Hyperion", "Persuasion"]
    );
}

#[tokio::test]
async fn list_paginates() {
    let db = setup().await;
    let store = BookStore::new(db.pool());
    seed(&store).await;

    let page_two = store
        .list(&BookFilter::default(), PageRequest::new(2, 2))
        .await
        .unwrap();
    assert_eq!(titles(&page_two), ["Neuromancer", "Hyperion"]);

    let page_three = store
        .list(&BookFilter::default(), PageRequest::new(3, 2))
        .await
        .unwrap();
    assert_eq!(titles(&page_three), ["Persuasion"]);

    let beyond = store
        .list(&BookFilter::default(), PageRequest::new(4, 2))
        .await
        .unwrap();
    assert!(beyond.is_empty());

    let absurd = store
        .list(&BookFilter::default(), PageRequest::new(i64::MAX, i64::MAX))
        .await
        .unwrap();
    assert!(absurd.is_empty());
}

#[tokio::test]
async fn list_filters_by_exact_genre() {
    let db = setup().await;
    let store = BookStore::new(db.pool());
    seed(&store).await;

    let filter = BookFilter {
        genre: Some(String::from("Romance")),
        min_rating: None,
    };
    let books = store.list(&filter, PageRequest::default()).await.unwrap();
    assert_eq!(titles(&books), ["Emma", "Persuasion"]);

    let filter = BookFilter {
        genre: Some(String::from("romance")),
        min_rating: None,
    };
    let books = store.list(&filter, PageRequest::default()).await.unwrap();
    assert!(books.is_empty(), "genre match is case-sensitive");
}

#[tokio::test]
async fn list_filters_by_minimum_rating_inclusive() {
    let db = setup().await;
    let store = BookStore::new(db.pool());
    seed(&store).await;

    let filter = BookFilter {
        genre: None,
        min_rating: Some(4.1),
    };
    let books = store.list(&filter, PageRequest::default()).await.unwrap();
    assert_eq!(titles(&books), ["Dune", "Neuromancer", "Persuasion"]);
    assert!(books.iter().all(|b| b.rating.is_some()));
}

#[tokio::test]
async fn list_combines_filters_conjunctively() {
    let db = setup().await;
    let store = BookStore::new(db.pool());
    seed(&store).await;

    let filter = BookFilter {
        genre: Some(String::from("SciFi")),
        min_rating: Some(4.5),
    };
    let books = store.list(&filter, PageRequest::default()).await.unwrap();
    assert_eq!(titles(&books), ["Dune"]);
    assert_eq!(store.count(&filter).await.unwrap(), 1);
}

#[tokio::test]
async fn negative_rating_filter_is_permitted() {
    let db = setup().await;
    let store = BookStore::new(db.pool());
    seed(&store).await;

    let filter = BookFilter {
        genre: None,
        min_rating: Some(-100.0),
    };
    // Every rated book matches; the unrated one never does.
    assert_eq!(store.count(&filter).await.unwrap(), 4);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn delete_removes_only_the_target() {
    let db = setup().await;
    let store = BookStore::new(db.pool());
    let ids = seed(&store).await;

    assert!(store.delete(ids[0]).await.unwrap());
    assert!(store.get(ids[0]).await.unwrap().is_none());
    assert_eq!(store.count(&BookFilter::default()).await.unwrap(), 4);
}

#[tokio::test]
async fn delete_missing_leaves_store_unchanged() {
    let db = setup().await;
    let store = BookStore::new(db.pool());
    seed(&store).await;

    assert!(!store.delete(BookId(404)).await.unwrap());
    assert_eq!(store.count(&BookFilter::default()).await.unwrap(), 5);
}

// =============================================================================
// Schema and connection
// =============================================================================

#[tokio::test]
async fn ensure_schema_is_idempotent() {
    let db = setup().await;
    db.ensure_schema().await.expect("second bootstrap");

    let store = BookStore::new(db.pool());
    store
        .insert(&new_book("Dune", "SciFi", None))
        .await
        .unwrap();
    db.ensure_schema().await.expect("bootstrap with data");
    assert_eq!(store.count(&BookFilter::default()).await.unwrap(), 1);
}

#[tokio::test]
async fn empty_required_fields_are_rejected_by_the_table() {
    let db = setup().await;

    let result = sqlx::query("INSERT INTO book (title, author, genre) VALUES ('', 'A', 'G')")
        .execute(db.pool())
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn concurrent_inserts_get_distinct_ids() {
    let db = setup().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            let store = BookStore::new(db.pool());
            store
                .insert(&new_book(&format!("Book {i}"), "SciFi", None))
                .await
                .map(|b| b.id)
        }));
    }

    let mut ids = BTreeSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap());
    }
    assert_eq!(ids.len(), 8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn file_database_handles_concurrent_inserts() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("books.db");
    let config = SqliteConfig::new(&format!("sqlite://{}", path.display()));
    assert_eq!(config.max_connections, 5);

    let db = Database::connect(&config).await.expect("open file database");
    assert!(path.exists(), "database file is created on connect");
    db.ensure_schema().await.expect("schema");

    let (mode,): (String,) = sqlx::query_as("PRAGMA journal_mode")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");

    let mut handles = Vec::new();
    for i in 0..32 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            let store = BookStore::new(db.pool());
            store
                .insert(&new_book(&format!("Book {i}"), "SciFi", Some(4.0)))
                .await
                .map(|b| b.id)
        }));
    }

    let mut ids = BTreeSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().expect("concurrent insert"));
    }
    assert_eq!(ids.len(), 32);

    let store = BookStore::new(db.pool());
    assert_eq!(store.count(&BookFilter::default()).await.unwrap(), 32);

    db.close().await;
}
