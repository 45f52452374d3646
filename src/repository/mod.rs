//! Repository layer for database operations

pub mod books;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book::{Book, BookTransition},
};

/// Book lookup and transactional persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Fails with `BookNotFound` when no book has this id
    async fn find_by_uuid(&self, id: Uuid) -> AppResult<Book>;

    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn create(&self, book: &Book) -> AppResult<Book>;

    /// Apply `transition` to the book atomically. Nothing is written when the
    /// transition is rejected.
    async fn transition(&self, id: Uuid, transition: BookTransition) -> AppResult<Book>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the storage backends
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookRepository>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::BooksRepository::new(pool)),
        }
    }

    /// Build a repository over any book store
    pub fn with_books(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }
}
