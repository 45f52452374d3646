//! Book stock service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, BookTransition, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get book by UUID
    pub async fn find(&self, id: Uuid) -> AppResult<Book> {
        self.repository.books.find_by_uuid(id).await
    }

    /// List all books
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Register a new book, in stock
    pub async fn register(&self, request: CreateBook) -> AppResult<Book> {
        let request = CreateBook {
            name: request.name.trim().to_string(),
        };
        request.validate()?;

        let book = self.repository.books.create(&Book::new(request.name)).await?;
        tracing::info!(book_id = %book.id, name = %book.name, "Book registered");
        Ok(book)
    }

    /// Return a checked-out book to stock
    pub async fn check_in(&self, id: Uuid) -> AppResult<Book> {
        self.apply(id, BookTransition::CheckIn).await
    }

    /// Lend an in-stock book
    pub async fn check_out(&self, id: Uuid) -> AppResult<Book> {
        self.apply(id, BookTransition::CheckOut).await
    }

    /// Ping the store (readiness)
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }

    async fn apply(&self, id: Uuid, transition: BookTransition) -> AppResult<Book> {
        let book = self.repository.books.find_by_uuid(id).await?;

        match self.repository.books.transition(book.id, transition).await {
            Ok(book) => {
                tracing::info!(book_id = %book.id, name = %book.name, ?transition, "Book transition committed");
                Ok(book)
            }
            Err(e) => {
                tracing::debug!(book_id = %id, ?transition, error = %e, "Book transition rejected");
                Err(e)
            }
        }
    }
}
