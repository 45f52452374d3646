//! Shared helpers for router tests

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

use bookshelf_server::{
    api,
    error::{AppError, AppResult},
    models::book::{Book, BookTransition},
    repository::{BookRepository, Repository},
    AppConfig, AppState,
};

/// Book store kept in memory; a rejected transition leaves the map untouched
#[derive(Default)]
pub struct InMemoryBooks {
    books: Mutex<HashMap<Uuid, Book>>,
}

impl InMemoryBooks {
    pub async fn insert(&self, book: Book) {
        self.books.lock().await.insert(book.id, book);
    }

    pub async fn get(&self, id: Uuid) -> Option<Book> {
        self.books.lock().await.get(&id).cloned()
    }
}

#[async_trait]
impl BookRepository for InMemoryBooks {
    async fn find_by_uuid(&self, id: Uuid) -> AppResult<Book> {
        self.get(id).await.ok_or(AppError::BookNotFound(id))
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        let mut books: Vec<Book> = self.books.lock().await.values().cloned().collect();
        books.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(books)
    }

    async fn create(&self, book: &Book) -> AppResult<Book> {
        self.insert(book.clone()).await;
        Ok(book.clone())
    }

    async fn transition(&self, id: Uuid, transition: BookTransition) -> AppResult<Book> {
        let mut books = self.books.lock().await;
        let stored = books.get_mut(&id).ok_or(AppError::BookNotFound(id))?;

        let mut book = stored.clone();
        transition.apply(&mut book)?;
        *stored = book.clone();

        Ok(book)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub books: Arc<InMemoryBooks>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// `name=value` part of the session cookie, if one was set
    pub session: Option<String>,
    pub body: Value,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.session.secret = "router-test-secret".to_string();
    config
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let books = Arc::new(InMemoryBooks::default());
        let state = AppState::new(config, Repository::with_books(books.clone()));

        Self {
            router: api::create_router(state),
            books,
        }
    }

    /// Store a book in the given state and return it
    pub async fn seed(&self, name: &str, in_stock: bool) -> Book {
        let mut book = Book::new(name);
        book.in_stock = in_stock;
        self.books.insert(book.clone()).await;
        book
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        session: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = session {
            request = request.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let session = headers
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(str::to_string);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            headers,
            session,
            body,
        }
    }
}
