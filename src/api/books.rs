//! Book endpoints: registration, lookup, check-in and check-out

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::{cookie::CookieJar, WithRejection};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookActionResponse, BookTransition, CreateBook},
};

use super::RequestCounter;

type ActionResponse = (StatusCode, CookieJar, Json<BookActionResponse>);

/// Parse the `{id}` path segment as a book UUID
fn parse_book_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid book id: {}", raw)))
}

/// Turn a transition outcome into `{info, counter}`.
///
/// Only the recoverable book errors become action responses; anything else
/// propagates as an `AppError`.
fn action_response(
    outcome: AppResult<Book>,
    transition: BookTransition,
    counter: RequestCounter,
) -> AppResult<ActionResponse> {
    let (status, info) = match outcome {
        Ok(book) => (StatusCode::OK, transition.describe(&book)),
        Err(
            e @ (AppError::BookNotFound(_)
            | AppError::BookAlreadyStocked(_)
            | AppError::BookAlreadyCheckedOut(_)),
        ) => (e.status().0, e.to_string()),
        Err(e) => return Err(e),
    };

    Ok((
        status,
        counter.jar,
        Json(BookActionResponse {
            info,
            counter: counter.value,
        }),
    ))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books ordered by name", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Register a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book registered, in stock", body = Book),
        (status = 400, description = "Invalid name", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateBook>, AppError>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.register(request).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Get a book by UUID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book UUID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 400, description = "Malformed UUID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.find(parse_book_id(&id)?).await?;
    Ok(Json(book))
}

/// Check a book back in
#[utoipa::path(
    post,
    path = "/books/{id}/check-in",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book UUID")
    ),
    responses(
        (status = 200, description = "Book checked in", body = BookActionResponse),
        (status = 400, description = "Malformed UUID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = BookActionResponse),
        (status = 423, description = "Book already in stock", body = BookActionResponse)
    )
)]
pub async fn check_in(
    State(state): State<crate::AppState>,
    counter: RequestCounter,
    Path(id): Path<String>,
) -> AppResult<ActionResponse> {
    let id = parse_book_id(&id)?;
    let outcome = state.services.books.check_in(id).await;
    action_response(outcome, BookTransition::CheckIn, counter)
}

/// Check a book out
#[utoipa::path(
    post,
    path = "/books/{id}/check-out",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book UUID")
    ),
    responses(
        (status = 200, description = "Book checked out", body = BookActionResponse),
        (status = 400, description = "Malformed UUID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = BookActionResponse),
        (status = 423, description = "Book already checked out", body = BookActionResponse)
    )
)]
pub async fn check_out(
    State(state): State<crate::AppState>,
    counter: RequestCounter,
    Path(id): Path<String>,
) -> AppResult<ActionResponse> {
    let id = parse_book_id(&id)?;
    let outcome = state.services.books.check_out(id).await;
    action_response(outcome, BookTransition::CheckOut, counter)
}
