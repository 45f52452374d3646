//! Book model and its stock transitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Book model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    /// `true` when the book is on the shelf, `false` when checked out
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// New books start in stock
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            in_stock: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Put a checked-out book back in stock
    pub fn check_in(&mut self) -> AppResult<()> {
        if self.in_stock {
            return Err(AppError::BookAlreadyStocked(self.name.clone()));
        }
        self.in_stock = true;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Take an in-stock book off the shelf
    pub fn check_out(&mut self) -> AppResult<()> {
        if !self.in_stock {
            return Err(AppError::BookAlreadyCheckedOut(self.name.clone()));
        }
        self.in_stock = false;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// State change applied to a book inside a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookTransition {
    CheckIn,
    CheckOut,
}

impl BookTransition {
    pub fn apply(self, book: &mut Book) -> AppResult<()> {
        match self {
            BookTransition::CheckIn => book.check_in(),
            BookTransition::CheckOut => book.check_out(),
        }
    }

    /// Success message shown to the patron
    pub fn describe(self, book: &Book) -> String {
        match self {
            BookTransition::CheckIn => format!("You have checked in {}", book.name),
            BookTransition::CheckOut => format!("You have checked out {}", book.name),
        }
    }
}

/// Register book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
}

/// Outcome of a check-in or check-out, successful or not
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookActionResponse {
    pub info: String,
    /// Session request counter, echoed for tracing
    pub counter: i64,
}
