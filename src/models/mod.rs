//! Data models for Bookshelf

pub mod book;

pub use book::{Book, BookActionResponse, BookTransition, CreateBook};
