//! Business logic services

pub mod books;
pub mod session;

use crate::{config::SessionConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub session: session::SessionService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, session_config: SessionConfig) -> Self {
        Self {
            books: books::BooksService::new(repository),
            session: session::SessionService::new(session_config),
        }
    }
}
