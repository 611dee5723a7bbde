//! Business logic services

pub mod auth;
pub mod authors;
pub mod books;
pub mod seed;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub seed: seed::SeedService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.users.clone(), auth_config),
            authors: authors::AuthorsService::new(
                repository.authors.clone(),
                repository.books.clone(),
            ),
            books: books::BooksService::new(repository.books.clone(), repository.authors.clone()),
            seed: seed::SeedService::new(repository.users.clone()),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
