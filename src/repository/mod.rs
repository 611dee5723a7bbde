//! Repository layer for database operations
//!
//! Each entity gets a store trait so services can run against PostgreSQL in
//! production and against mocks or in-memory stores in tests.

pub mod authors;
pub mod books;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, NewAuthor, NewBook, NewUser, Role, User},
};

/// A unique-constraint violation on write is a conflict, whatever the caller checked beforehand
pub(crate) fn conflict_on_unique_violation(error: sqlx::Error, message: &str) -> AppError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            tracing::warn!("Unique constraint {:?} violated", db.constraint());
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(error),
    }
}

/// Data access for authors
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Author>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Author>>;

    async fn create(&self, author: &NewAuthor) -> AppResult<Author>;

    /// Returns `false` when no row was written
    async fn update(&self, author: &Author) -> AppResult<bool>;

    /// Returns `false` when no row was removed
    async fn delete(&self, id: i32) -> AppResult<bool>;

    async fn exists(&self, id: i32) -> AppResult<bool>;
}

/// Data access for books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    async fn find_by_author(&self, author_id: i32) -> AppResult<Vec<Book>>;

    async fn create(&self, book: &NewBook) -> AppResult<Book>;

    /// Returns `false` when no row was written
    async fn update(&self, book: &Book) -> AppResult<bool>;

    /// Returns `false` when no row was removed
    async fn delete(&self, id: i32) -> AppResult<bool>;

    async fn exists(&self, id: i32) -> AppResult<bool>;

    /// Whether another book already uses `isbn`
    async fn isbn_exists(&self, isbn: &str, exclude_id: Option<i32>) -> AppResult<bool>;
}

/// Data access for user accounts and their roles
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn username_exists(&self, username: &str) -> AppResult<bool>;

    async fn email_exists(&self, email: &str) -> AppResult<bool>;

    async fn create(&self, user: &NewUser) -> AppResult<User>;

    async fn roles_of(&self, user_id: Uuid) -> AppResult<Vec<Role>>;

    /// No-op when the user already has the role
    async fn add_to_role(&self, user_id: Uuid, role: Role) -> AppResult<()>;

    async fn role_exists(&self, role: Role) -> AppResult<bool>;

    async fn create_role(&self, role: Role) -> AppResult<()>;
}

/// Main repository struct holding the pool and one store per entity
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: Arc<dyn AuthorStore>,
    pub books: Arc<dyn BookStore>,
    pub users: Arc<dyn UserStore>,
}

impl Repository {
    /// Create a new repository backed by PostgreSQL
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(authors::AuthorsRepository::new(pool.clone())),
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            users: Arc::new(users::UsersRepository::new(pool.clone())),
            pool,
        }
    }

    /// Create a repository over caller-supplied stores
    pub fn with_stores(
        pool: Pool<Postgres>,
        authors: Arc<dyn AuthorStore>,
        books: Arc<dyn BookStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            pool,
            authors,
            books,
            users,
        }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
