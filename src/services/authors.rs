//! Author catalog service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorDetails, AuthorDto, BookDto, CreateAuthor, NewAuthor, UpdateAuthor},
    repository::{AuthorStore, BookStore},
};

#[derive(Clone)]
pub struct AuthorsService {
    authors: Arc<dyn AuthorStore>,
    books: Arc<dyn BookStore>,
}

impl AuthorsService {
    pub fn new(authors: Arc<dyn AuthorStore>, books: Arc<dyn BookStore>) -> Self {
        Self { authors, books }
    }

    pub async fn list(&self) -> AppResult<Vec<AuthorDto>> {
        let authors = self.authors.find_all().await?;
        Ok(authors.into_iter().map(AuthorDto::from).collect())
    }

    /// Get an author together with their books
    pub async fn get(&self, id: i32) -> AppResult<AuthorDetails> {
        let author = self
            .authors
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        let books = self.books.find_by_author(id).await?;
        Ok(AuthorDetails::new(
            author,
            books.into_iter().map(BookDto::from).collect(),
        ))
    }

    pub async fn create(&self, request: CreateAuthor) -> AppResult<AuthorDto> {
        let created = self.authors.create(&NewAuthor::from(request)).await?;
        Ok(AuthorDto::from(created))
    }

    pub async fn update(&self, request: UpdateAuthor) -> AppResult<()> {
        let id = request.id;
        if !self.authors.exists(id).await? {
            return Err(not_found(id));
        }

        if !self.authors.update(&Author::from(request)).await? {
            return Err(AppError::Internal(format!("Author {} was not saved", id)));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.authors.exists(id).await? {
            return Err(not_found(id));
        }

        if !self.authors.delete(id).await? {
            return Err(AppError::Internal(format!("Author {} was not deleted", id)));
        }
        Ok(())
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Author {} not found", id))
}
