//! Book catalog service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookDetails, BookDto, CreateBook, NewBook, UpdateBook},
    repository::{AuthorStore, BookStore},
};

#[derive(Clone)]
pub struct BooksService {
    books: Arc<dyn BookStore>,
    authors: Arc<dyn AuthorStore>,
}

impl BooksService {
    pub fn new(books: Arc<dyn BookStore>, authors: Arc<dyn AuthorStore>) -> Self {
        Self { books, authors }
    }

    pub async fn list(&self) -> AppResult<Vec<BookDto>> {
        let books = self.books.find_all().await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    pub async fn get(&self, id: i32) -> AppResult<BookDetails> {
        self.books
            .find_by_id(id)
            .await?
            .map(BookDetails::from)
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, request: CreateBook) -> AppResult<BookDetails> {
        let new_book = NewBook::from(request);
        self.check_author(new_book.author_id).await?;

        if self.books.isbn_exists(&new_book.isbn, None).await? {
            return Err(AppError::Conflict(format!(
                "A book with ISBN {} already exists",
                new_book.isbn
            )));
        }

        let created = self.books.create(&new_book).await?;

        // Reload to pick up the author's name
        let book = self.books.find_by_id(created.id).await?.unwrap_or(created);
        Ok(BookDetails::from(book))
    }

    pub async fn update(&self, request: UpdateBook) -> AppResult<()> {
        let id = request.id;
        if !self.books.exists(id).await? {
            return Err(not_found(id));
        }

        let book = Book::from(request);
        self.check_author(book.author_id).await?;

        if self.books.isbn_exists(&book.isbn, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "A book with ISBN {} already exists",
                book.isbn
            )));
        }

        if !self.books.update(&book).await? {
            return Err(AppError::Internal(format!("Book {} was not saved", id)));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.books.exists(id).await? {
            return Err(not_found(id));
        }

        if !self.books.delete(id).await? {
            return Err(AppError::Internal(format!("Book {} was not deleted", id)));
        }
        Ok(())
    }

    /// A book may have no author, but a referenced author must exist
    async fn check_author(&self, author_id: Option<i32>) -> AppResult<()> {
        if let Some(author_id) = author_id {
            if !self.authors.exists(author_id).await? {
                return Err(AppError::BadRequest(format!(
                    "Author {} does not exist",
                    author_id
                )));
            }
        }
        Ok(())
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}
