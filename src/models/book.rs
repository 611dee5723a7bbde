//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;

/// Book row as stored in the database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub isbn: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub author_id: Option<i32>,
    /// Joined from `authors`; absent on rows returned by writes
    #[sqlx(default)]
    pub author_name: Option<String>,
}

/// Book fields for an insert; the id is assigned by the database
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub year: i32,
    pub isbn: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub author_id: Option<i32>,
}

/// Short book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookDto {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub isbn: String,
    pub image: Option<String>,
    pub author_id: Option<i32>,
    pub author_name: Option<String>,
}

/// Full book representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub isbn: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub author_id: Option<i32>,
    pub author_name: Option<String>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(
        length(min = 1, max = 50, message = "Title must be 1 to 50 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[validate(range(min = 1000, max = 9999, message = "Year must have four digits"))]
    pub year: i32,
    #[validate(
        length(min = 1, max = 50, message = "ISBN must be 1 to 50 characters"),
        custom(function = "not_blank")
    )]
    pub isbn: String,
    #[validate(length(min = 10, max = 250, message = "Summary must be 10 to 250 characters"))]
    pub summary: Option<String>,
    #[validate(length(max = 250, message = "Image must be at most 250 characters"))]
    pub image: Option<String>,
    #[validate(range(min = 1, message = "Author id must be positive"))]
    pub author_id: Option<i32>,
}

/// Update book request; `id` must match the id in the path
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    pub id: i32,
    #[validate(
        length(min = 1, max = 50, message = "Title must be 1 to 50 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[validate(range(min = 1000, max = 9999, message = "Year must have four digits"))]
    pub year: i32,
    #[validate(
        length(min = 1, max = 50, message = "ISBN must be 1 to 50 characters"),
        custom(function = "not_blank")
    )]
    pub isbn: String,
    #[validate(length(min = 10, max = 250, message = "Summary must be 10 to 250 characters"))]
    pub summary: Option<String>,
    #[validate(length(max = 250, message = "Image must be at most 250 characters"))]
    pub image: Option<String>,
    #[validate(range(min = 1, message = "Author id must be positive"))]
    pub author_id: Option<i32>,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        BookDto {
            id: book.id,
            title: book.title,
            year: book.year,
            isbn: book.isbn,
            image: book.image,
            author_id: book.author_id,
            author_name: book.author_name,
        }
    }
}

impl From<Book> for BookDetails {
    fn from(book: Book) -> Self {
        BookDetails {
            id: book.id,
            title: book.title,
            year: book.year,
            isbn: book.isbn,
            summary: book.summary,
            image: book.image,
            author_id: book.author_id,
            author_name: book.author_name,
        }
    }
}

impl From<CreateBook> for NewBook {
    fn from(request: CreateBook) -> Self {
        NewBook {
            title: request.title.trim().to_string(),
            year: request.year,
            isbn: request.isbn.trim().to_string(),
            summary: request.summary,
            image: request.image,
            author_id: request.author_id,
        }
    }
}

impl From<UpdateBook> for Book {
    fn from(request: UpdateBook) -> Self {
        Book {
            id: request.id,
            title: request.title.trim().to_string(),
            year: request.year,
            isbn: request.isbn.trim().to_string(),
            summary: request.summary,
            image: request.image,
            author_id: request.author_id,
            author_name: None,
        }
    }
}
