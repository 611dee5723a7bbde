//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{book::BookDto, not_blank};

/// Author row as stored in the database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Author fields for an insert; the id is assigned by the database
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
}

/// Author as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// Author with the books they wrote
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorDetails {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub books: Vec<BookDto>,
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(
        length(min = 1, max = 50, message = "First name must be 1 to 50 characters"),
        custom(function = "not_blank")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 50, message = "Last name must be 1 to 50 characters"),
        custom(function = "not_blank")
    )]
    pub last_name: String,
}

/// Update author request; `id` must match the id in the path
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    pub id: i32,
    #[validate(
        length(min = 1, max = 50, message = "First name must be 1 to 50 characters"),
        custom(function = "not_blank")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 50, message = "Last name must be 1 to 50 characters"),
        custom(function = "not_blank")
    )]
    pub last_name: String,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        AuthorDto {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
        }
    }
}

impl AuthorDetails {
    pub fn new(author: Author, books: Vec<BookDto>) -> Self {
        AuthorDetails {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
            books,
        }
    }
}

impl From<CreateAuthor> for NewAuthor {
    fn from(request: CreateAuthor) -> Self {
        NewAuthor {
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
        }
    }
}

impl From<UpdateAuthor> for Author {
    fn from(request: UpdateAuthor) -> Self {
        Author {
            id: request.id,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
        }
    }
}
