//! Data models and transfer objects

pub mod author;
pub mod book;
pub mod user;

// Re-export commonly used types
pub use author::{Author, AuthorDetails, AuthorDto, CreateAuthor, NewAuthor, UpdateAuthor};
pub use book::{Book, BookDetails, BookDto, CreateBook, NewBook, UpdateBook};
pub use user::{NewUser, Role, User, UserClaims, UserDto};

use validator::ValidationError;

/// Required text must keep at least one character once trimmed
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Value must not be blank".into());
        return Err(error);
    }
    Ok(())
}
