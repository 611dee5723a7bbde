//! Books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{conflict_on_unique_violation, BookStore};
use crate::{
    error::AppResult,
    models::{Book, NewBook},
};

/// Book columns joined with the author's display name
const SELECT_BOOKS: &str = r#"
    SELECT b.id, b.title, b.year, b.isbn, b.summary, b.image, b.author_id,
           a.first_name || ' ' || a.last_name AS author_name
    FROM books b
    LEFT JOIN authors a ON a.id = b.author_id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let query = format!("{} ORDER BY b.title", SELECT_BOOKS);
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let query = format!("{} WHERE b.id = $1", SELECT_BOOKS);
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn find_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let query = format!("{} WHERE b.author_id = $1 ORDER BY b.year, b.title", SELECT_BOOKS);
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, year, isbn, summary, image, author_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, year, isbn, summary, image, author_id
            "#,
        )
        .bind(&book.title)
        .bind(book.year)
        .bind(&book.isbn)
        .bind(&book.summary)
        .bind(&book.image)
        .bind(book.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique_violation(e, "A book with this ISBN already exists"))?;
        Ok(row)
    }

    async fn update(&self, book: &Book) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $1, year = $2, isbn = $3, summary = $4, image = $5, author_id = $6
            WHERE id = $7
            "#,
        )
        .bind(&book.title)
        .bind(book.year)
        .bind(&book.isbn)
        .bind(&book.summary)
        .bind(&book.image)
        .bind(book.author_id)
        .bind(book.id)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_unique_violation(e, "A book with this ISBN already exists"))?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn isbn_exists(&self, isbn: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1 AND id != $2)")
                .bind(isbn)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
                .bind(isbn)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }
}
