//! Book endpoints

use axum::{
    extract::State,
    http::{header::LOCATION, HeaderName, StatusCode},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{BookDetails, BookDto, CreateBook, UpdateBook},
    AppState,
};

use super::{require_positive_id, AdminUser, AuthenticatedUser, Path, ValidatedJson};

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All books", body = Vec<BookDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BookDto>>> {
    let books = state.services.books.list().await?;
    tracing::info!("Listed {} books", books.len());
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetails>> {
    let book = state
        .services
        .books
        .get(id)
        .await
        .inspect_err(|e| tracing::warn!("Get book {} failed: {}", id, e))?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookDetails),
        (status = 400, description = "Invalid input or unknown author"),
        (status = 403, description = "Administrator privileges required"),
        (status = 409, description = "ISBN already in use")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    ValidatedJson(request): ValidatedJson<CreateBook>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<BookDetails>)> {
    let created = state
        .services
        .books
        .create(request)
        .await
        .inspect_err(|e| tracing::warn!("Create book failed: {}", e))?;
    tracing::info!("Book {} created by {}", created.id, claims.username);

    let location = format!("/api/books/{}", created.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(created)))
}

/// Replace a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 204, description = "Book updated"),
        (status = 400, description = "Invalid input or id mismatch"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "ISBN already in use")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateBook>,
) -> AppResult<StatusCode> {
    require_positive_id(id, "book")?;
    if request.id != id {
        tracing::warn!("Update book {} carried body id {}", id, request.id);
        return Err(AppError::BadRequest(format!(
            "Path id {} does not match body id {}",
            id, request.id
        )));
    }

    state
        .services
        .books
        .update(request)
        .await
        .inspect_err(|e| tracing::warn!("Update book {} failed: {}", id, e))?;
    tracing::info!("Book {} updated by {}", id, claims.username);
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    require_positive_id(id, "book")?;

    state
        .services
        .books
        .delete(id)
        .await
        .inspect_err(|e| tracing::warn!("Delete book {} failed: {}", id, e))?;
    tracing::info!("Book {} deleted by {}", id, claims.username);
    Ok(StatusCode::NO_CONTENT)
}
