//! Author endpoints

use axum::{
    extract::State,
    http::{header::LOCATION, HeaderName, StatusCode},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{AuthorDetails, AuthorDto, CreateAuthor, UpdateAuthor},
    AppState,
};

use super::{require_positive_id, AdminUser, AuthenticatedUser, Path, ValidatedJson};

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All authors", body = Vec<AuthorDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<AuthorDto>>> {
    let authors = state.services.authors.list().await?;
    tracing::info!("Listed {} authors", authors.len());
    Ok(Json(authors))
}

/// Get an author and their books
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorDetails),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetails>> {
    let author = state
        .services
        .authors
        .get(id)
        .await
        .inspect_err(|e| tracing::warn!("Get author {} failed: {}", id, e))?;
    Ok(Json(author))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = AuthorDto),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    ValidatedJson(request): ValidatedJson<CreateAuthor>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<AuthorDto>)> {
    let created = state.services.authors.create(request).await?;
    tracing::info!("Author {} created by {}", created.id, claims.username);

    let location = format!("/api/authors/{}", created.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(created)))
}

/// Replace an author
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 204, description = "Author updated"),
        (status = 400, description = "Invalid input or id mismatch"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateAuthor>,
) -> AppResult<StatusCode> {
    require_positive_id(id, "author")?;
    if request.id != id {
        tracing::warn!("Update author {} carried body id {}", id, request.id);
        return Err(AppError::BadRequest(format!(
            "Path id {} does not match body id {}",
            id, request.id
        )));
    }

    state
        .services
        .authors
        .update(request)
        .await
        .inspect_err(|e| tracing::warn!("Update author {} failed: {}", id, e))?;
    tracing::info!("Author {} updated by {}", id, claims.username);
    Ok(StatusCode::NO_CONTENT)
}

/// Delete an author; their books are kept without an author
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    require_positive_id(id, "author")?;

    state
        .services
        .authors
        .delete(id)
        .await
        .inspect_err(|e| tracing::warn!("Delete author {} failed: {}", id, e))?;
    tracing::info!("Author {} deleted by {}", id, claims.username);
    Ok(StatusCode::NO_CONTENT)
}
