//! API handlers for the bookstore REST endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    routing::{get, post},
    Json, Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::de::DeserializeOwned;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::UserClaims,
    AppState,
};

/// Extractor for an authenticated user from the bearer token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    tracing::warn!("Rejected request without bearer token: {}", rejection);
                    AppError::Authentication("Missing or malformed bearer token".to_string())
                })?;

        let auth = &state.config.auth;
        let claims = UserClaims::from_token(bearer.token(), &auth.jwt_secret, &auth.issuer)
            .map_err(|e| {
                tracing::warn!("Rejected bearer token: {}", e);
                AppError::Authentication("Invalid or expired token".to_string())
            })?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Extractor for an authenticated user holding the Administrator role
pub struct AdminUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(claims) = AuthenticatedUser::from_request_parts(parts, state).await?;
        if let Err(e) = claims.require_admin() {
            tracing::warn!("User {} denied write access", claims.username);
            return Err(e);
        }
        Ok(AdminUser(claims))
    }
}

/// JSON body that is decoded and validated before the handler runs.
/// Any decoding failure, including a missing or `null` body, is a 400.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::warn!("Rejected request body: {}", rejection.body_text());
            AppError::BadRequest(rejection.body_text())
        })?;

        value.validate().map_err(|errors| {
            tracing::warn!("Request body failed validation: {}", errors);
            AppError::Validation(errors.to_string())
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Path parameters whose rejections use the standard error body
pub struct Path<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) = axum::extract::Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::warn!("Rejected path parameters: {}", rejection.body_text());
                AppError::BadRequest(rejection.body_text())
            })?;
        Ok(Path(value))
    }
}

/// Ids in paths start at 1
pub(crate) fn require_positive_id(id: i32, resource: &str) -> AppResult<()> {
    if id < 1 {
        tracing::warn!("Rejected {} id {}", resource, id);
        return Err(AppError::BadRequest(format!("Invalid {} id {}", resource, id)));
    }
    Ok(())
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authors
        .route("/authors", get(authors::list_authors).post(authors::create_author))
        .route(
            "/authors/:id",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Users
        .route("/users/login", post(users::login))
        .route("/users/register", post(users::register))
        .route("/users/me", get(users::me))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(CatchPanicLayer::new())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
