//! Login, registration and current-user endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{
        user::{CurrentUser, LoginRequest, LoginResponse, RegisterUser},
        UserDto,
    },
    AppState,
};

use super::{AuthenticatedUser, ValidatedJson};

/// Login with email and password
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state
        .services
        .auth
        .login(&request)
        .await
        .inspect_err(|e| tracing::warn!("Login failed for {}: {}", request.email, e))?;
    tracing::info!("User {} logged in", response.username);
    Ok(Json(response))
}

/// Register a customer account
#[utoipa::path(
    post,
    path = "/users/register",
    tag = "users",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username or email already in use")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterUser>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let user = state
        .services
        .auth
        .register(request)
        .await
        .inspect_err(|e| tracing::warn!("Registration failed: {}", e))?;
    tracing::info!("Registered user {}", user.username);
    Ok((StatusCode::CREATED, Json(user)))
}

/// Identity carried by the caller's token
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = CurrentUser),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(AuthenticatedUser(claims): AuthenticatedUser) -> Json<CurrentUser> {
    Json(CurrentUser::from(claims))
}
