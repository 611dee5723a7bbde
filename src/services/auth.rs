//! Authentication and account registration service

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        user::{LoginRequest, LoginResponse, RegisterUser},
        NewUser, Role, UserClaims, UserDto,
    },
    repository::UserStore,
};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Check credentials and issue a signed token
    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let user = self
            .users
            .find_by_email(request.email.trim())
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(&user.password_hash, &request.password)? {
            return Err(invalid_credentials());
        }

        let roles = self.users.roles_of(user.id).await?;
        let claims = UserClaims::for_user(&user, roles, &self.config);
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(LoginResponse {
            user_id: user.id,
            email: user.email,
            username: user.username,
            expires_at: claims.expires_at(),
            roles: claims.roles,
            token,
            token_type: "Bearer".to_string(),
        })
    }

    /// Create a customer account
    pub async fn register(&self, request: RegisterUser) -> AppResult<UserDto> {
        let username = request.username.trim().to_string();
        let email = request.email.trim().to_string();

        if self.users.username_exists(&username).await? {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
        if self.users.email_exists(&email).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let user = self
            .users
            .create(&NewUser {
                username,
                email,
                password_hash: hash_password(&request.password)?,
                first_name: request.first_name,
                last_name: request.last_name,
            })
            .await?;
        self.users.add_to_role(user.id, Role::Customer).await?;

        Ok(UserDto::new(user, vec![Role::Customer]))
    }
}

fn invalid_credentials() -> AppError {
    AppError::Authentication("Invalid email or password".to_string())
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
