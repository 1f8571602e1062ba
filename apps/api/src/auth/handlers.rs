//! Registration and login endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::jwt::issue_token;
use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
    pub user_id: i64,
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    validate_credentials(&request.email, &request.password)?;

    let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&request.email)
        .fetch_optional(&state.db)
        .await?;

    if exists.is_some() {
        return Err(AppError::Validation(
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&request.password)?;

    let (user_id,): (i64,) =
        sqlx::query_as("INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id")
            .bind(&request.email)
            .bind(&password_hash)
            .fetch_one(&state.db)
            .await?;

    let token = issue_token(&state.config, user_id, &request.email)?;

    info!("User registered successfully: {}", request.email);

    Ok(Json(AuthResponse {
        token,
        email: request.email,
        user_id,
    }))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&request.email)
        .fetch_optional(&state.db)
        .await?;

    // Missing account and wrong password share one message.
    let Some(user) = user else {
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    };

    if !verify_password(&request.password, &user.password_hash) {
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let token = issue_token(&state.config, user.id, &user.email)?;

    info!("User logged in successfully: {}", user.email);

    Ok(Json(AuthResponse {
        token,
        email: user.email,
        user_id: user.id,
    }))
}

fn validate_credentials(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(AppError::Validation(
            "A valid email address is required".to_string(),
        ));
    }
    if password.chars().count() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}
