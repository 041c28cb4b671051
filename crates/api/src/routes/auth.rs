//! Authentication routes: registration, login, and token refresh.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::user::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, TokenPair};
use persistence::repositories::UserRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth;

/// Register a new user account.
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let user_repo = UserRepository::new(state.pool.clone());

    if user_repo.email_exists(&request.email).await? {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = shared::password::hash_password(&request.password)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

    let user = user_repo
        .create_user(&request.email, &password_hash, request.nickname.trim())
        .await?;

    let tokens = issue_tokens(&state, user.id)?;

    info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            tokens,
        }),
    ))
}

/// Log in with email and password.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let user_repo = UserRepository::new(state.pool.clone());

    // One error message for both unknown email and bad password, so the
    // endpoint does not leak which emails are registered.
    let user = user_repo
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = shared::password::verify_password(&request.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;

    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let tokens = issue_tokens(&state, user.id)?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        user: user.into(),
        tokens,
    }))
}

/// Exchange a refresh token for a fresh token pair.
///
/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let jwt_config =
        UserAuth::create_jwt_config(&state.config.jwt).map_err(ApiError::Internal)?;

    let claims = jwt_config
        .validate_refresh_token(&request.refresh_token)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired refresh token".to_string()))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::Unauthorized("Invalid refresh token".to_string()))?;

    // Tokens for deleted accounts must stop working
    let user_repo = UserRepository::new(state.pool.clone());
    if user_repo.find_by_id(user_id).await?.is_none() {
        return Err(ApiError::Unauthorized(
            "Account no longer exists".to_string(),
        ));
    }

    let tokens = issue_tokens(&state, user_id)?;

    Ok(Json(tokens))
}

/// Issues a fresh access/refresh token pair for a user.
fn issue_tokens(state: &AppState, user_id: Uuid) -> Result<TokenPair, ApiError> {
    let jwt_config =
        UserAuth::create_jwt_config(&state.config.jwt).map_err(ApiError::Internal)?;

    let access_token = jwt_config
        .generate_access_token(user_id)
        .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;
    let refresh_token = jwt_config
        .generate_refresh_token(user_id)
        .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        expires_in_secs: state.config.jwt.access_token_expiry_secs,
    })
}
