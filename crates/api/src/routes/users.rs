//! Current-user routes: profile and account deletion.

use axum::{extract::State, Json};
use domain::models::user::{DeletionSummary, UpdateProfileRequest, User};
use persistence::repositories::{AccountRepository, UserRepository};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Get the authenticated user's profile.
///
/// GET /api/v1/auth/me
pub async fn get_profile(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<User>, ApiError> {
    let user_repo = UserRepository::new(state.pool.clone());

    let user = user_repo
        .find_by_id(user_auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// Update the authenticated user's profile.
///
/// PUT /api/v1/auth/me
pub async fn update_profile(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<User>, ApiError> {
    request.validate()?;

    let user_repo = UserRepository::new(state.pool.clone());

    let nickname = request.nickname.as_ref().map(|n| n.trim());
    let user = user_repo
        .update_profile(user_auth.user_id, nickname, request.avatar_url.as_deref())
        .await?;

    info!(user_id = %user_auth.user_id, "Profile updated");

    Ok(Json(user.into()))
}

/// Delete the authenticated user's account.
///
/// DELETE /api/v1/auth/me
///
/// Owned families pass to their earliest-joined remaining member, or are
/// deleted entirely when the owner was the only member. The user's ledger
/// entries and memberships go with the account. Everything runs in one
/// transaction.
pub async fn delete_account(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<DeletionSummary>, ApiError> {
    let account_repo = AccountRepository::new(state.pool.clone());

    let outcome = account_repo.delete_account(user_auth.user_id).await?;

    info!(
        user_id = %user_auth.user_id,
        families_transferred = outcome.families_transferred,
        families_deleted = outcome.families_deleted,
        "Account deletion completed"
    );

    Ok(Json(DeletionSummary {
        families_transferred: outcome.families_transferred,
        families_deleted: outcome.families_deleted,
        entries_deleted: outcome.entries_deleted,
        memberships_deleted: outcome.memberships_deleted,
    }))
}
