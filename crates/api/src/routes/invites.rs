//! Invite routes: code creation and redemption.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::family::FamilyRole;
use domain::models::invite::{
    generate_invite_code, invite_expiry, CreateInviteResponse, RedeemInviteRequest,
    RedeemInviteResponse, MAX_CODE_GENERATION_ATTEMPTS,
};
use persistence::repositories::{FamilyRepository, InviteRepository};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Create a new invite code for a family. Owner only.
///
/// POST /api/v1/families/:family_id/invites
///
/// Any previous active code for the family is retired. Codes are random
/// 6-digit strings; generation retries on collision with another family's
/// active code and gives up after a bounded number of attempts.
pub async fn create_invite(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(family_id): Path<Uuid>,
) -> Result<(StatusCode, Json<CreateInviteResponse>), ApiError> {
    let family_repo = FamilyRepository::new(state.pool.clone());
    let invite_repo = InviteRepository::new(state.pool.clone());

    let membership = family_repo
        .get_membership(family_id, user_auth.user_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Family not found or you are not a member".to_string())
        })?;

    let role: FamilyRole = membership.role.into();
    if !role.can_invite() {
        return Err(ApiError::Forbidden(
            "Only the owner can create invite codes".to_string(),
        ));
    }

    let code = find_free_code(&invite_repo).await?;
    let expires_at = invite_expiry(Utc::now());

    let invite = invite_repo
        .create_invite(family_id, &code, user_auth.user_id, expires_at)
        .await?;

    info!(
        family_id = %family_id,
        invite_id = %invite.id,
        user_id = %user_auth.user_id,
        "Invite code created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateInviteResponse {
            code: invite.code,
            family_id: invite.family_id,
            expires_at: invite.expires_at,
        }),
    ))
}

/// Redeem an invite code and join its family.
///
/// POST /api/v1/invites/redeem
///
/// A code that is unknown, expired, or already spent gets the same 404, so
/// callers cannot probe which codes exist.
pub async fn redeem_invite(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<RedeemInviteRequest>,
) -> Result<Json<RedeemInviteResponse>, ApiError> {
    request.validate()?;

    let family_repo = FamilyRepository::new(state.pool.clone());
    let invite_repo = InviteRepository::new(state.pool.clone());

    let invite = invite_repo
        .find_active_by_code(&request.code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invalid or expired invite code".to_string()))?;

    if family_repo
        .get_membership(invite.family_id, user_auth.user_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "You are already a member of this family".to_string(),
        ));
    }

    let family = family_repo
        .find_by_id(invite.family_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invalid or expired invite code".to_string()))?;

    // The redemption transaction re-checks the code; a concurrent redemption
    // loses the race and sees the same 404 as an unknown code.
    let membership = invite_repo
        .redeem_invite(invite.id, user_auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invalid or expired invite code".to_string()))?;

    info!(
        family_id = %invite.family_id,
        invite_id = %invite.id,
        user_id = %user_auth.user_id,
        "Invite code redeemed"
    );

    Ok(Json(RedeemInviteResponse {
        family_id: family.id,
        family_name: family.name,
        joined_at: membership.joined_at,
    }))
}

/// Generates a code that does not collide with any active code.
async fn find_free_code(invite_repo: &InviteRepository) -> Result<String, ApiError> {
    for _ in 0..MAX_CODE_GENERATION_ATTEMPTS {
        let code = generate_invite_code();
        if !invite_repo.active_code_exists(&code).await? {
            return Ok(code);
        }
    }

    warn!(
        attempts = MAX_CODE_GENERATION_ATTEMPTS,
        "Invite code generation exhausted attempts"
    );
    Err(ApiError::ResourceExhausted(
        "Could not generate a unique invite code; try again later".to_string(),
    ))
}
