//! Family routes: creation, listing, membership, and ownership transfer.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::family::{
    CreateFamilyRequest, Family, FamilyDetail, FamilyRole, FamilySummary, ListFamiliesResponse,
    ListMembersResponse, MemberResponse, RemoveMemberResponse, TransferOwnershipRequest,
    TransferOwnershipResponse,
};
use domain::models::user::UserPublic;
use persistence::repositories::FamilyRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Create a new family. The creator becomes its owner.
///
/// POST /api/v1/families
pub async fn create_family(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateFamilyRequest>,
) -> Result<(StatusCode, Json<Family>), ApiError> {
    request.validate()?;

    let family_repo = FamilyRepository::new(state.pool.clone());

    let family = family_repo
        .create_family(
            request.name.trim(),
            request.description.as_deref(),
            user_auth.user_id,
        )
        .await?;

    info!(
        family_id = %family.id,
        user_id = %user_auth.user_id,
        "Family created"
    );

    Ok((StatusCode::CREATED, Json(family.into())))
}

/// List families the authenticated user belongs to.
///
/// GET /api/v1/families
pub async fn list_families(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<ListFamiliesResponse>, ApiError> {
    let family_repo = FamilyRepository::new(state.pool.clone());

    let families = family_repo.find_user_families(user_auth.user_id).await?;

    let data: Vec<FamilySummary> = families
        .into_iter()
        .map(|f| FamilySummary {
            id: f.id,
            name: f.name,
            member_count: f.member_count,
            your_role: f.role.into(),
            joined_at: f.joined_at,
        })
        .collect();

    let count = data.len();
    Ok(Json(ListFamiliesResponse { data, count }))
}

/// Get details of one family the user belongs to.
///
/// GET /api/v1/families/:family_id
pub async fn get_family(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(family_id): Path<Uuid>,
) -> Result<Json<FamilyDetail>, ApiError> {
    let family_repo = FamilyRepository::new(state.pool.clone());

    let family = family_repo
        .find_family_with_membership(family_id, user_auth.user_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Family not found or you are not a member".to_string())
        })?;

    Ok(Json(FamilyDetail {
        id: family.id,
        name: family.name,
        description: family.description,
        owner_id: family.owner_id,
        member_count: family.member_count,
        created_at: family.created_at,
        your_role: family.role.into(),
        your_joined_at: family.joined_at,
    }))
}

/// List members of a family.
///
/// GET /api/v1/families/:family_id/members
pub async fn list_members(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(family_id): Path<Uuid>,
) -> Result<Json<ListMembersResponse>, ApiError> {
    let family_repo = FamilyRepository::new(state.pool.clone());

    // Membership check first; non-members get the same 404 as a missing family
    family_repo
        .get_membership(family_id, user_auth.user_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Family not found or you are not a member".to_string())
        })?;

    let members = family_repo.list_members(family_id).await?;

    let data: Vec<MemberResponse> = members
        .into_iter()
        .map(|m| MemberResponse {
            id: m.id,
            user: UserPublic {
                id: m.user_id,
                nickname: m.nickname,
                avatar_url: m.avatar_url,
            },
            role: m.role.into(),
            joined_at: m.joined_at,
        })
        .collect();

    let count = data.len();
    Ok(Json(ListMembersResponse { data, count }))
}

/// Remove a member from a family. Owner only.
///
/// DELETE /api/v1/families/:family_id/members/:user_id
pub async fn remove_member(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((family_id, target_user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<RemoveMemberResponse>, ApiError> {
    let family_repo = FamilyRepository::new(state.pool.clone());

    let membership = family_repo
        .get_membership(family_id, user_auth.user_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Family not found or you are not a member".to_string())
        })?;

    let role: FamilyRole = membership.role.into();
    if !role.can_remove_members() {
        return Err(ApiError::Forbidden(
            "Only the owner can remove members".to_string(),
        ));
    }

    if target_user_id == user_auth.user_id {
        return Err(ApiError::Validation(
            "The owner cannot remove themselves; transfer ownership first".to_string(),
        ));
    }

    let removed = family_repo.remove_member(family_id, target_user_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound(
            "User is not a member of this family".to_string(),
        ));
    }

    info!(
        family_id = %family_id,
        removed_user_id = %target_user_id,
        user_id = %user_auth.user_id,
        "Member removed"
    );

    Ok(Json(RemoveMemberResponse {
        removed: true,
        family_id,
        user_id: target_user_id,
    }))
}

/// Leave a family. Members only; the owner must transfer ownership first.
///
/// POST /api/v1/families/:family_id/leave
pub async fn leave_family(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(family_id): Path<Uuid>,
) -> Result<Json<RemoveMemberResponse>, ApiError> {
    let family_repo = FamilyRepository::new(state.pool.clone());

    let membership = family_repo
        .get_membership(family_id, user_auth.user_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Family not found or you are not a member".to_string())
        })?;

    let role: FamilyRole = membership.role.into();
    if !role.can_leave() {
        return Err(ApiError::Conflict(
            "The owner must transfer ownership before leaving".to_string(),
        ));
    }

    family_repo
        .remove_member(family_id, user_auth.user_id)
        .await?;

    info!(
        family_id = %family_id,
        user_id = %user_auth.user_id,
        "Member left family"
    );

    Ok(Json(RemoveMemberResponse {
        removed: true,
        family_id,
        user_id: user_auth.user_id,
    }))
}

/// Transfer family ownership to another member. Owner only.
///
/// POST /api/v1/families/:family_id/transfer-ownership
pub async fn transfer_ownership(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(family_id): Path<Uuid>,
    Json(request): Json<TransferOwnershipRequest>,
) -> Result<Json<TransferOwnershipResponse>, ApiError> {
    let family_repo = FamilyRepository::new(state.pool.clone());

    let membership = family_repo
        .get_membership(family_id, user_auth.user_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Family not found or you are not a member".to_string())
        })?;

    let role: FamilyRole = membership.role.into();
    if !role.can_transfer_ownership() {
        return Err(ApiError::Forbidden(
            "Only the owner can transfer ownership".to_string(),
        ));
    }

    if request.new_owner_id == user_auth.user_id {
        return Err(ApiError::Validation(
            "Cannot transfer ownership to yourself".to_string(),
        ));
    }

    // The new owner must already be a member
    family_repo
        .get_membership(family_id, request.new_owner_id)
        .await?
        .ok_or_else(|| {
            ApiError::Conflict("New owner is not a member of this family".to_string())
        })?;

    family_repo
        .transfer_ownership(family_id, user_auth.user_id, request.new_owner_id)
        .await?;

    info!(
        family_id = %family_id,
        previous_owner_id = %user_auth.user_id,
        new_owner_id = %request.new_owner_id,
        "Ownership transferred"
    );

    Ok(Json(TransferOwnershipResponse {
        family_id,
        previous_owner_id: user_auth.user_id,
        new_owner_id: request.new_owner_id,
        transferred_at: Utc::now(),
    }))
}
