//! Ledger entry routes: recording, listing, editing, and deleting entries.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::ledger::{
    CreateEntryRequest, LedgerEntry, ListEntriesQuery, ListEntriesResponse, UpdateEntryRequest,
};
use persistence::repositories::{FamilyRepository, LedgerRepository};
use shared::pagination::{decode_cursor, encode_cursor};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

/// Record a new ledger entry.
///
/// POST /api/v1/families/:family_id/entries
///
/// Positive amounts are expenses and must carry a receipt photo; negative
/// amounts are income. Zero is rejected.
pub async fn create_entry(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(family_id): Path<Uuid>,
    Json(request): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<LedgerEntry>), ApiError> {
    request.validate()?;

    let family_repo = FamilyRepository::new(state.pool.clone());
    let ledger_repo = LedgerRepository::new(state.pool.clone());

    family_repo
        .get_membership(family_id, user_auth.user_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Family not found or you are not a member".to_string())
        })?;

    let entry = ledger_repo
        .create_entry(
            family_id,
            user_auth.user_id,
            request.amount,
            request.category_id,
            request.description.as_deref(),
            request.photo_url.as_deref(),
            request.entry_date,
        )
        .await?;

    info!(
        family_id = %family_id,
        entry_id = %entry.id,
        user_id = %user_auth.user_id,
        amount = request.amount,
        "Ledger entry created"
    );

    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// List a family's ledger entries, newest first, cursor-paginated.
///
/// GET /api/v1/families/:family_id/entries?limit=&cursor=
pub async fn list_entries(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(family_id): Path<Uuid>,
    Query(query): Query<ListEntriesQuery>,
) -> Result<Json<ListEntriesResponse>, ApiError> {
    let family_repo = FamilyRepository::new(state.pool.clone());
    let ledger_repo = LedgerRepository::new(state.pool.clone());

    family_repo
        .get_membership(family_id, user_auth.user_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Family not found or you are not a member".to_string())
        })?;

    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let before = match &query.cursor {
        Some(cursor) => Some(
            decode_cursor(cursor)
                .map_err(|_| ApiError::Validation("Invalid pagination cursor".to_string()))?,
        ),
        None => None,
    };

    // Fetch one extra row to detect whether another page exists
    let mut entries = ledger_repo
        .list_entries(family_id, before, limit + 1)
        .await?;

    let next_cursor = if entries.len() as i64 > limit {
        entries.truncate(limit as usize);
        entries
            .last()
            .map(|e| encode_cursor(e.created_at, e.id))
    } else {
        None
    };

    let data: Vec<LedgerEntry> = entries.into_iter().map(Into::into).collect();

    Ok(Json(ListEntriesResponse { data, next_cursor }))
}

/// Update a ledger entry. Only the author can edit their entry.
///
/// PUT /api/v1/entries/:entry_id
pub async fn update_entry(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<UpdateEntryRequest>,
) -> Result<Json<LedgerEntry>, ApiError> {
    request.validate()?;

    let ledger_repo = LedgerRepository::new(state.pool.clone());

    let existing = ledger_repo
        .find_by_id(entry_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Entry not found".to_string()))?;

    if existing.user_id != Some(user_auth.user_id) {
        return Err(ApiError::Forbidden(
            "Only the author can edit an entry".to_string(),
        ));
    }

    // The expense/income rules must hold for the entry as it will be after
    // the partial update, not just for the changed fields.
    let effective_amount = request.amount.unwrap_or(existing.amount);
    if effective_amount == 0 {
        return Err(ApiError::Validation(
            "Amount must not be zero".to_string(),
        ));
    }
    let effective_photo = request
        .photo_url
        .clone()
        .or_else(|| existing.photo_url.clone());
    if effective_amount > 0 && effective_photo.as_deref().map_or(true, str::is_empty) {
        return Err(ApiError::Validation(
            "Expense entries require a receipt photo".to_string(),
        ));
    }

    let entry = ledger_repo
        .update_entry(
            entry_id,
            request.amount,
            request.category_id,
            request.description.as_deref(),
            request.photo_url.as_deref(),
            request.entry_date,
        )
        .await?;

    info!(
        family_id = %existing.family_id,
        entry_id = %entry_id,
        user_id = %user_auth.user_id,
        "Ledger entry updated"
    );

    Ok(Json(entry.into()))
}

/// Delete a ledger entry. Only the author can delete their entry.
///
/// DELETE /api/v1/entries/:entry_id
pub async fn delete_entry(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(entry_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let ledger_repo = LedgerRepository::new(state.pool.clone());

    let existing = ledger_repo
        .find_by_id(entry_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Entry not found".to_string()))?;

    if existing.user_id != Some(user_auth.user_id) {
        return Err(ApiError::Forbidden(
            "Only the author can delete an entry".to_string(),
        ));
    }

    ledger_repo.delete_entry(entry_id).await?;

    info!(
        family_id = %existing.family_id,
        entry_id = %entry_id,
        user_id = %user_auth.user_id,
        "Ledger entry deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
