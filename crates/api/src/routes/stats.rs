//! Statistics routes: monthly and per-member aggregates.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::ledger::LedgerEntry;
use domain::models::stats::{MemberStatsResponse, MonthlyStatsResponse, StatsQuery};
use domain::services::stats::{self, AuthoredAmount};
use persistence::repositories::{FamilyRepository, LedgerRepository};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Monthly aggregate: net total plus per-category sums.
///
/// GET /api/v1/families/:family_id/stats/monthly?year=&month=
pub async fn monthly_stats(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(family_id): Path<Uuid>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<MonthlyStatsResponse>, ApiError> {
    query.validate()?;

    let (first, last) = month_window(&query)?;
    let ledger_repo = member_checked_repo(&state, family_id, user_auth.user_id).await?;

    let entries: Vec<LedgerEntry> = ledger_repo
        .entries_in_window(family_id, first, last)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(stats::monthly_stats(query.year, query.month, &entries)))
}

/// Per-member expense/income splits for a month.
///
/// GET /api/v1/families/:family_id/stats/members?year=&month=
pub async fn member_stats(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(family_id): Path<Uuid>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<MemberStatsResponse>, ApiError> {
    query.validate()?;

    let (first, last) = month_window(&query)?;
    let ledger_repo = member_checked_repo(&state, family_id, user_auth.user_id).await?;

    let entries: Vec<AuthoredAmount> = ledger_repo
        .entries_with_author_in_window(family_id, first, last)
        .await?
        .into_iter()
        .map(|e| AuthoredAmount {
            user_id: e.user_id,
            amount: e.amount,
            nickname: e.nickname,
        })
        .collect();

    Ok(Json(stats::member_stats(query.year, query.month, &entries)))
}

/// Resolves the inclusive date window for the queried month.
fn month_window(query: &StatsQuery) -> Result<(chrono::NaiveDate, chrono::NaiveDate), ApiError> {
    stats::month_bounds(query.year, query.month)
        .ok_or_else(|| ApiError::Validation("Invalid year/month".to_string()))
}

/// Verifies membership and returns a ledger repository for the family.
async fn member_checked_repo(
    state: &AppState,
    family_id: Uuid,
    user_id: Uuid,
) -> Result<LedgerRepository, ApiError> {
    let family_repo = FamilyRepository::new(state.pool.clone());
    family_repo
        .get_membership(family_id, user_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Family not found or you are not a member".to_string())
        })?;

    Ok(LedgerRepository::new(state.pool.clone()))
}
