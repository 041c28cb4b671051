//! Ledger statistics aggregation.
//!
//! Aggregation runs over rows already fetched for the month window, so the
//! arithmetic here is pure and independently testable. The persistence layer
//! is responsible only for selecting entries whose `entry_date` falls inside
//! the window returned by [`month_bounds`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::ledger::LedgerEntry;
use crate::models::stats::{CategoryStat, MemberStat, MemberStatsResponse, MonthlyStatsResponse};

/// Display name used for entries whose author no longer exists.
pub const DELETED_MEMBER_PLACEHOLDER: &str = "Former member";

/// Returns the inclusive (first day, last day) bounds of a calendar month.
///
/// Handles variable month lengths and leap years; returns None for an
/// invalid year/month combination.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_first.pred_opt()?;
    Some((first, last))
}

/// Computes the monthly aggregate: net signed total plus per-category sums.
///
/// Entries with no category (income) group under the `None` key. Zero rows
/// produce a zeroed response, never an error.
pub fn monthly_stats(year: i32, month: u32, entries: &[LedgerEntry]) -> MonthlyStatsResponse {
    let mut total_amount: i64 = 0;
    let mut by_category: BTreeMap<Option<Uuid>, (i64, u64)> = BTreeMap::new();

    for entry in entries {
        total_amount += entry.amount;
        let slot = by_category.entry(entry.category_id).or_insert((0, 0));
        slot.0 += entry.amount;
        slot.1 += 1;
    }

    let mut per_category: Vec<CategoryStat> = by_category
        .into_iter()
        .map(|(category_id, (total, count))| CategoryStat {
            category_id,
            total_amount: total,
            entry_count: count,
        })
        .collect();
    per_category.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then(a.category_id.cmp(&b.category_id))
    });

    MonthlyStatsResponse {
        year,
        month,
        total_amount,
        per_category,
    }
}

/// A ledger entry row joined with its author's display name.
#[derive(Debug, Clone)]
pub struct AuthoredAmount {
    /// None once the author's account has been deleted.
    pub user_id: Option<Uuid>,
    pub amount: i64,
    pub nickname: Option<String>,
}

/// Computes per-member expense/income splits for the month.
///
/// Expenses are sums of positive amounts; income is the absolute sum of
/// negative amounts. Authors who no longer exist fall back to a placeholder
/// display name.
pub fn member_stats(year: i32, month: u32, entries: &[AuthoredAmount]) -> MemberStatsResponse {
    let mut by_member: BTreeMap<Option<Uuid>, MemberStat> = BTreeMap::new();

    for entry in entries {
        let stat = by_member
            .entry(entry.user_id)
            .or_insert_with(|| MemberStat {
                user_id: entry.user_id,
                nickname: entry
                    .nickname
                    .clone()
                    .unwrap_or_else(|| DELETED_MEMBER_PLACEHOLDER.to_string()),
                total_expense: 0,
                total_income: 0,
                entry_count: 0,
            });
        if entry.amount > 0 {
            stat.total_expense += entry.amount;
        } else {
            stat.total_income += entry.amount.abs();
        }
        stat.entry_count += 1;
    }

    let mut per_member: Vec<MemberStat> = by_member.into_values().collect();
    per_member.sort_by(|a, b| {
        b.total_expense
            .cmp(&a.total_expense)
            .then(a.nickname.cmp(&b.nickname))
    });

    MemberStatsResponse {
        year,
        month,
        per_member,
    }
}
