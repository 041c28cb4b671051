//! Statistics DTOs for monthly and per-member aggregates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for statistics endpoints.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct StatsQuery {
    #[validate(range(min = 1970, max = 9999, message = "Year out of range"))]
    pub year: i32,

    #[validate(custom(function = "shared::validation::validate_month"))]
    pub month: u32,
}

/// Per-category aggregate within a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoryStat {
    /// None groups uncategorized entries (income has no category).
    pub category_id: Option<Uuid>,
    pub total_amount: i64,
    pub entry_count: u64,
}

/// Monthly aggregate for a family.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthlyStatsResponse {
    pub year: i32,
    pub month: u32,
    /// Net signed sum: expenses positive, income negative.
    pub total_amount: i64,
    pub per_category: Vec<CategoryStat>,
}

/// Per-member aggregate within a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberStat {
    /// None for entries whose author has deleted their account.
    pub user_id: Option<Uuid>,
    pub nickname: String,
    /// Sum of positive amounts.
    pub total_expense: i64,
    /// Absolute sum of negative amounts.
    pub total_income: i64,
    pub entry_count: u64,
}

/// Member statistics for a family.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberStatsResponse {
    pub year: i32,
    pub month: u32,
    pub per_member: Vec<MemberStat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_query_validation() {
        let valid = StatsQuery {
            year: 2024,
            month: 2,
        };
        assert!(valid.validate().is_ok());

        let bad_month = StatsQuery {
            year: 2024,
            month: 13,
        };
        assert!(bad_month.validate().is_err());

        let bad_year = StatsQuery {
            year: 1800,
            month: 2,
        };
        assert!(bad_year.validate().is_err());
    }
}
