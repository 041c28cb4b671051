//! Ledger entry domain models.
//!
//! Amounts are signed minor units (cents): positive for expenses, negative
//! for income. Every expense carries a receipt photo reference; income
//! entries need neither photo nor category.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Represents a ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LedgerEntry {
    pub id: Uuid,
    pub family_id: Uuid,
    /// None once the authoring user has deleted their account.
    pub user_id: Option<Uuid>,
    pub amount: i64,
    pub category_id: Option<Uuid>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Returns true if this entry is an expense (positive amount).
    pub fn is_expense(&self) -> bool {
        self.amount > 0
    }
}

/// Request payload for creating a ledger entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_expense_photo"))]
pub struct CreateEntryRequest {
    #[validate(custom(function = "shared::validation::validate_amount"))]
    pub amount: i64,

    pub category_id: Option<Uuid>,

    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 500, message = "Photo URL must be at most 500 characters"))]
    pub photo_url: Option<String>,

    pub entry_date: NaiveDate,
}

/// Expenses require a receipt photo; income does not.
fn validate_expense_photo(request: &CreateEntryRequest) -> Result<(), ValidationError> {
    if request.amount > 0 && request.photo_url.as_deref().map_or(true, str::is_empty) {
        let mut err = ValidationError::new("photo_required");
        err.message = Some("Expense entries require a receipt photo".into());
        return Err(err);
    }
    Ok(())
}

/// Request payload for updating a ledger entry. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateEntryRequest {
    pub amount: Option<i64>,

    pub category_id: Option<Uuid>,

    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 500, message = "Photo URL must be at most 500 characters"))]
    pub photo_url: Option<String>,

    pub entry_date: Option<NaiveDate>,
}

/// Query parameters for listing entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListEntriesQuery {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
}

/// Response for listing entries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListEntriesResponse {
    pub data: Vec<LedgerEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: i64, photo_url: Option<&str>) -> CreateEntryRequest {
        CreateEntryRequest {
            amount,
            category_id: None,
            description: None,
            photo_url: photo_url.map(String::from),
            entry_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        }
    }

    #[test]
    fn test_expense_requires_photo() {
        assert!(request(1500, None).validate().is_err());
        assert!(request(1500, Some("")).validate().is_err());
        assert!(request(1500, Some("receipts/abc.jpg")).validate().is_ok());
    }

    #[test]
    fn test_income_needs_no_photo() {
        assert!(request(-250_000, None).validate().is_ok());
    }

    #[test]
    fn test_zero_amount_rejected() {
        assert!(request(0, Some("receipts/abc.jpg")).validate().is_err());
    }

    #[test]
    fn test_is_expense() {
        let entry = LedgerEntry {
            id: Uuid::new_v4(),
            family_id: Uuid::new_v4(),
            user_id: Some(Uuid::new_v4()),
            amount: 1200,
            category_id: None,
            description: None,
            photo_url: Some("receipts/x.jpg".to_string()),
            entry_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(entry.is_expense());
        let income = LedgerEntry {
            amount: -1200,
            ..entry
        };
        assert!(!income.is_expense());
    }
}
