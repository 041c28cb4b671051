//! Ledger entry entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the ledger_entries table.
#[derive(Debug, Clone, FromRow)]
pub struct LedgerEntryEntity {
    pub id: Uuid,
    pub family_id: Uuid,
    pub user_id: Option<Uuid>,
    pub amount: i64,
    pub category_id: Option<Uuid>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LedgerEntryEntity> for domain::models::LedgerEntry {
    fn from(entity: LedgerEntryEntity) -> Self {
        Self {
            id: entity.id,
            family_id: entity.family_id,
            user_id: entity.user_id,
            amount: entity.amount,
            category_id: entity.category_id,
            description: entity.description,
            photo_url: entity.photo_url,
            entry_date: entity.entry_date,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Entry row joined with the author's nickname (LEFT JOIN, so the nickname
/// is None for deleted authors).
#[derive(Debug, Clone, FromRow)]
pub struct EntryWithAuthorEntity {
    pub user_id: Option<Uuid>,
    pub amount: i64,
    pub nickname: Option<String>,
}
