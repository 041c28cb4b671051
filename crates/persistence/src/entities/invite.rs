//! Invite code entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the invite_codes table.
#[derive(Debug, Clone, FromRow)]
pub struct InviteCodeEntity {
    pub id: Uuid,
    pub family_id: Uuid,
    pub code: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_used: bool,
}

impl From<InviteCodeEntity> for domain::models::InviteCode {
    fn from(entity: InviteCodeEntity) -> Self {
        Self {
            id: entity.id,
            family_id: entity.family_id,
            code: entity.code,
            created_by: entity.created_by,
            created_at: entity.created_at,
            expires_at: entity.expires_at,
            is_used: entity.is_used,
        }
    }
}
