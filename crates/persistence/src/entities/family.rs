//! Family entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::family::FamilyRole;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for family_role that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "family_role", rename_all = "lowercase")]
pub enum FamilyRoleDb {
    Owner,
    Member,
}

impl From<FamilyRoleDb> for FamilyRole {
    fn from(db_role: FamilyRoleDb) -> Self {
        match db_role {
            FamilyRoleDb::Owner => FamilyRole::Owner,
            FamilyRoleDb::Member => FamilyRole::Member,
        }
    }
}

impl From<FamilyRole> for FamilyRoleDb {
    fn from(role: FamilyRole) -> Self {
        match role {
            FamilyRole::Owner => FamilyRoleDb::Owner,
            FamilyRole::Member => FamilyRoleDb::Member,
        }
    }
}

/// Database row mapping for the families table.
#[derive(Debug, Clone, FromRow)]
pub struct FamilyEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FamilyEntity> for domain::models::Family {
    fn from(entity: FamilyEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            owner_id: entity.owner_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the family_members table.
#[derive(Debug, Clone, FromRow)]
pub struct FamilyMembershipEntity {
    pub id: Uuid,
    pub family_id: Uuid,
    pub user_id: Uuid,
    pub role: FamilyRoleDb,
    pub joined_at: DateTime<Utc>,
}

impl From<FamilyMembershipEntity> for domain::models::FamilyMembership {
    fn from(entity: FamilyMembershipEntity) -> Self {
        Self {
            id: entity.id,
            family_id: entity.family_id,
            user_id: entity.user_id,
            role: entity.role.into(),
            joined_at: entity.joined_at,
        }
    }
}

/// Family row joined with the requesting user's membership and member count.
#[derive(Debug, Clone, FromRow)]
pub struct FamilyWithMembershipEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Membership fields
    pub role: FamilyRoleDb,
    pub joined_at: DateTime<Utc>,
    // Aggregates
    pub member_count: i64,
}

/// Membership row joined with user profile for member listings.
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithUserEntity {
    pub id: Uuid,
    pub family_id: Uuid,
    pub user_id: Uuid,
    pub role: FamilyRoleDb,
    pub joined_at: DateTime<Utc>,
    // User fields
    pub nickname: String,
    pub avatar_url: Option<String>,
}
