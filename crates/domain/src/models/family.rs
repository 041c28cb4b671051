//! Family domain models.
//!
//! A family is the unit of shared bookkeeping: members record entries into
//! the family's ledger and see each other's totals. Every family has exactly
//! one owner at all times.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::user::UserPublic;

/// Role within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyRole {
    Owner,
    Member,
}

impl FamilyRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyRole::Owner => "owner",
            FamilyRole::Member => "member",
        }
    }

    /// Returns true if this role can create and revoke invite codes.
    pub fn can_invite(&self) -> bool {
        matches!(self, FamilyRole::Owner)
    }

    /// Returns true if this role can remove other members.
    pub fn can_remove_members(&self) -> bool {
        matches!(self, FamilyRole::Owner)
    }

    /// Returns true if this role can transfer family ownership.
    pub fn can_transfer_ownership(&self) -> bool {
        matches!(self, FamilyRole::Owner)
    }

    /// Returns true if this role may leave the family directly.
    /// The owner must transfer ownership first.
    pub fn can_leave(&self) -> bool {
        matches!(self, FamilyRole::Member)
    }
}

impl FromStr for FamilyRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(FamilyRole::Owner),
            "member" => Ok(FamilyRole::Member),
            _ => Err(format!("Invalid family role: {}", s)),
        }
    }
}

impl fmt::Display for FamilyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Family {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Represents a user's membership in a family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FamilyMembership {
    pub id: Uuid,
    pub family_id: Uuid,
    pub user_id: Uuid,
    pub role: FamilyRole,
    pub joined_at: DateTime<Utc>,
}

/// Request payload for creating a family.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateFamilyRequest {
    #[validate(custom(function = "shared::validation::validate_family_name"))]
    pub name: String,

    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: Option<String>,
}

/// Response for family listing (minimal info).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FamilySummary {
    pub id: Uuid,
    pub name: String,
    pub member_count: i64,
    pub your_role: FamilyRole,
    pub joined_at: DateTime<Utc>,
}

/// Response for family detail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FamilyDetail {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub member_count: i64,
    pub created_at: DateTime<Utc>,
    pub your_role: FamilyRole,
    pub your_joined_at: DateTime<Utc>,
}

/// Response for listing families.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListFamiliesResponse {
    pub data: Vec<FamilySummary>,
    pub count: usize,
}

/// Member entry in a member listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberResponse {
    pub id: Uuid,
    pub user: UserPublic,
    pub role: FamilyRole,
    pub joined_at: DateTime<Utc>,
}

/// Response for listing members.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListMembersResponse {
    pub data: Vec<MemberResponse>,
    pub count: usize,
}

/// Request to transfer family ownership.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransferOwnershipRequest {
    /// The user ID of the new owner (must be an existing member).
    pub new_owner_id: Uuid,
}

/// Response after transferring family ownership.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TransferOwnershipResponse {
    pub family_id: Uuid,
    pub previous_owner_id: Uuid,
    pub new_owner_id: Uuid,
    pub transferred_at: DateTime<Utc>,
}

/// Response when removing a member or leaving a family.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoveMemberResponse {
    pub removed: bool,
    pub family_id: Uuid,
    pub user_id: Uuid,
}
