//! User domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public user info (no email, for member listings).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserPublic {
    pub id: Uuid,
    pub nickname: String,
    pub avatar_url: Option<String>,
}

/// Request payload for registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(custom(function = "shared::validation::validate_nickname"))]
    pub nickname: String,
}

/// Request payload for login.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Request payload for refreshing an access token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request payload for profile updates.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "shared::validation::validate_nickname"))]
    pub nickname: Option<String>,

    #[validate(length(max = 500, message = "Avatar URL must be at most 500 characters"))]
    pub avatar_url: Option<String>,
}

/// Token pair returned on login/register/refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in_secs: i64,
}

/// Response after registration or login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AuthResponse {
    pub user: User,
    pub tokens: TokenPair,
}

/// Summary of what an account deletion removed or reassigned.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DeletionSummary {
    /// Families whose ownership was handed to another member.
    pub families_transferred: u64,
    /// Families deleted because no other member remained.
    pub families_deleted: u64,
    /// Ledger entries removed (own entries plus entries of deleted families).
    pub entries_deleted: u64,
    /// Membership rows removed.
    pub memberships_deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "mom@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            nickname: "mom".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "hunter2hunter2".to_string(),
            nickname: "mom".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            email: "mom@example.com".to_string(),
            password: "short".to_string(),
            nickname: "mom".to_string(),
        };
        assert!(short_password.validate().is_err());

        let blank_nickname = RegisterRequest {
            email: "mom@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            nickname: "   ".to_string(),
        };
        assert!(blank_nickname.validate().is_err());
    }

    #[test]
    fn test_update_profile_request_allows_partial() {
        let nickname_only = UpdateProfileRequest {
            nickname: Some("dad".to_string()),
            avatar_url: None,
        };
        assert!(nickname_only.validate().is_ok());

        let nothing = UpdateProfileRequest {
            nickname: None,
            avatar_url: None,
        };
        assert!(nothing.validate().is_ok());
    }

    #[test]
    fn test_deletion_summary_serialization() {
        let summary = DeletionSummary {
            families_transferred: 1,
            families_deleted: 2,
            entries_deleted: 10,
            memberships_deleted: 3,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"families_transferred\":1"));
        assert!(json.contains("\"families_deleted\":2"));
    }
}
