//! Invite code domain models.
//!
//! Invite codes are 6-digit decimal strings that family owners hand to
//! people they want to add. A family has at most one active code at a time;
//! creating a new one retires the previous. Codes are single-use and expire
//! 24 hours after creation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Hours an invite code stays valid after creation.
pub const INVITE_CODE_TTL_HOURS: i64 = 24;

/// Attempts to find a collision-free code before giving up.
pub const MAX_CODE_GENERATION_ATTEMPTS: u32 = 10;

/// Represents an invite code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InviteCode {
    pub id: Uuid,
    pub family_id: Uuid,
    pub code: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_used: bool,
}

impl InviteCode {
    /// Returns true if the code can still be redeemed at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && self.expires_at > now
    }
}

/// Response after creating an invite code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateInviteResponse {
    pub code: String,
    pub family_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Request to redeem an invite code.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RedeemInviteRequest {
    /// A 6-digit decimal code.
    #[validate(regex(
        path = *INVITE_CODE_REGEX,
        message = "Invite code must be exactly 6 digits"
    ))]
    pub code: String,
}

lazy_static::lazy_static! {
    static ref INVITE_CODE_REGEX: regex::Regex =
        regex::Regex::new(r"^[0-9]{6}$").unwrap();
}

/// Response after redeeming an invite code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RedeemInviteResponse {
    pub family_id: Uuid,
    pub family_name: String,
    pub joined_at: DateTime<Utc>,
}

/// Computes the expiry timestamp for a code created at `created_at`.
pub fn invite_expiry(created_at: DateTime<Utc>) -> DateTime<Utc> {
    created_at + Duration::hours(INVITE_CODE_TTL_HOURS)
}

/// Generates a random 6-digit decimal invite code.
///
/// Leading zeros are allowed, so the space is 000000-999999.
pub fn generate_invite_code() -> String {
    use rand::Rng;
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:06}", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_is_six_digits() {
        for _ in 0..100 {
            let code = generate_invite_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()), "bad code {}", code);
        }
    }

    #[test]
    fn test_generated_code_keeps_leading_zeros() {
        // Format width must pad; sample enough codes that at least the
        // formatting path is exercised.
        let codes: Vec<String> = (0..1000).map(|_| generate_invite_code()).collect();
        assert!(codes.iter().all(|c| c.len() == 6));
    }

    #[test]
    fn test_redeem_request_validation() {
        use validator::Validate;

        let valid = RedeemInviteRequest {
            code: "042137".to_string(),
        };
        assert!(valid.validate().is_ok());

        for bad in ["12345", "1234567", "12a456", "", "12 456"] {
            let request = RedeemInviteRequest {
                code: bad.to_string(),
            };
            assert!(request.validate().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_invite_expiry_is_24_hours() {
        let created = Utc::now();
        let expires = invite_expiry(created);
        assert_eq!(expires - created, Duration::hours(24));
    }

    #[test]
    fn test_is_active() {
        let now = Utc::now();
        let code = InviteCode {
            id: Uuid::new_v4(),
            family_id: Uuid::new_v4(),
            code: "123456".to_string(),
            created_by: Uuid::new_v4(),
            created_at: now,
            expires_at: invite_expiry(now),
            is_used: false,
        };
        assert!(code.is_active(now));

        let used = InviteCode {
            is_used: true,
            ..code.clone()
        };
        assert!(!used.is_active(now));

        let expired = InviteCode {
            expires_at: now - Duration::minutes(1),
            ..code
        };
        assert!(!expired.is_active(now));
    }
}
