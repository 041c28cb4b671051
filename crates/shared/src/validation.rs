//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of a family name.
pub const MAX_FAMILY_NAME_LENGTH: usize = 50;

/// Maximum length of a user nickname.
pub const MAX_NICKNAME_LENGTH: usize = 30;

/// Maximum length of a ledger entry description.
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Validates that a family name is non-blank and within the length limit.
pub fn validate_family_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("family_name_blank");
        err.message = Some("Family name must not be blank".into());
        return Err(err);
    }
    if trimmed.chars().count() > MAX_FAMILY_NAME_LENGTH {
        let mut err = ValidationError::new("family_name_length");
        err.message = Some("Family name must be at most 50 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a nickname is non-blank and within the length limit.
pub fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    let trimmed = nickname.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("nickname_blank");
        err.message = Some("Nickname must not be blank".into());
        return Err(err);
    }
    if trimmed.chars().count() > MAX_NICKNAME_LENGTH {
        let mut err = ValidationError::new("nickname_length");
        err.message = Some("Nickname must be at most 30 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that an amount is non-zero.
///
/// Amounts are signed minor units: positive for expenses, negative for
/// income. Zero carries no information and is rejected.
pub fn validate_amount(amount: i64) -> Result<(), ValidationError> {
    if amount == 0 {
        let mut err = ValidationError::new("amount_zero");
        err.message = Some("Amount must not be zero".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a statistics month (1-based).
pub fn validate_month(month: u32) -> Result<(), ValidationError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        let mut err = ValidationError::new("month_range");
        err.message = Some("Month must be between 1 and 12".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_family_name() {
        assert!(validate_family_name("Our Household").is_ok());
        assert!(validate_family_name("  ").is_err());
        assert!(validate_family_name(&"x".repeat(51)).is_err());
        assert!(validate_family_name(&"x".repeat(50)).is_ok());
    }

    #[test]
    fn test_validate_nickname() {
        assert!(validate_nickname("mom").is_ok());
        assert!(validate_nickname("").is_err());
        assert!(validate_nickname(&"n".repeat(31)).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(1250).is_ok());
        assert!(validate_amount(-300).is_ok());
        assert!(validate_amount(0).is_err());
    }

    #[test]
    fn test_validate_month() {
        assert!(validate_month(1).is_ok());
        assert!(validate_month(12).is_ok());
        assert!(validate_month(0).is_err());
        assert!(validate_month(13).is_err());
    }
}
