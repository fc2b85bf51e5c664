//! Common validation rules shared across request payloads.

use validator::ValidationError;

use crate::models::notification::MAX_MESSAGE_LENGTH;

/// Validates username format.
///
/// Requirements:
/// - Only alphanumeric characters and underscores
/// - 1-50 characters in length
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() || username.len() > 50 {
        return Err(ValidationError::new("username_invalid_length"));
    }

    if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::new("username_invalid_characters"));
    }

    Ok(())
}

/// Validates a vehicle identification number.
///
/// Requirements:
/// - Exactly 17 characters
/// - ASCII alphanumeric, excluding I, O and Q
pub fn validate_vin(vin: &str) -> Result<(), ValidationError> {
    if vin.len() != 17 {
        return Err(ValidationError::new("vin_invalid_length"));
    }

    let valid = vin
        .chars()
        .all(|c| c.is_ascii_alphanumeric() && !matches!(c.to_ascii_uppercase(), 'I' | 'O' | 'Q'));
    if !valid {
        return Err(ValidationError::new("vin_invalid_characters"));
    }

    Ok(())
}

/// Validates a notification message.
///
/// Requirements:
/// - Not blank after trimming
/// - At most 500 characters
pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(ValidationError::new("message_blank"));
    }

    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(ValidationError::new("message_too_long"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rejects_empty() {
        assert!(validate_username("").is_err());
    }

    #[test]
    fn username_rejects_special_chars() {
        assert!(validate_username("user@name").is_err());
    }

    #[test]
    fn username_accepts_valid() {
        assert!(validate_username("valid_user123").is_ok());
    }

    #[test]
    fn vin_rejects_wrong_length() {
        assert!(validate_vin("ABC123").is_err());
        assert!(validate_vin("5YJ3E1EA7KF3170001X").is_err());
    }

    #[test]
    fn vin_rejects_forbidden_letters() {
        assert!(validate_vin("5YJ3E1EA7KF31700I").is_err());
        assert!(validate_vin("5YJ3E1EA7KF31700O").is_err());
        assert!(validate_vin("5YJ3E1EA7KF31700Q").is_err());
    }

    #[test]
    fn vin_accepts_valid() {
        assert!(validate_vin("5YJ3E1EA7KF317000").is_ok());
        assert!(validate_vin("1FADP3F20EL123456").is_ok());
    }

    #[test]
    fn message_rejects_blank() {
        assert!(validate_message("").is_err());
        assert!(validate_message("  \n ").is_err());
    }

    #[test]
    fn message_rejects_over_limit() {
        assert!(validate_message(&"a".repeat(501)).is_err());
    }

    #[test]
    fn message_accepts_at_limit() {
        assert!(validate_message(&"a".repeat(500)).is_ok());
        assert!(validate_message("hello").is_ok());
    }
}
