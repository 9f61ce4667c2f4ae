//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID must be a positive integer, got {0}")]
    NonPositiveId(i64),

    #[error("User ID is not a number: '{0}'")]
    MalformedId(String),

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email must contain a single '@' with text on both sides")]
    InvalidEmail,

    #[error("Password digest cannot be empty")]
    EmptyPasswordHash,
}

const MAX_EMAIL_LENGTH: usize = 254;

/// Validate a numeric user ID
///
/// Identifiers are assigned by the store and always start at 1.
pub fn validate_user_id(id: i64) -> Result<(), UserValidationError> {
    if id <= 0 {
        return Err(UserValidationError::NonPositiveId(id));
    }

    Ok(())
}

/// Validate an email address
///
/// Rules:
/// - Cannot be empty
/// - Maximum 254 characters
/// - Exactly one '@' with a non-empty local part and domain
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    let mut parts = email.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || parts.next().is_some() {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}
