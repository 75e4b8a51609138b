//! Authentication error taxonomy.
//!
//! Every variant is recoverable by the caller: correct the input or request
//! a new code. Localized wording is a presentation-layer concern; these
//! messages are the English defaults.

use thiserror::Error;

/// Authentication and verification errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid phone number format")]
    InvalidPhoneFormat,

    #[error("This phone number is already registered")]
    AlreadyRegistered,

    #[error("This phone number is not registered")]
    NotRegistered,

    #[error("No verification code found for this phone number")]
    CodeNotFound,

    #[error("Verification code does not match")]
    CodeMismatch,

    #[error("Verification code has expired")]
    CodeExpired,

    #[error("Failed to deliver the verification code")]
    DeliveryFailed,

    #[error("Please wait {seconds} seconds before requesting a new code")]
    RateLimitExceeded { seconds: i64 },

    #[error("Password must be at least {min_length} characters")]
    PasswordTooShort { min_length: usize },
}

impl AuthError {
    /// Stable error code for programmatic handling in API clients
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidPhoneFormat => "INVALID_PHONE_FORMAT",
            AuthError::AlreadyRegistered => "ALREADY_REGISTERED",
            AuthError::NotRegistered => "NOT_REGISTERED",
            AuthError::CodeNotFound => "CODE_NOT_FOUND",
            AuthError::CodeMismatch => "CODE_MISMATCH",
            AuthError::CodeExpired => "CODE_EXPIRED",
            AuthError::DeliveryFailed => "DELIVERY_FAILED",
            AuthError::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            AuthError::PasswordTooShort { .. } => "PASSWORD_TOO_SHORT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = AuthError::RateLimitExceeded { seconds: 42 };
        assert!(error.to_string().contains("42 seconds"));

        let error = AuthError::PasswordTooShort { min_length: 8 };
        assert!(error.to_string().contains("8 characters"));
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let codes = [
            AuthError::InvalidPhoneFormat.error_code(),
            AuthError::AlreadyRegistered.error_code(),
            AuthError::NotRegistered.error_code(),
            AuthError::CodeNotFound.error_code(),
            AuthError::CodeMismatch.error_code(),
            AuthError::CodeExpired.error_code(),
            AuthError::DeliveryFailed.error_code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
