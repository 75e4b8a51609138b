//! Password hashing helpers.

use crate::errors::{AuthError, DomainError, DomainResult};

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

// bcrypt work factor
const HASH_COST: u32 = 12;

/// Validate and hash a plaintext password.
pub fn hash_password(password: &str) -> DomainResult<String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::PasswordTooShort {
            min_length: MIN_PASSWORD_LENGTH,
        }
        .into());
    }

    bcrypt::hash(password, HASH_COST).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash password: {}", e),
    })
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> DomainResult<bool> {
    bcrypt::verify(password, password_hash).map_err(|e| DomainError::Internal {
        message: format!("Failed to verify password: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AuthError;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_short_password_rejected() {
        let result = hash_password("1234567");
        assert!(matches!(
            result,
            Err(crate::errors::DomainError::Auth(
                AuthError::PasswordTooShort { min_length: 8 }
            ))
        ));
    }
}
