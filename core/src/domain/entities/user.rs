//! User account entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account, keyed by normalized phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,

    /// Normalized Japanese mobile number (digits only, national format)
    pub phone_number: String,

    /// bcrypt hash of the account password
    pub password_hash: String,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last account update
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new account record with a fresh id and timestamps
    pub fn new(phone_number: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone_number,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = User::new("09012345678".to_string(), "$2b$12$hash".to_string());
        assert_eq!(user.phone_number, "09012345678");
        assert_eq!(user.created_at, user.updated_at);
        assert!(!user.id.is_nil());
    }
}
