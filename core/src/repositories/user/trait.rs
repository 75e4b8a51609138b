//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository contract for `User` persistence.
///
/// Accounts are looked up by normalized phone number; the implementation
/// must enforce phone-number uniqueness.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an account by normalized phone number.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - account found
    /// * `Ok(None)` - no account with this phone number
    /// * `Err(DomainError)` - persistence failure
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError>;

    /// Check whether an account exists for a phone number.
    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, DomainError>;

    /// Persist a new account.
    ///
    /// A concurrent registration for the same number must fail on the
    /// store's uniqueness constraint, surfaced as
    /// [`AuthError::AlreadyRegistered`](crate::errors::AuthError::AlreadyRegistered).
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace the password hash for an account.
    ///
    /// # Returns
    /// * `Ok(true)` - password updated
    /// * `Ok(false)` - no account with this phone number
    async fn update_password(
        &self,
        phone_number: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError>;
}
